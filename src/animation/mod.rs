pub(crate) mod ease;
pub(crate) mod options;
pub(crate) mod props;
pub(crate) mod resolve;
pub(crate) mod timeline;
