/// Convenience result type used across tactus.
pub type TactusResult<T> = Result<T, TactusError>;

/// Error taxonomy for the fallible edges of the crate.
///
/// Timeline resolution itself never fails; these errors come from strict parsing and from
/// loading timeline scripts.
#[derive(thiserror::Error, Debug)]
pub enum TactusError {
    /// Script data that parses but cannot describe an animation.
    #[error("validation error: {0}")]
    Validation(String),

    /// A time expression that does not match `[[H:]MM:]SS`.
    #[error("time expression error: {0}")]
    Time(String),

    /// A timeline script that cannot be turned into a timeline.
    #[error("script error: {0}")]
    Script(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),
}

impl TactusError {
    /// Build a [`TactusError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`TactusError::Time`] value.
    pub fn time(msg: impl Into<String>) -> Self {
        Self::Time(msg.into())
    }

    /// Build a [`TactusError::Script`] value.
    pub fn script(msg: impl Into<String>) -> Self {
        Self::Script(msg.into())
    }
}

impl From<serde_json::Error> for TactusError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
