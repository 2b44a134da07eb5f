//! tactus is a declarative animation timeline engine for per-frame, immediate-mode visuals.
//!
//! Every frame, drawing code declares what each object should be doing ("grow to radius 100
//! starting at the note-on time, shrink back once the note is released") and the engine answers
//! one question: what is the value of every property right now?
//!
//! # Pieces
//!
//! - [`Timeline`]: one object's base props, declared segments and continuity snapshot. Resolving
//!   is a pure function of that state and a query time.
//! - [`Registry`]: positional identity across frames. It snapshots each timeline before the
//!   frame redeclares it, defers render callbacks until [`Registry::flush`], and evicts objects
//!   that were not declared in a frame.
//! - [`TimelineScript`]: a JSON form of one declaration pass, used by the `tactus` binary.
//!
//! # Frame loop
//!
//! ```
//! use tactus::{Props, Registry, SegmentOptions};
//!
//! let mut registry: Registry<Vec<f64>> = Registry::new();
//! let mut drawn = Vec::new();
//!
//! for frame_time in [0.0, 16.0, 32.0] {
//!     registry.begin_frame(frame_time);
//!     registry
//!         .queue(Props::from([("radius", 10.0)]), |p, out| {
//!             out.push(p.number("radius").unwrap_or(0.0));
//!         })
//!         .animate_to([("radius", 40.0)], SegmentOptions::new().at(0).duration(32));
//!     registry.flush(&mut drawn);
//!     registry.end_frame();
//! }
//! assert_eq!(drawn.len(), 3);
//! assert_eq!(drawn[2], 40.0);
//! ```
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animation;
mod foundation;
mod frame;
mod script;

pub use animation::ease::{Ease, Easing};
pub use animation::options::{SegmentOptions, SegmentOptionsDef, StartAt};
pub use animation::props::{PropValue, Props};
pub use animation::timeline::{
    DEFAULT_DURATION_MS, DEFAULT_ONE_PROPS, Timeline, TimelineEntry, TimelineWarning,
    default_base_value,
};
pub use foundation::error::{TactusError, TactusResult};
pub use foundation::time::{TimeExpr, TimeValue};
pub use frame::registry::{Registry, SlotId};
pub use script::model::{SegmentDef, TimelineScript};
pub use script::sample::{Sample, ScriptReport, check_script, sample_script};
