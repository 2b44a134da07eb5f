use crate::{
    animation::{
        options::{SegmentOptions, SegmentOptionsDef},
        props::Props,
        timeline::Timeline,
    },
    foundation::error::{TactusError, TactusResult},
};

/// One declared segment in a [`TimelineScript`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SegmentDef {
    /// Target values; only numeric entries animate.
    pub target: Props,
    /// Timing and shaping options.
    #[serde(default)]
    pub options: SegmentOptionsDef,
}

/// JSON description of a single timeline's declaration pass.
///
/// ```json
/// {
///   "initial": { "radius": 50, "fill": "#ff0066" },
///   "sticky": { "duration": 400 },
///   "segments": [
///     { "target": { "radius": 100 }, "options": { "at": 0, "easing": "outCubic" } },
///     { "target": { "radius": 0 }, "options": { "at": null } }
///   ]
/// }
/// ```
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TimelineScript {
    /// Base props.
    #[serde(default)]
    pub initial: Props,
    /// Options applied as defaults to every segment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sticky: Option<SegmentOptionsDef>,
    /// Segments in declaration order.
    #[serde(default)]
    pub segments: Vec<SegmentDef>,
}

impl TimelineScript {
    /// Parse and validate a script from JSON text.
    pub fn from_json(s: &str) -> TactusResult<Self> {
        let script: Self = serde_json::from_str(s)?;
        script.validate()?;
        Ok(script)
    }

    /// Reject scripts the permissive engine would silently reinterpret.
    ///
    /// Time expressions must parse and every segment must target at least one number.
    pub fn validate(&self) -> TactusResult<()> {
        if let Some(sticky) = &self.sticky {
            for tv in sticky.time_values() {
                tv.try_to_ms()
                    .map_err(|e| TactusError::script(format!("sticky options: {e}")))?;
            }
        }

        for (i, seg) in self.segments.iter().enumerate() {
            if seg.target.numbers().next().is_none() {
                return Err(TactusError::validation(format!(
                    "segment {i} has no numeric target values"
                )));
            }
            for tv in seg.options.time_values() {
                tv.try_to_ms()
                    .map_err(|e| TactusError::script(format!("segment {i}: {e}")))?;
            }
        }
        Ok(())
    }

    /// Build a timeline with clock origin `first_invoked_time` and declare every segment.
    pub fn build(&self, first_invoked_time: f64) -> TactusResult<Timeline> {
        self.validate()?;

        let mut timeline = Timeline::new(self.initial.clone(), first_invoked_time);
        if let Some(sticky) = &self.sticky {
            timeline.with_options(SegmentOptions::from(sticky.clone()));
        }
        for seg in &self.segments {
            timeline.animate_to(seg.target.clone(), SegmentOptions::from(seg.options.clone()));
        }
        Ok(timeline)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/script/model.rs"]
mod tests;
