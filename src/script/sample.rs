use crate::{
    animation::{
        props::Props,
        timeline::{TimelineEntry, TimelineWarning},
    },
    foundation::error::TactusResult,
    script::model::TimelineScript,
};

/// Resolved props at one query time.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Sample {
    /// Absolute query time in milliseconds.
    pub time_ms: f64,
    /// Resolved property set.
    pub props: Props,
}

/// Static facts about a script: where each segment lands and what it warns about.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ScriptReport {
    /// Placement of every segment, in declaration order.
    pub entries: Vec<TimelineEntry>,
    /// Advisory warnings raised by the declared segments.
    pub warnings: Vec<TimelineWarning>,
}

/// Build the script's timeline at `origin_ms` and resolve it at every time in `times_ms`.
#[tracing::instrument(skip(script, times_ms), fields(samples = times_ms.len()))]
pub fn sample_script(
    script: &TimelineScript,
    origin_ms: f64,
    times_ms: &[f64],
) -> TactusResult<Vec<Sample>> {
    let mut timeline = script.build(origin_ms)?;
    timeline.validate();
    Ok(times_ms
        .iter()
        .map(|&time_ms| Sample {
            time_ms,
            props: timeline.get_current_props(time_ms),
        })
        .collect())
}

/// Place the script's segments and collect its advisory warnings.
#[tracing::instrument(skip(script))]
pub fn check_script(script: &TimelineScript) -> TactusResult<ScriptReport> {
    let mut timeline = script.build(0.0)?;
    let warnings = timeline.validate();
    Ok(ScriptReport {
        entries: timeline.entries(),
        warnings,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/script/sample.rs"]
mod tests;
