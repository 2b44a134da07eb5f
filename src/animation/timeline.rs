use crate::{
    animation::options::{SegmentOptions, StartAt},
    animation::props::Props,
    animation::resolve::Resolver,
    foundation::time::TimeValue,
};

/// Duration used by segments that give neither `duration` nor `end_time`.
pub const DEFAULT_DURATION_MS: f64 = 500.0;

/// Numeric properties whose implicit base value is `1` instead of `0`.
pub const DEFAULT_ONE_PROPS: [&str; 4] = ["opacity", "scale", "scaleX", "scaleY"];

/// Implicit base value for a numeric property missing from the initial props.
pub fn default_base_value(key: &str) -> f64 {
    if DEFAULT_ONE_PROPS.contains(&key) {
        1.0
    } else {
        0.0
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Segment {
    pub(crate) target: Props,
    pub(crate) options: SegmentOptions,
}

/// Derived placement of one declared segment on the timeline.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct TimelineEntry {
    /// Declaration index of the segment.
    pub segment: usize,
    /// Start in relative milliseconds; `None` if the segment is untriggered.
    pub start: Option<f64>,
    /// Length in milliseconds.
    pub duration: f64,
}

impl TimelineEntry {
    /// End in relative milliseconds, if the segment is triggered.
    pub fn end(&self) -> Option<f64> {
        self.start.map(|s| s + self.duration)
    }
}

/// Advisory problems found by [`Timeline::validate`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TimelineWarning {
    /// Some absolutely timed segments carry a delay and others do not.
    MixedDelayWithAt,
    /// A segment has neither `duration` nor `end_time`.
    MissingDuration,
    /// A time expression does not parse and is treated as `0ms`.
    InvalidTimeExpression,
}

impl TimelineWarning {
    /// Human-readable description.
    pub fn message(self) -> &'static str {
        match self {
            Self::MixedDelayWithAt => {
                "some segments with `at` use `delay` and others do not; timing may be ambiguous"
            }
            Self::MissingDuration => {
                "segment has no `duration` or `endTime`; using the 500ms default"
            }
            Self::InvalidTimeExpression => {
                "time expression is not [[H:]MM:]SS; using 0ms"
            }
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
struct WarningLatch {
    mixed_delay_with_at: bool,
    missing_duration: bool,
    invalid_time_expression: bool,
}

/// Animation state for one logical object.
///
/// A timeline holds base props, a list of declared segments, and an optional snapshot of the
/// last rendered values. [`Timeline::get_current_props`] is a pure function of that state and
/// the query time, so it can be called any number of times at any time.
#[derive(Clone, Debug)]
pub struct Timeline {
    initial: Props,
    segments: Vec<Segment>,
    snapshot: Option<Props>,
    sticky: SegmentOptions,
    first_invoked_time: f64,
    warned: WarningLatch,
}

impl Timeline {
    /// Create a timeline whose clock origin is `first_invoked_time` (ms).
    pub fn new(initial: Props, first_invoked_time: f64) -> Self {
        Self {
            initial,
            segments: Vec::new(),
            snapshot: None,
            sticky: SegmentOptions::default(),
            first_invoked_time,
            warned: WarningLatch::default(),
        }
    }

    /// Append a segment moving the numeric entries of `target` toward their values.
    ///
    /// `options` are layered over any sticky options from [`Timeline::with_options`].
    pub fn animate_to(&mut self, target: impl Into<Props>, options: SegmentOptions) -> &mut Self {
        let options = options.merged_over(&self.sticky);
        self.segments.push(Segment {
            target: target.into(),
            options,
        });
        self
    }

    /// Set defaults for every later [`Timeline::animate_to`] in this declaration pass.
    ///
    /// Calls stack; later fields override earlier ones.
    pub fn with_options(&mut self, options: SegmentOptions) -> &mut Self {
        self.sticky = options.merged_over(&self.sticky);
        self
    }

    /// Resolve every property at absolute time `time_ms`.
    pub fn get_current_props(&self, time_ms: f64) -> Props {
        let relative = time_ms - self.first_invoked_time;
        Resolver::new(&self.initial, self.snapshot.as_ref(), &self.segments, self.entries())
            .resolve(relative)
    }

    /// Replace the base props.
    pub fn update_initial_props(&mut self, props: Props) {
        self.initial = props;
    }

    /// Record the values at `time_ms` so a rebuilt segment list starts from them.
    pub fn capture_current_props(&mut self, time_ms: f64) {
        self.snapshot = Some(self.get_current_props(time_ms));
    }

    /// Drop all declared segments and the sticky options of this declaration pass.
    pub fn clear_segments(&mut self) {
        self.segments.clear();
        self.sticky = SegmentOptions::default();
    }

    /// Full reinitialisation: segments, sticky options, and snapshot are dropped.
    ///
    /// Warning latches survive so advisories stay once-per-instance.
    pub fn reset(&mut self) {
        self.clear_segments();
        self.clear_snapshot();
    }

    /// Forget the snapshot and fall back to the base props.
    pub fn clear_snapshot(&mut self) {
        self.snapshot = None;
    }

    /// Check the declared segments for suspicious timing.
    ///
    /// Never fails. Each warning kind is logged and returned at most once over the lifetime of
    /// this timeline; later calls return only kinds not reported before.
    pub fn validate(&mut self) -> Vec<TimelineWarning> {
        let mut emitted = Vec::new();

        if !self.warned.mixed_delay_with_at && self.has_mixed_delay_with_at() {
            self.warned.mixed_delay_with_at = true;
            emitted.push(TimelineWarning::MixedDelayWithAt);
        }
        if !self.warned.missing_duration && self.has_missing_duration() {
            self.warned.missing_duration = true;
            emitted.push(TimelineWarning::MissingDuration);
        }
        if !self.warned.invalid_time_expression && self.has_invalid_time_expression() {
            self.warned.invalid_time_expression = true;
            emitted.push(TimelineWarning::InvalidTimeExpression);
        }

        for warning in &emitted {
            tracing::warn!(kind = ?warning, "{}", warning.message());
        }
        emitted
    }

    fn has_mixed_delay_with_at(&self) -> bool {
        if self.sticky.delay.is_some() {
            return false;
        }
        let timed = self
            .segments
            .iter()
            .filter(|s| matches!(s.options.at, Some(StartAt::Time(_))));
        let (mut with_delay, mut without_delay) = (0usize, 0usize);
        for seg in timed {
            if seg.options.delay.is_some() {
                with_delay += 1;
            } else {
                without_delay += 1;
            }
        }
        with_delay > 0 && without_delay > 0
    }

    fn has_missing_duration(&self) -> bool {
        self.sticky.duration.is_none()
            && self
                .segments
                .iter()
                .any(|s| s.options.duration.is_none() && s.options.end_time.is_none())
    }

    fn has_invalid_time_expression(&self) -> bool {
        self.segments.iter().any(|s| {
            let o = &s.options;
            let at = match &o.at {
                Some(StartAt::Time(at)) => Some(at),
                _ => None,
            };
            at.into_iter()
                .chain(o.duration.as_ref())
                .chain(o.end_time.as_ref())
                .chain(o.delay.as_ref())
                .any(|tv| !tv.is_valid())
        })
    }

    /// Place every declared segment on the relative timeline, in declaration order.
    pub fn entries(&self) -> Vec<TimelineEntry> {
        let mut out: Vec<TimelineEntry> = Vec::with_capacity(self.segments.len());

        for (i, seg) in self.segments.iter().enumerate() {
            let o = &seg.options;
            let delay = o.delay.as_ref().map_or(0.0, TimeValue::to_ms);
            let explicit = o.duration.as_ref().map(TimeValue::to_ms);
            let end_time = o.end_time.as_ref().map(TimeValue::to_ms);

            let (start, duration) = match &o.at {
                Some(StartAt::Time(at)) => {
                    let at = at.to_ms();
                    let duration = explicit
                        .or(end_time.map(|end| end - at))
                        .unwrap_or(DEFAULT_DURATION_MS);
                    (Some(at + delay), duration)
                }
                Some(StartAt::Untriggered) => {
                    (None, explicit.or(end_time).unwrap_or(DEFAULT_DURATION_MS))
                }
                None => {
                    // Chained: an untriggered predecessor leaves this one untriggered too.
                    let start = match out.last() {
                        None => Some(delay),
                        Some(prev) => prev.end().map(|end| end + delay),
                    };
                    let duration = match (explicit, end_time, start) {
                        (Some(d), _, _) => d,
                        (None, Some(end), Some(s)) => end - s,
                        _ => DEFAULT_DURATION_MS,
                    };
                    (start, duration)
                }
            };

            out.push(TimelineEntry {
                segment: i,
                start,
                duration,
            });
        }

        out
    }

    /// Base props as last set by [`Timeline::new`] or [`Timeline::update_initial_props`].
    pub fn initial_props(&self) -> &Props {
        &self.initial
    }

    /// The captured snapshot, if any.
    pub fn snapshot(&self) -> Option<&Props> {
        self.snapshot.as_ref()
    }

    /// Clock origin in absolute milliseconds.
    pub fn first_invoked_time(&self) -> f64 {
        self.first_invoked_time
    }

    /// Number of segments declared in the current pass.
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/timeline.rs"]
mod tests;
