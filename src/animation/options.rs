use crate::{
    animation::ease::{Ease, Easing},
    foundation::time::TimeValue,
};

/// When a segment starts, if not chained after the previous one.
#[derive(Clone, Debug, PartialEq)]
pub enum StartAt {
    /// Absolute start, relative to the timeline's clock origin.
    Time(TimeValue),
    /// Not triggered yet. The segment contributes nothing until redeclared with a time.
    Untriggered,
}

/// Per-segment timing and shaping options.
///
/// Every field is optional so option sets can be layered: values set on a later layer win,
/// unset values fall through to the layer below (see [`SegmentOptions::merged_over`]).
#[derive(Clone, Debug, Default)]
pub struct SegmentOptions {
    /// Start mode; `None` chains after the previous segment.
    pub at: Option<StartAt>,
    /// Length of the transition.
    pub duration: Option<TimeValue>,
    /// Absolute end time, used to derive the duration when none is given.
    pub end_time: Option<TimeValue>,
    /// Offset added to the start time.
    pub delay: Option<TimeValue>,
    /// Progress remapping; linear when unset.
    pub easing: Option<Easing>,
    /// Play the progress curve backwards.
    pub reverse: Option<bool>,
}

impl SegmentOptions {
    /// Empty option set (sequential start, default duration).
    pub fn new() -> Self {
        Self::default()
    }

    /// Start at an absolute time.
    pub fn at(mut self, at: impl Into<TimeValue>) -> Self {
        self.at = Some(StartAt::Time(at.into()));
        self
    }

    /// Mark the segment as not yet triggered.
    pub fn untriggered(mut self) -> Self {
        self.at = Some(StartAt::Untriggered);
        self
    }

    /// Start at `at` if the triggering event has happened, otherwise stay untriggered.
    ///
    /// Typical for release segments: `.at_or_untriggered(note.released_at)`.
    pub fn at_or_untriggered<T: Into<TimeValue>>(self, at: Option<T>) -> Self {
        match at {
            Some(at) => self.at(at),
            None => self.untriggered(),
        }
    }

    /// Set the transition length.
    pub fn duration(mut self, duration: impl Into<TimeValue>) -> Self {
        self.duration = Some(duration.into());
        self
    }

    /// Set an absolute end time instead of a duration.
    pub fn end_time(mut self, end_time: impl Into<TimeValue>) -> Self {
        self.end_time = Some(end_time.into());
        self
    }

    /// Set the start offset.
    pub fn delay(mut self, delay: impl Into<TimeValue>) -> Self {
        self.delay = Some(delay.into());
        self
    }

    /// Set the progress curve.
    pub fn easing(mut self, easing: impl Into<Easing>) -> Self {
        self.easing = Some(easing.into());
        self
    }

    /// Play the curve backwards.
    pub fn reverse(mut self, reverse: bool) -> Self {
        self.reverse = Some(reverse);
        self
    }

    /// Layer `self` over `base`: fields set here win, unset ones come from `base`.
    pub fn merged_over(&self, base: &SegmentOptions) -> SegmentOptions {
        SegmentOptions {
            at: self.at.clone().or_else(|| base.at.clone()),
            duration: self.duration.clone().or_else(|| base.duration.clone()),
            end_time: self.end_time.clone().or_else(|| base.end_time.clone()),
            delay: self.delay.clone().or_else(|| base.delay.clone()),
            easing: self.easing.clone().or_else(|| base.easing.clone()),
            reverse: self.reverse.or(base.reverse),
        }
    }
}

/// Serializable mirror of [`SegmentOptions`] used by timeline scripts.
///
/// `at` distinguishes a missing key (sequential) from an explicit `null` (untriggered).
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SegmentOptionsDef {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "explicit_null"
    )]
    /// Missing: sequential. `null`: untriggered. Value: absolute start.
    pub at: Option<Option<TimeValue>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// See [`SegmentOptions::duration`].
    pub duration: Option<TimeValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// See [`SegmentOptions::end_time`].
    pub end_time: Option<TimeValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// See [`SegmentOptions::delay`].
    pub delay: Option<TimeValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Preset name; custom curves cannot be expressed in scripts.
    pub easing: Option<Ease>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// See [`SegmentOptions::reverse`].
    pub reverse: Option<bool>,
}

impl SegmentOptionsDef {
    /// Every time value this definition carries.
    pub fn time_values(&self) -> impl Iterator<Item = &TimeValue> {
        self.at
            .iter()
            .flatten()
            .chain(self.duration.iter())
            .chain(self.end_time.iter())
            .chain(self.delay.iter())
    }
}

impl From<SegmentOptionsDef> for SegmentOptions {
    fn from(def: SegmentOptionsDef) -> Self {
        SegmentOptions {
            at: def.at.map(|at| match at {
                Some(t) => StartAt::Time(t),
                None => StartAt::Untriggered,
            }),
            duration: def.duration,
            end_time: def.end_time,
            delay: def.delay,
            easing: def.easing.map(Easing::Preset),
            reverse: def.reverse,
        }
    }
}

mod explicit_null {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use crate::foundation::time::TimeValue;

    pub(super) fn serialize<S: Serializer>(
        v: &Option<Option<TimeValue>>,
        s: S,
    ) -> Result<S::Ok, S::Error> {
        match v {
            Some(inner) => inner.serialize(s),
            None => s.serialize_none(),
        }
    }

    // Only called when the key is present, so a JSON `null` lands as `Some(None)`.
    pub(super) fn deserialize<'de, D: Deserializer<'de>>(
        d: D,
    ) -> Result<Option<Option<TimeValue>>, D::Error> {
        Option::<TimeValue>::deserialize(d).map(Some)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/options.rs"]
mod tests;
