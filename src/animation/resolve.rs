//! Per-property value resolution over a set of placed segments.
//!
//! Ownership rule: for a key and a query time, the segment touching that key with the latest
//! start that has already begun owns the value. An in-progress owner interpolates from the value
//! the key had the instant it took over, which is itself resolved with the owner excluded.

use std::collections::BTreeSet;

use crate::animation::{
    props::Props,
    timeline::{Segment, TimelineEntry, default_base_value},
};

#[derive(Clone, Copy, Debug)]
struct Active {
    segment: usize,
    start: f64,
    duration: f64,
}

pub(crate) struct Resolver<'a> {
    initial: &'a Props,
    snapshot: Option<&'a Props>,
    segments: &'a [Segment],
    active: Vec<Active>,
}

impl<'a> Resolver<'a> {
    pub(crate) fn new(
        initial: &'a Props,
        snapshot: Option<&'a Props>,
        segments: &'a [Segment],
        entries: Vec<TimelineEntry>,
    ) -> Self {
        let mut active: Vec<Active> = entries
            .into_iter()
            .filter_map(|e| {
                e.start.map(|start| Active {
                    segment: e.segment,
                    start,
                    duration: e.duration,
                })
            })
            .collect();
        // Stable: equal starts keep declaration order, so the later declaration wins ties.
        active.sort_by(|a, b| a.start.total_cmp(&b.start));

        Self {
            initial,
            snapshot,
            segments,
            active,
        }
    }

    pub(crate) fn resolve(&self, t: f64) -> Props {
        let mut out = self.initial.clone();
        if let Some(snapshot) = self.snapshot {
            out.merge_from(snapshot);
        }

        let keys: BTreeSet<&str> = self
            .segments
            .iter()
            .flat_map(|s| s.target.numbers().map(|(k, _)| k))
            .collect();

        for key in keys {
            let touching: Vec<Active> = self
                .active
                .iter()
                .copied()
                .filter(|a| self.target(a, key).is_some())
                .collect();
            out.set(key, self.value_at(key, &touching, t, false));
        }

        out
    }

    /// Value of `key` at `t` considering only `touching`, which is sorted by start.
    ///
    /// `later_exists` is set when segments touching `key` were excluded from `touching` but
    /// still start after everything in it.
    fn value_at(&self, key: &str, touching: &[Active], t: f64, later_exists: bool) -> f64 {
        let Some(idx) = touching.iter().rposition(|a| a.start <= t) else {
            return self.base_value(key);
        };
        let owner = touching[idx];
        let target = self.target(&owner, key).unwrap_or_else(|| self.base_value(key));

        if t >= owner.start + owner.duration {
            return target;
        }

        let raw = if owner.duration <= 0.0 {
            1.0
        } else {
            ((t - owner.start) / owner.duration).clamp(0.0, 1.0)
        };
        let options = &self.segments[owner.segment].options;
        let mut progress = options.easing.as_ref().map_or(raw, |e| e.apply(raw));
        if options.reverse.unwrap_or(false) {
            progress = 1.0 - progress;
        }

        let is_final = !later_exists && idx + 1 == touching.len();
        let start_value = match self.snapshot.and_then(|s| s.number(key)) {
            Some(captured) if is_final => captured,
            _ => self.value_at(
                key,
                &touching[..idx],
                owner.start,
                later_exists || idx + 1 < touching.len(),
            ),
        };

        start_value + (target - start_value) * progress
    }

    fn target(&self, active: &Active, key: &str) -> Option<f64> {
        self.segments[active.segment].target.number(key)
    }

    fn base_value(&self, key: &str) -> f64 {
        self.snapshot
            .and_then(|s| s.number(key))
            .or_else(|| self.initial.number(key))
            .unwrap_or_else(|| default_base_value(key))
    }
}
