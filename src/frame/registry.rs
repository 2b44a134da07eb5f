use std::{
    collections::{HashMap, HashSet, hash_map::Entry},
    fmt,
};

use crate::animation::{props::Props, timeline::Timeline};

/// Positional identity of a timeline within one frame's declaration order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SlotId(pub u32);

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

type RenderFn<C> = Box<dyn FnOnce(&Props, &mut C)>;

struct Pending<C> {
    slot: SlotId,
    render: RenderFn<C>,
}

/// Immediate-mode owner of per-object timelines.
///
/// Each call to [`Registry::get_or_create`] or [`Registry::queue`] claims the next slot in the
/// frame, so the n-th call of a frame always refers to the same timeline as the n-th call of the
/// previous frame. Callers must therefore declare objects in a stable order: a conditional that
/// skips a call shifts every later object onto its neighbour's timeline. Slots not claimed
/// during a frame are evicted by [`Registry::end_frame`].
///
/// `C` is the context handed to deferred render callbacks at [`Registry::flush`], typically the
/// drawing surface.
pub struct Registry<C = ()> {
    timelines: HashMap<SlotId, Timeline>,
    seen: HashSet<SlotId>,
    pending: Vec<Pending<C>>,
    next_slot: u32,
    frame_time: f64,
}

impl<C> Default for Registry<C> {
    fn default() -> Self {
        Self {
            timelines: HashMap::new(),
            seen: HashSet::new(),
            pending: Vec::new(),
            next_slot: 0,
            frame_time: 0.0,
        }
    }
}

impl<C> Registry<C> {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a frame at `time_ms`: slot numbering restarts and the render queue is emptied.
    pub fn begin_frame(&mut self, time_ms: f64) {
        self.next_slot = 0;
        self.seen.clear();
        if !self.pending.is_empty() {
            tracing::debug!(
                dropped = self.pending.len(),
                "frame began with unflushed renders"
            );
        }
        self.pending.clear();
        self.frame_time = time_ms;
    }

    /// Claim the next slot and return its timeline, ready for fresh segment declarations.
    ///
    /// A timeline seen in an earlier frame first snapshots its value at `time_ms`, then takes
    /// `props` as its new base and drops its segments. A new slot gets a timeline whose clock
    /// origin is `time_ms`.
    pub fn get_or_create(&mut self, props: impl Into<Props>, time_ms: f64) -> &mut Timeline {
        let slot = SlotId(self.next_slot);
        self.next_slot += 1;
        self.seen.insert(slot);

        let props = props.into();
        match self.timelines.entry(slot) {
            Entry::Occupied(e) => {
                let timeline = e.into_mut();
                timeline.capture_current_props(time_ms);
                timeline.update_initial_props(props);
                timeline.clear_segments();
                timeline
            }
            Entry::Vacant(e) => {
                tracing::trace!(%slot, time_ms, "timeline created");
                e.insert(Timeline::new(props, time_ms))
            }
        }
    }

    /// Like [`Registry::get_or_create`] at the frame time, deferring `render` to
    /// [`Registry::flush`].
    ///
    /// The returned timeline can still receive segments; `render` sees the props resolved after
    /// all declarations of the frame.
    pub fn queue<F>(&mut self, props: impl Into<Props>, render: F) -> &mut Timeline
    where
        F: FnOnce(&Props, &mut C) + 'static,
    {
        let slot = SlotId(self.next_slot);
        self.pending.push(Pending {
            slot,
            render: Box::new(render),
        });
        let time_ms = self.frame_time;
        self.get_or_create(props, time_ms)
    }

    /// Validate and render every queued entry in the order it was queued.
    ///
    /// The queue is emptied, so a second call without new entries does nothing.
    pub fn flush(&mut self, ctx: &mut C) {
        let pending = std::mem::take(&mut self.pending);
        if pending.is_empty() {
            return;
        }
        tracing::trace!(count = pending.len(), "flushing queued renders");

        let time_ms = self.frame_time;
        for Pending { slot, render } in pending {
            let Some(timeline) = self.timelines.get_mut(&slot) else {
                continue;
            };
            timeline.validate();
            let props = timeline.get_current_props(time_ms);
            render(&props, ctx);
        }
    }

    /// Evict every timeline whose slot was not claimed during this frame.
    pub fn end_frame(&mut self) {
        let before = self.timelines.len();
        let seen = &self.seen;
        self.timelines.retain(|slot, _| seen.contains(slot));
        let evicted = before - self.timelines.len();
        if evicted > 0 {
            tracing::debug!(evicted, remaining = self.timelines.len(), "evicted timelines");
        }
    }

    /// Drop all timelines, slots and queued renders.
    pub fn clear(&mut self) {
        self.timelines.clear();
        self.seen.clear();
        self.pending.clear();
        self.next_slot = 0;
    }

    /// Number of live timelines.
    pub fn len(&self) -> usize {
        self.timelines.len()
    }

    /// Whether no timelines are live.
    pub fn is_empty(&self) -> bool {
        self.timelines.is_empty()
    }

    /// Number of renders waiting for [`Registry::flush`].
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Whether `slot` currently has a timeline.
    pub fn contains(&self, slot: SlotId) -> bool {
        self.timelines.contains_key(&slot)
    }

    /// Timeline registered under `slot`.
    pub fn get(&self, slot: SlotId) -> Option<&Timeline> {
        self.timelines.get(&slot)
    }

    /// Time passed to the last [`Registry::begin_frame`].
    pub fn frame_time(&self) -> f64 {
        self.frame_time
    }
}

impl<C> fmt::Debug for Registry<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("timelines", &self.timelines.len())
            .field("pending", &self.pending.len())
            .field("next_slot", &self.next_slot)
            .field("frame_time", &self.frame_time)
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/frame/registry.rs"]
mod tests;
