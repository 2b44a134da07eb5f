use std::{cell::RefCell, rc::Rc};

use super::*;
use crate::animation::options::SegmentOptions;

fn radius(p: &Props) -> f64 {
    p.number("radius").unwrap()
}

#[test]
fn identity_follows_call_order() {
    let mut reg: Registry = Registry::new();
    reg.begin_frame(0.0);
    reg.get_or_create([("radius", 1.0)], 0.0);
    reg.get_or_create([("radius", 2.0)], 0.0);
    reg.end_frame();
    assert_eq!(reg.len(), 2);
    assert_eq!(SlotId(1).to_string(), "1");

    reg.begin_frame(16.0);
    let a = reg.get_or_create([("radius", 10.0)], 16.0);
    assert_eq!(a.first_invoked_time(), 0.0);
    assert_eq!(a.initial_props().number("radius"), Some(10.0));
    reg.end_frame();
    assert_eq!(reg.len(), 1);
    assert!(reg.contains(SlotId(0)));
    assert!(!reg.contains(SlotId(1)));
}

#[test]
fn repeat_request_snapshots_then_clears() {
    let mut reg: Registry = Registry::new();
    reg.begin_frame(0.0);
    reg.get_or_create([("radius", 50.0)], 0.0)
        .animate_to([("radius", 100.0)], SegmentOptions::new().at(0).duration(1000));
    reg.end_frame();

    reg.begin_frame(500.0);
    let tl = reg.get_or_create([("radius", 50.0)], 500.0);
    assert_eq!(tl.segment_count(), 0);
    assert_eq!(tl.snapshot().map(radius), Some(75.0));
    reg.end_frame();
}

#[test]
fn continuity_survives_identical_rebuild() {
    let mut reg: Registry = Registry::new();
    let declare = |reg: &mut Registry, t: f64| {
        reg.begin_frame(t);
        reg.get_or_create([("radius", 50.0)], t)
            .animate_to([("radius", 75.0)], SegmentOptions::new().at(0).duration(300))
            .animate_to([("radius", 50.0)], SegmentOptions::new().untriggered().duration(300));
    };

    declare(&mut reg, 0.0);
    let before = reg.get(SlotId(0)).unwrap().get_current_props(500.0);
    assert_eq!(radius(&before), 75.0);
    reg.end_frame();

    declare(&mut reg, 500.0);
    let after = reg.get(SlotId(0)).unwrap().get_current_props(500.0);
    assert_eq!(radius(&after), 75.0);
    reg.end_frame();
}

#[test]
fn evicted_identity_comes_back_fresh() {
    let mut reg: Registry = Registry::new();
    reg.begin_frame(0.0);
    reg.get_or_create([("radius", 5.0)], 0.0)
        .animate_to([("radius", 9.0)], SegmentOptions::new().duration(100));
    reg.end_frame();

    reg.begin_frame(100.0);
    reg.end_frame();
    assert!(reg.is_empty());

    reg.begin_frame(200.0);
    let tl = reg.get_or_create([("radius", 5.0)], 200.0);
    assert_eq!(tl.first_invoked_time(), 200.0);
    assert!(tl.snapshot().is_none());
    assert_eq!(tl.get_current_props(10_000.0).number("radius"), Some(5.0));
}

#[test]
fn flush_renders_in_queue_order_with_frame_time() {
    let mut reg: Registry<Vec<(u32, f64)>> = Registry::new();
    reg.begin_frame(250.0);
    assert_eq!(reg.frame_time(), 250.0);
    for i in 0..4u32 {
        reg.queue([("radius", f64::from(i))], move |p, out| {
            out.push((i, radius(p)));
        })
        .animate_to([("radius", 100.0)], SegmentOptions::new().at(0).duration(0));
    }
    assert_eq!(reg.pending_count(), 4);

    let mut drawn = Vec::new();
    reg.flush(&mut drawn);
    assert_eq!(
        drawn,
        vec![(0, 100.0), (1, 100.0), (2, 100.0), (3, 100.0)]
    );
    assert_eq!(reg.pending_count(), 0);

    reg.flush(&mut drawn);
    assert_eq!(drawn.len(), 4);
}

#[test]
fn flush_validates_before_render() {
    let rendered = Rc::new(RefCell::new(Vec::new()));
    let mut reg: Registry<()> = Registry::new();
    reg.begin_frame(0.0);
    let seen = Rc::clone(&rendered);
    reg.queue([("x", 0.0)], move |p, _| {
        seen.borrow_mut().push(p.number("x"));
    })
    .animate_to([("x", 1.0)], SegmentOptions::new());
    reg.flush(&mut ());

    assert_eq!(*rendered.borrow(), vec![Some(0.0)]);
    // The missing-duration advisory was latched during flush.
    let mut tl = reg.get(SlotId(0)).unwrap().clone();
    assert!(tl.validate().is_empty());
}

#[test]
fn queue_and_get_or_create_share_slot_numbering() {
    let mut reg: Registry = Registry::new();
    reg.begin_frame(0.0);
    reg.get_or_create([("a", 1.0)], 0.0);
    reg.queue([("b", 2.0)], |_, _| {});
    reg.get_or_create([("c", 3.0)], 0.0);
    let slots: Vec<_> = (0..3)
        .map(|i| {
            reg.get(SlotId(i))
                .and_then(|t| t.initial_props().iter().next().map(|(k, _)| k.to_owned()))
        })
        .collect();
    assert_eq!(
        slots,
        vec![Some("a".to_owned()), Some("b".to_owned()), Some("c".to_owned())]
    );
}

#[test]
fn shifted_call_order_reassigns_identity() {
    let mut reg: Registry = Registry::new();
    reg.begin_frame(0.0);
    reg.get_or_create([("id", 1.0)], 0.0);
    reg.get_or_create([("id", 2.0)], 0.0);
    reg.end_frame();

    // The first object is skipped this frame; the second now lands in slot 0.
    reg.begin_frame(16.0);
    let tl = reg.get_or_create([("id", 2.0)], 16.0);
    assert_eq!(tl.snapshot().and_then(|s| s.number("id")), Some(1.0));
    reg.end_frame();
    assert_eq!(reg.len(), 1);
}

#[test]
fn begin_frame_drops_unflushed_renders() {
    let mut reg: Registry = Registry::new();
    reg.begin_frame(0.0);
    reg.queue([("x", 0.0)], |_, _| panic!("should not render"));
    reg.begin_frame(16.0);
    assert_eq!(reg.pending_count(), 0);
    reg.flush(&mut ());
}

#[test]
fn clear_forgets_everything() {
    let mut reg: Registry = Registry::new();
    reg.begin_frame(0.0);
    reg.queue([("x", 0.0)], |_, _| {});
    reg.get_or_create([("x", 0.0)], 0.0);
    reg.clear();
    assert!(reg.is_empty());
    assert_eq!(reg.pending_count(), 0);

    let tl = reg.get_or_create([("x", 0.0)], 42.0);
    assert_eq!(tl.first_invoked_time(), 42.0);
}

#[test]
fn registries_are_independent() {
    let mut a: Registry = Registry::new();
    let mut b: Registry = Registry::new();
    a.begin_frame(0.0);
    b.begin_frame(0.0);
    a.get_or_create([("x", 0.0)], 0.0);
    a.end_frame();
    b.end_frame();
    assert_eq!((a.len(), b.len()), (1, 0));
}
