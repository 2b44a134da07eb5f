use super::*;

const ALL: [Ease; 9] = [
    Ease::Linear,
    Ease::InQuad,
    Ease::OutQuad,
    Ease::InOutQuad,
    Ease::InCubic,
    Ease::OutCubic,
    Ease::InOutCubic,
    Ease::InOutSine,
    Ease::OutBack,
];

#[test]
fn endpoints_are_stable() {
    for ease in ALL {
        assert!(ease.apply(0.0).abs() < 1e-12, "{ease:?} at 0");
        assert!((ease.apply(1.0) - 1.0).abs() < 1e-12, "{ease:?} at 1");
    }
}

#[test]
fn monotonic_spot_check() {
    for ease in ALL.into_iter().filter(|e| *e != Ease::OutBack) {
        let a = ease.apply(0.25);
        let b = ease.apply(0.5);
        let c = ease.apply(0.75);
        assert!(a < b);
        assert!(b < c);
    }
}

#[test]
fn out_back_overshoots() {
    assert!(Ease::OutBack.apply(0.8) > 1.0);
}

#[test]
fn custom_curve_is_not_clamped() {
    let e = Easing::custom(|t| t * 2.0);
    assert_eq!(e.apply(0.75), 1.5);
    assert!(e.preset().is_none());
    assert_eq!(Easing::from(Ease::InQuad).apply(0.5), 0.25);
}

#[test]
fn presets_use_camel_case_names() {
    let e: Ease = serde_json::from_str("\"inOutQuad\"").unwrap();
    assert_eq!(e, Ease::InOutQuad);
}
