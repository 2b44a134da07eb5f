use super::*;

#[test]
fn numbers_skip_text_entries() {
    let p = Props::new()
        .with("x", 10.0)
        .with("fill", "#ff0066")
        .with("radius", 4);
    let nums: Vec<_> = p.numbers().collect();
    assert_eq!(nums, vec![("radius", 4.0), ("x", 10.0)]);
    assert_eq!(p.text("fill"), Some("#ff0066"));
    assert_eq!(p.number("fill"), None);
    assert!(p.contains("fill"));
    assert!(!p.contains("stroke"));
}

#[test]
fn merge_overrides_existing_keys() {
    let mut base = Props::from([("x", 1.0), ("y", 2.0)]);
    base.merge_from(&Props::from([("y", 5.0), ("z", 9.0)]));
    assert_eq!(base.number("x"), Some(1.0));
    assert_eq!(base.number("y"), Some(5.0));
    assert_eq!(base.number("z"), Some(9.0));
    assert_eq!(base.len(), 3);
}

#[test]
fn json_shape_is_a_flat_object() {
    let p: Props = serde_json::from_str(r##"{"x": 3, "stroke": "#000"}"##).unwrap();
    assert_eq!(p.number("x"), Some(3.0));
    assert_eq!(p.text("stroke"), Some("#000"));
    let back = serde_json::to_value(&p).unwrap();
    assert_eq!(back["x"], serde_json::json!(3.0));
}
