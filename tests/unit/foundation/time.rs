use super::*;

#[test]
fn clock_components_read_right_to_left() {
    assert_eq!(TimeExpr::parse("0:02").unwrap(), 2000.0);
    assert_eq!(TimeExpr::parse("2:00").unwrap(), 120_000.0);
    assert_eq!(TimeExpr::parse("1:00:05").unwrap(), 3_605_000.0);
    assert_eq!(TimeExpr::parse("7").unwrap(), 7000.0);
}

#[test]
fn fractional_seconds_are_accepted() {
    assert_eq!(TimeExpr::parse("0:01.5").unwrap(), 1500.0);
}

#[test]
fn malformed_expressions_are_rejected() {
    for bad in ["", "abc", "1:2:3:4", "1::2", "-1", "1.5:00", "0:0x", "0:01."] {
        assert!(TimeExpr::parse(bad).is_err(), "{bad:?} should fail");
    }
}

#[test]
fn permissive_conversion_falls_back_to_zero() {
    assert_eq!(TimeValue::from("nonsense").to_ms(), 0.0);
    assert_eq!(TimeValue::from("0:03").to_ms(), 3000.0);
    assert_eq!(TimeValue::from(250).to_ms(), 250.0);
    assert!(TimeValue::from("nonsense").try_to_ms().is_err());
    assert!(!TimeValue::from("nonsense").is_valid());
    assert!(TimeValue::from("1:00").is_valid());
}

#[test]
fn deserializes_from_number_or_string() {
    let v: TimeValue = serde_json::from_str("125.5").unwrap();
    assert_eq!(v, TimeValue::Ms(125.5));
    let v: TimeValue = serde_json::from_str("\"0:02\"").unwrap();
    assert_eq!(v.to_ms(), 2000.0);
}
