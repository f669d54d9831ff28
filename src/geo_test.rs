#![allow(clippy::float_cmp)]

use super::*;

#[test]
fn coordinate_deserializes_lookup_body() {
    let c: Coordinate = serde_json::from_str(r#"{"lat":60.05,"lng":10.15}"#).unwrap();
    assert_eq!(c, Coordinate::new(60.05, 10.15));
}

#[test]
fn coordinate_ignores_extra_fields() {
    let c: Coordinate = serde_json::from_str(r#"{"lat":1.5,"lng":2.5,"alt":300}"#).unwrap();
    assert_eq!(c.lat, 1.5);
    assert_eq!(c.lng, 2.5);
}

#[test]
fn coordinate_requires_both_fields() {
    assert!(serde_json::from_str::<Coordinate>(r#"{"lat":1.0}"#).is_err());
}

#[test]
fn coordinate_finite_check() {
    assert!(Coordinate::new(60.0, 10.0).is_finite());
    assert!(!Coordinate::new(f64::NAN, 10.0).is_finite());
    assert!(!Coordinate::new(60.0, f64::INFINITY).is_finite());
}

#[test]
fn pixel_offset_uses_camel_case_on_the_wire() {
    let json = serde_json::to_value(PixelOffset::new(50, 30)).unwrap();
    assert_eq!(json, serde_json::json!({ "offsetX": 50, "offsetY": 30 }));
}
