//! Tests for pudo-model types.

use pudo_model::columns::output;
use pudo_model::{Coordinate, DEFAULT_THRESHOLD_KM, JoinOptions, SourceRecord};

#[test]
fn default_threshold_is_900_5_km() {
    let options = JoinOptions::default();
    assert!((options.threshold_km - 900.5).abs() < f64::EPSILON);
    assert!((DEFAULT_THRESHOLD_KM - 900.5).abs() < f64::EPSILON);
}

#[test]
fn options_builder_overrides_threshold() {
    let options = JoinOptions::new().with_threshold_km(12.0);
    assert!((options.threshold_km - 12.0).abs() < f64::EPSILON);
}

#[test]
fn options_serialize_round_trip() {
    let options = JoinOptions::new().with_threshold_km(42.5);
    let json = serde_json::to_string(&options).expect("serialize options");
    assert_eq!(json, r#"{"threshold_km":42.5}"#);
    let round: JoinOptions = serde_json::from_str(&json).expect("deserialize options");
    assert_eq!(round, options);
}

#[test]
fn coordinate_rejects_non_finite() {
    assert!(Coordinate::try_new(f64::NAN, 0.0).is_none());
    assert!(Coordinate::try_new(0.0, f64::INFINITY).is_none());
    let point = Coordinate::try_new(-23.55, -46.63).expect("finite coordinate");
    assert_eq!(point.as_array(), [-23.55, -46.63]);
}

#[test]
fn source_record_starts_without_optional_fields() {
    let record = SourceRecord::new("X1", Coordinate::new(0.0, 0.0));
    assert_eq!(record.kyc_id, "X1");
    assert!(record.city.is_none());
    assert!(record.cnpj.is_none());
}

#[test]
fn output_columns_are_unique() {
    let mut names = output::ALL.to_vec();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), output::ALL.len());
}

#[test]
fn coordinate_displays_latitude_first() {
    assert_eq!(Coordinate::new(-23.5, -46.25).to_string(), "(-23.5, -46.25)");
    assert!(Coordinate::new(1.0, 2.0).is_finite());
}
