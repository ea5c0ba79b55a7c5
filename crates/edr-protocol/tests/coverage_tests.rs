//! Tests for trajectory CoverageJSON decoding.

use edr_protocol::{AxisValue, CoverageCollection, DomainType, EdrError};
use test_utils::covjson::{TRAJECTORY, TRAJECTORY_WITH_NULL};
use test_utils::trajectory_collection;

fn coord<'a>(coords: &'a [(String, AxisValue)], axis: &str) -> Option<&'a AxisValue> {
    coords.iter().find(|(name, _)| name == axis).map(|(_, v)| v)
}

#[test]
fn test_decode_trajectory_collection() {
    let collection = CoverageCollection::from_json_str(TRAJECTORY).unwrap();
    assert_eq!(collection.domain_type, Some(DomainType::Trajectory));
    assert_eq!(collection.coverages.len(), 2);
    assert_eq!(collection.parameter_names(), vec!["Temperature".to_string()]);
    assert_eq!(
        collection.parameters["Temperature"]
            .unit
            .as_ref()
            .and_then(|u| u.symbol.as_ref())
            .map(|s| s.value()),
        Some("C")
    );
}

#[test]
fn test_composite_points_carry_every_axis() {
    let collection = CoverageCollection::from_json_str(TRAJECTORY).unwrap();
    let points = collection.composite_points("Temperature").unwrap();
    assert_eq!(points.len(), 6);

    let first = &points[0];
    assert_eq!(first.value, Some(30.0));
    let names: Vec<&str> = first.coords.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(names, vec!["t", "x", "y", "z"]);
    assert_eq!(coord(&first.coords, "x"), Some(&AxisValue::Float(9.0)));
    assert_eq!(coord(&first.coords, "z"), Some(&AxisValue::Float(850.0)));
    assert_eq!(
        coord(&first.coords, "t"),
        Some(&AxisValue::String("2024-12-29T12:00:00Z".to_string()))
    );

    // Second coverage follows the first
    assert_eq!(points[3].value, Some(1.0));
    assert_eq!(coord(&points[3].coords, "z"), Some(&AxisValue::Float(500.0)));
}

#[test]
fn test_null_values_are_kept() {
    let collection = CoverageCollection::from_json_str(TRAJECTORY_WITH_NULL).unwrap();
    let values: Vec<Option<f64>> = collection
        .composite_points("Temperature")
        .unwrap()
        .iter()
        .map(|p| p.value)
        .collect();
    assert_eq!(values, vec![Some(1.5), None, Some(3.5)]);
}

#[test]
fn test_unknown_parameter() {
    let collection = CoverageCollection::from_json_str(TRAJECTORY).unwrap();
    let err = collection.composite_points("Pressure").unwrap_err();
    assert!(matches!(err, EdrError::ParameterNotFound(ref p) if p == "Pressure"));
    assert_eq!(err.status_code(), 404);
}

#[test]
fn test_generated_collection() {
    let doc = trajectory_collection("WindSpeed", &[1.0, 2.0, 3.0], &[1000.0, 500.0], |x, z| {
        if x == 2.0 && z == 500.0 {
            None
        } else {
            Some(x + z)
        }
    });
    let collection = CoverageCollection::from_json_str(&doc).unwrap();
    let points = collection.composite_points("WindSpeed").unwrap();
    assert_eq!(points.len(), 6);
    assert_eq!(points.iter().filter(|p| p.value.is_none()).count(), 1);
    assert_eq!(points[0].value, Some(1001.0));
}

#[test]
fn test_invalid_documents() {
    assert!(matches!(
        CoverageCollection::from_json_str("{"),
        Err(EdrError::InvalidResponse(_))
    ));
    assert!(CoverageCollection::from_json_str(r#"{"coverages": []}"#).is_err());
}
