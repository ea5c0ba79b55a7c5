//! Tests for trajectory WKT handling and query construction.

use edr_protocol::{CoordinateParseError, LineStringType, TrajectoryQuery};
use test_utils::paths::{DEFAULT_PATH, PATH_Z, SHORT_PATH};

// ============================================================================
// Parsing
// ============================================================================

#[test]
fn test_default_path_keeps_duplicate_waypoint() {
    let query = TrajectoryQuery::from_wkt(DEFAULT_PATH).unwrap();
    assert_eq!(query.len(), 17);
    assert_eq!(query.waypoints[5], query.waypoints[6]);
    assert_eq!(query.waypoints[0].lon, 7.0);
    assert_eq!(query.waypoints[16].lon, 22.0);
    assert!(query.waypoints.iter().all(|w| w.lat == 66.2));
}

#[test]
fn test_path_with_heights() {
    let query = TrajectoryQuery::from_wkt(PATH_Z).unwrap();
    assert_eq!(query.line_type, LineStringType::LineStringZ);
    assert_eq!(query.waypoints[1].z, Some(850.0));
}

#[test]
fn test_out_of_range_waypoint() {
    let err = TrajectoryQuery::from_wkt("LINESTRING(7 66.2,200 66.2)").unwrap_err();
    assert!(matches!(err, CoordinateParseError::OutOfRange(_)));
}

// ============================================================================
// Encoding
// ============================================================================

#[test]
fn test_wkt_round_trip() {
    for wkt in [DEFAULT_PATH, SHORT_PATH, PATH_Z] {
        let query = TrajectoryQuery::from_wkt(wkt).unwrap();
        assert_eq!(query.to_wkt(), wkt);
    }
}

#[test]
fn test_translate_path() {
    let query = TrajectoryQuery::from_wkt(SHORT_PATH).unwrap();
    let moved = query.translated(1.0, -1.0).unwrap();
    let lons: Vec<f64> = moved.waypoints.iter().map(|w| w.lon).collect();
    assert_eq!(lons, vec![8.0, 9.0, 10.0]);
    for wp in &moved.waypoints {
        assert!((wp.lat - 65.2).abs() < 1e-9);
    }
    // Source query untouched
    assert_eq!(query.waypoints[0].lon, 7.0);

    let back = moved.translated(-1.0, 1.0).unwrap();
    for (a, b) in back.waypoints.iter().zip(&query.waypoints) {
        assert!((a.lon - b.lon).abs() < 1e-9);
        assert!((a.lat - b.lat).abs() < 1e-9);
    }
}

#[test]
fn test_query_pairs() {
    let query = TrajectoryQuery::from_wkt(SHORT_PATH)
        .unwrap()
        .with_parameter("Temperature")
        .with_datetime("2024-12-29T12:00:00Z")
        .with_levels(vec![300.0, 500.0, 850.0, 1000.0]);

    let pairs = query.to_query_pairs();
    let pairs: Vec<(&str, &str)> = pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();

    assert_eq!(
        pairs,
        vec![
            ("parameter-name", "Temperature"),
            ("datetime", "2024-12-29T12:00:00Z"),
            ("crs", "CRS:84"),
            ("coords", SHORT_PATH),
            ("z", "300,500,850,1000"),
            ("f", "CoverageJSON"),
        ]
    );
}

#[test]
fn test_query_pairs_minimal() {
    let query = TrajectoryQuery::from_wkt(SHORT_PATH).unwrap();
    let keys: Vec<String> = query.to_query_pairs().into_iter().map(|(k, _)| k).collect();
    assert_eq!(keys, vec!["crs", "coords", "f"]);
}
