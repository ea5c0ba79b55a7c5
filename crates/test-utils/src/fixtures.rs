//! Common test fixtures for cross-section tests.
//!
//! This module provides pre-defined payloads that mirror what an EDR
//! service returns for the queries the workspace performs.

/// Path definitions as WKT strings.
pub mod paths {
    /// East-west path at 66.2°N used as the viewer's initial path.
    pub const DEFAULT_PATH: &str = "LINESTRING(7 66.2,8 66.2,9 66.2,10 66.2,11 66.2,12 66.2,12 66.2,13 66.2,14 66.2,15 66.2,16 66.2,17 66.2,18 66.2,19 66.2,20 66.2,21 66.2,22 66.2)";

    /// Three-point path matching [`super::covjson::TRAJECTORY`].
    pub const SHORT_PATH: &str = "LINESTRING(7 66.2,8 66.2,9 66.2)";

    /// Path with embedded heights.
    pub const PATH_Z: &str = "LINESTRINGZ(7 66.2 850,8 66.2 850)";
}

/// EDR metadata payloads.
pub mod edr {
    /// Instance list with two model runs; the newer one sorts last here.
    pub const INSTANCES: &str = r#"{
        "links": [],
        "instances": [
            {
                "id": "20241229T000000",
                "links": [],
                "extent": {
                    "temporal": {
                        "interval": [["2024-12-29T00:00:00Z", "2025-01-08T00:00:00Z"]],
                        "trs": "Gregorian"
                    },
                    "vertical": {
                        "interval": [["300", "1000"]],
                        "values": ["300", "500", "850", "1000"],
                        "vrs": "pressure"
                    }
                },
                "parameter_names": {
                    "Temperature": {
                        "type": "Parameter",
                        "observedProperty": { "label": "Temperature" }
                    }
                }
            },
            {
                "id": "20241229T120000",
                "links": [],
                "extent": {
                    "temporal": {
                        "interval": [["2024-12-29T12:00:00Z", "2025-01-08T12:00:00Z"]],
                        "trs": "Gregorian"
                    },
                    "vertical": {
                        "interval": [[300, 1000]],
                        "values": [300, 500, 850, 1000],
                        "vrs": "pressure"
                    }
                },
                "parameter_names": {
                    "Temperature": {
                        "type": "Parameter",
                        "observedProperty": { "label": "Temperature" }
                    },
                    "Humidity": {
                        "type": "Parameter",
                        "observedProperty": { "label": "Relative humidity" }
                    }
                }
            }
        ]
    }"#;
}

/// CoverageJSON trajectory payloads.
pub mod covjson {
    /// Two coverages (one per level, higher level first) of three positions
    /// each. Sorted by level then position the values read 1, 2, 3, 10, 20, 30.
    pub const TRAJECTORY: &str = r#"{
        "type": "CoverageCollection",
        "domainType": "Trajectory",
        "parameters": {
            "Temperature": {
                "type": "Parameter",
                "observedProperty": { "label": "Temperature" },
                "unit": { "symbol": "C" }
            }
        },
        "coverages": [
            {
                "type": "Coverage",
                "domain": {
                    "type": "Domain",
                    "domainType": "Trajectory",
                    "axes": {
                        "composite": {
                            "dataType": "tuple",
                            "coordinates": ["t", "x", "y", "z"],
                            "values": [
                                ["2024-12-29T12:00:00Z", 9, 66.2, 850],
                                ["2024-12-29T12:00:00Z", 8, 66.2, 850],
                                ["2024-12-29T12:00:00Z", 7, 66.2, 850]
                            ]
                        }
                    }
                },
                "ranges": {
                    "Temperature": {
                        "type": "NdArray",
                        "dataType": "float",
                        "axisNames": ["composite"],
                        "shape": [3],
                        "values": [30, 20, 10]
                    }
                }
            },
            {
                "type": "Coverage",
                "domain": {
                    "type": "Domain",
                    "domainType": "Trajectory",
                    "axes": {
                        "composite": {
                            "dataType": "tuple",
                            "coordinates": ["t", "x", "y", "z"],
                            "values": [
                                ["2024-12-29T12:00:00Z", 7, 66.2, 500],
                                ["2024-12-29T12:00:00Z", 8, 66.2, 500],
                                ["2024-12-29T12:00:00Z", 9, 66.2, 500]
                            ]
                        }
                    }
                },
                "ranges": {
                    "Temperature": {
                        "type": "NdArray",
                        "dataType": "float",
                        "axisNames": ["composite"],
                        "shape": [3],
                        "values": [1, 2, 3]
                    }
                }
            }
        ]
    }"#;

    /// Single coverage where one position has no data.
    pub const TRAJECTORY_WITH_NULL: &str = r#"{
        "type": "CoverageCollection",
        "parameters": {
            "Temperature": {
                "type": "Parameter",
                "observedProperty": { "label": "Temperature" }
            }
        },
        "coverages": [
            {
                "type": "Coverage",
                "domain": {
                    "type": "Domain",
                    "domainType": "Trajectory",
                    "axes": {
                        "composite": {
                            "dataType": "tuple",
                            "coordinates": ["x", "y", "z"],
                            "values": [[7, 66.2, 850], [8, 66.2, 850], [9, 66.2, 850]]
                        }
                    }
                },
                "ranges": {
                    "Temperature": {
                        "type": "NdArray",
                        "dataType": "float",
                        "axisNames": ["composite"],
                        "shape": [3],
                        "values": [1.5, null, 3.5]
                    }
                }
            }
        ]
    }"#;
}

/// Build a rectangular trajectory CoverageCollection JSON document with one
/// coverage per level.
pub fn trajectory_collection(
    parameter: &str,
    xs: &[f64],
    zs: &[f64],
    value: impl Fn(f64, f64) -> Option<f64>,
) -> String {
    let coverages: Vec<serde_json::Value> = zs
        .iter()
        .map(|&z| {
            let tuples: Vec<serde_json::Value> = xs
                .iter()
                .map(|&x| serde_json::json!(["2024-12-29T12:00:00Z", x, 66.2, z]))
                .collect();
            let values: Vec<Option<f64>> = xs.iter().map(|&x| value(x, z)).collect();
            serde_json::json!({
                "type": "Coverage",
                "domain": {
                    "type": "Domain",
                    "domainType": "Trajectory",
                    "axes": {
                        "composite": {
                            "dataType": "tuple",
                            "coordinates": ["t", "x", "y", "z"],
                            "values": tuples
                        }
                    }
                },
                "ranges": {
                    parameter: {
                        "type": "NdArray",
                        "dataType": "float",
                        "axisNames": ["composite"],
                        "shape": [xs.len()],
                        "values": values
                    }
                }
            })
        })
        .collect();

    serde_json::json!({
        "type": "CoverageCollection",
        "parameters": {
            parameter: {
                "type": "Parameter",
                "observedProperty": { "label": parameter }
            }
        },
        "coverages": coverages
    })
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixtures_are_valid_json() {
        for doc in [edr::INSTANCES, covjson::TRAJECTORY, covjson::TRAJECTORY_WITH_NULL] {
            let parsed: Result<serde_json::Value, _> = serde_json::from_str(doc);
            assert!(parsed.is_ok());
        }
    }

    #[test]
    fn test_trajectory_collection_shape() {
        let doc = trajectory_collection("T", &[1.0, 2.0], &[10.0, 20.0, 30.0], |x, z| Some(x * z));
        let v: serde_json::Value = serde_json::from_str(&doc).unwrap();
        assert_eq!(v["coverages"].as_array().unwrap().len(), 3);
        assert_eq!(v["coverages"][0]["ranges"]["T"]["values"][1], 20.0);
    }
}
