//! Core EDR types shared by collection and instance metadata.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A hyperlink to a related resource.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Link {
    /// The URI of the linked resource.
    pub href: String,

    /// The relationship type (e.g., "self", "data").
    #[serde(default)]
    pub rel: String,

    /// The media type of the linked resource.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<String>,

    /// A human-readable title for the link.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// The spatial, temporal and vertical extent of a collection or instance.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Extent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spatial: Option<SpatialExtent>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub temporal: Option<TemporalExtent>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub vertical: Option<VerticalExtent>,
}

impl Extent {
    /// Set the temporal extent.
    pub fn with_temporal(mut self, temporal: TemporalExtent) -> Self {
        self.temporal = Some(temporal);
        self
    }

    /// Set the vertical extent.
    pub fn with_vertical(mut self, vertical: VerticalExtent) -> Self {
        self.vertical = Some(vertical);
        self
    }
}

/// Spatial extent with bounding box.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SpatialExtent {
    /// Bounding boxes as [west, south, east, north] arrays.
    #[serde(default)]
    pub bbox: Vec<Vec<f64>>,

    /// Coordinate reference system (default: CRS:84).
    #[serde(default = "default_crs")]
    pub crs: String,
}

fn default_crs() -> String {
    "CRS:84".to_string()
}

/// Temporal extent with time intervals.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TemporalExtent {
    /// Time intervals as [start, end] pairs (ISO 8601).
    /// null values indicate open-ended intervals.
    #[serde(default)]
    pub interval: Vec<Vec<Option<String>>>,

    /// Available time values (ISO 8601 timestamps).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<String>>,

    /// Temporal reference system.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trs: Option<String>,
}

impl TemporalExtent {
    /// Create a temporal extent from start and end times.
    pub fn new(start: Option<String>, end: Option<String>) -> Self {
        Self {
            interval: vec![vec![start, end]],
            values: None,
            trs: None,
        }
    }

    /// Start of the first interval, the time a cross-section is requested for.
    pub fn first_start(&self) -> Option<&str> {
        self.interval.first()?.first()?.as_deref()
    }
}

/// A number that servers sometimes encode as a JSON string.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum NumberOrString {
    Number(f64),
    String(String),
}

impl NumberOrString {
    /// Numeric value, parsing the string form if needed.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            NumberOrString::Number(n) => Some(*n),
            NumberOrString::String(s) => s.trim().parse().ok(),
        }
    }
}

impl fmt::Display for NumberOrString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumberOrString::Number(n) => write!(f, "{}", n),
            NumberOrString::String(s) => f.write_str(s),
        }
    }
}

/// Vertical extent with level values.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct VerticalExtent {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub interval: Vec<Vec<Option<NumberOrString>>>,

    /// Discrete vertical levels.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<NumberOrString>,

    /// Vertical reference system.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vrs: Option<String>,
}

impl VerticalExtent {
    /// Create a vertical extent with specific level values.
    pub fn with_levels(levels: Vec<f64>, vrs: Option<String>) -> Self {
        Self {
            interval: Vec::new(),
            values: levels.into_iter().map(NumberOrString::Number).collect(),
            vrs,
        }
    }

    /// Levels that parse as numbers, in server order.
    pub fn levels(&self) -> Vec<f64> {
        self.values.iter().filter_map(NumberOrString::as_f64).collect()
    }

    /// Levels joined with commas, as used in the `z` query parameter.
    pub fn joined(&self) -> String {
        self.values
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(",")
    }
}
