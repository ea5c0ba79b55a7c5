//! Trajectory query parameters.
//!
//! A cross-section is requested as an EDR trajectory query: the path is a
//! WKT LINESTRING in `coords`, and the remaining query parameters select
//! the parameter, the valid time and the vertical levels.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when parsing coordinates.
#[derive(Debug, Error, PartialEq)]
pub enum CoordinateParseError {
    /// Invalid WKT format.
    #[error("Invalid WKT format: {0}")]
    InvalidWkt(String),

    /// Invalid coordinate value.
    #[error("Invalid coordinate value: {0}")]
    InvalidCoordinate(String),

    /// Coordinate out of valid range.
    #[error("Coordinate out of range: {0}")]
    OutOfRange(String),
}

/// Check that a lon/lat pair lies within CRS:84 bounds.
pub fn validate_coordinates(lon: f64, lat: f64) -> Result<(), CoordinateParseError> {
    if !(-180.0..=180.0).contains(&lon) {
        return Err(CoordinateParseError::OutOfRange(format!(
            "Longitude {} must be between -180 and 180",
            lon
        )));
    }
    if !(-90.0..=90.0).contains(&lat) {
        return Err(CoordinateParseError::OutOfRange(format!(
            "Latitude {} must be between -90 and 90",
            lat
        )));
    }
    Ok(())
}

/// A single waypoint in a trajectory.
///
/// Supports 2D (lon, lat), 3D with height (lon, lat, z), 3D with time (lon, lat, m),
/// and 4D (lon, lat, z, m) waypoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrajectoryWaypoint {
    /// Longitude in degrees.
    pub lon: f64,
    /// Latitude in degrees.
    pub lat: f64,
    /// Optional height/vertical level (from LINESTRINGZ or LINESTRINGZM).
    pub z: Option<f64>,
    /// Optional time as Unix epoch seconds (from LINESTRINGM or LINESTRINGZM).
    pub m: Option<i64>,
}

impl TrajectoryWaypoint {
    /// Create a 2D waypoint (lon, lat).
    pub fn new_2d(lon: f64, lat: f64) -> Self {
        Self { lon, lat, z: None, m: None }
    }

    /// Create a 3D waypoint with height (lon, lat, z).
    pub fn new_3d_z(lon: f64, lat: f64, z: f64) -> Self {
        Self { lon, lat, z: Some(z), m: None }
    }

    /// Create a 3D waypoint with time (lon, lat, m).
    pub fn new_3d_m(lon: f64, lat: f64, m: i64) -> Self {
        Self { lon, lat, z: None, m: Some(m) }
    }

    /// Create a 4D waypoint (lon, lat, z, m).
    pub fn new_4d(lon: f64, lat: f64, z: f64, m: i64) -> Self {
        Self { lon, lat, z: Some(z), m: Some(m) }
    }
}

/// Type of LINESTRING in the trajectory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineStringType {
    /// 2D: LINESTRING (lon lat, lon lat, ...)
    LineString,
    /// 3D with height: LINESTRINGZ (lon lat z, lon lat z, ...)
    LineStringZ,
    /// 3D with time: LINESTRINGM (lon lat m, lon lat m, ...)
    LineStringM,
    /// 4D: LINESTRINGZM (lon lat z m, lon lat z m, ...)
    LineStringZM,
}

impl LineStringType {
    /// Check if this type includes height (Z) coordinates.
    pub fn has_z(&self) -> bool {
        matches!(self, LineStringType::LineStringZ | LineStringType::LineStringZM)
    }

    /// Check if this type includes time (M) coordinates.
    pub fn has_m(&self) -> bool {
        matches!(self, LineStringType::LineStringM | LineStringType::LineStringZM)
    }

    fn keyword(&self) -> &'static str {
        match self {
            LineStringType::LineString => "LINESTRING",
            LineStringType::LineStringZ => "LINESTRINGZ",
            LineStringType::LineStringM => "LINESTRINGM",
            LineStringType::LineStringZM => "LINESTRINGZM",
        }
    }
}

/// Result of parsing trajectory coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedTrajectory {
    /// The type of LINESTRING parsed.
    pub line_type: LineStringType,
    /// The waypoints along the trajectory.
    pub waypoints: Vec<TrajectoryWaypoint>,
    /// Whether this is a MULTI* variant (multiple line segments).
    pub is_multi: bool,
}

/// Trajectory query parameters.
///
/// Represents a path through space (and optionally time) along which
/// data should be sampled.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrajectoryQuery {
    /// The waypoints defining the trajectory path.
    pub waypoints: Vec<TrajectoryWaypoint>,

    /// The type of LINESTRING (indicates what coordinates are embedded).
    pub line_type: LineStringType,

    /// Requested vertical level(s), sent comma-joined as `z`.
    pub z: Option<Vec<f64>>,

    /// Requested datetime, passed through verbatim.
    pub datetime: Option<String>,

    /// Requested parameter names.
    pub parameter_names: Option<Vec<String>>,

    /// Coordinate reference system.
    pub crs: Option<String>,

    /// Output format.
    pub format: Option<String>,
}

impl Default for TrajectoryQuery {
    fn default() -> Self {
        Self::new()
    }
}

impl TrajectoryQuery {
    /// Create an empty trajectory query.
    pub fn new() -> Self {
        Self {
            waypoints: Vec::new(),
            line_type: LineStringType::LineString,
            z: None,
            datetime: None,
            parameter_names: None,
            crs: None,
            format: None,
        }
    }

    /// Build a query for the path described by a WKT string.
    pub fn from_wkt(coords: &str) -> Result<Self, CoordinateParseError> {
        let parsed = Self::parse_coords(coords)?;
        Ok(Self {
            waypoints: parsed.waypoints,
            line_type: parsed.line_type,
            ..Self::new()
        })
    }

    /// Set the requested parameter.
    pub fn with_parameter(mut self, name: impl Into<String>) -> Self {
        self.parameter_names = Some(vec![name.into()]);
        self
    }

    /// Set the requested datetime.
    pub fn with_datetime(mut self, datetime: impl Into<String>) -> Self {
        self.datetime = Some(datetime.into());
        self
    }

    /// Set the requested vertical levels.
    pub fn with_levels(mut self, levels: Vec<f64>) -> Self {
        self.z = Some(levels);
        self
    }

    /// Parse a WKT LINESTRING or MULTILINESTRING coordinate string.
    ///
    /// Supports:
    /// - LINESTRING(lon lat, lon lat, ...)
    /// - LINESTRINGZ(lon lat z, lon lat z, ...)
    /// - LINESTRINGM(lon lat m, lon lat m, ...)
    /// - LINESTRINGZM(lon lat z m, lon lat z m, ...)
    /// - MULTILINESTRING((lon lat, ...),(lon lat, ...))
    /// - And MULTI variants of Z, M, ZM
    ///
    /// Whitespace between the keyword and its dimension suffix is accepted,
    /// so `LINESTRING Z (...)` parses like `LINESTRINGZ(...)`.
    pub fn parse_coords(coords: &str) -> Result<ParsedTrajectory, CoordinateParseError> {
        let coords = coords.trim();
        let head: String = coords
            .split('(')
            .next()
            .unwrap_or_default()
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_uppercase();

        let (line_type, is_multi) = Self::detect_linestring_type(&head)?;

        let waypoints = if is_multi {
            Self::parse_multi_linestring(coords, line_type)?
        } else {
            Self::parse_single_linestring(coords, line_type)?
        };

        if waypoints.is_empty() {
            return Err(CoordinateParseError::InvalidWkt(
                "LINESTRING must contain at least one waypoint".to_string(),
            ));
        }

        Ok(ParsedTrajectory {
            line_type,
            waypoints,
            is_multi,
        })
    }

    /// Detect the LINESTRING type from the compacted WKT keyword.
    fn detect_linestring_type(head: &str) -> Result<(LineStringType, bool), CoordinateParseError> {
        let (is_multi, keyword) = match head.strip_prefix("MULTI") {
            Some(rest) => (true, rest),
            None => (false, head),
        };

        let line_type = match keyword {
            "LINESTRINGZM" => LineStringType::LineStringZM,
            "LINESTRINGZ" => LineStringType::LineStringZ,
            "LINESTRINGM" => LineStringType::LineStringM,
            "LINESTRING" => LineStringType::LineString,
            _ => {
                return Err(CoordinateParseError::InvalidWkt(
                    "Expected LINESTRING, LINESTRINGZ, LINESTRINGM, LINESTRINGZM, or MULTI* variant"
                        .to_string(),
                ))
            }
        };

        Ok((line_type, is_multi))
    }

    /// Locate the outermost parentheses.
    fn outer_parens(coords: &str) -> Result<&str, CoordinateParseError> {
        let start = coords.find('(').ok_or_else(|| {
            CoordinateParseError::InvalidWkt("Missing opening parenthesis".to_string())
        })?;
        let end = coords.rfind(')').ok_or_else(|| {
            CoordinateParseError::InvalidWkt("Missing closing parenthesis".to_string())
        })?;
        if end <= start {
            return Err(CoordinateParseError::InvalidWkt(
                "Invalid parenthesis order".to_string(),
            ));
        }
        Ok(&coords[start + 1..end])
    }

    /// Parse a single LINESTRING.
    fn parse_single_linestring(
        coords: &str,
        line_type: LineStringType,
    ) -> Result<Vec<TrajectoryWaypoint>, CoordinateParseError> {
        Self::parse_waypoints(Self::outer_parens(coords)?.trim(), line_type)
    }

    /// Parse a MULTILINESTRING into waypoints (concatenates all segments).
    fn parse_multi_linestring(
        coords: &str,
        line_type: LineStringType,
    ) -> Result<Vec<TrajectoryWaypoint>, CoordinateParseError> {
        let inner = Self::outer_parens(coords)?;

        let mut all_waypoints = Vec::new();
        let mut depth = 0;
        let mut current_segment = String::new();

        for ch in inner.chars() {
            match ch {
                '(' => {
                    depth += 1;
                    if depth > 1 {
                        current_segment.push(ch);
                    }
                }
                ')' => {
                    depth -= 1;
                    if depth == 0 {
                        let segment_str = current_segment.trim();
                        if !segment_str.is_empty() {
                            all_waypoints.extend(Self::parse_waypoints(segment_str, line_type)?);
                        }
                        current_segment.clear();
                    } else if depth > 0 {
                        current_segment.push(ch);
                    }
                }
                // Comma between segments
                ',' if depth == 0 => {}
                _ => {
                    if depth > 0 {
                        current_segment.push(ch);
                    }
                }
            }
        }

        if all_waypoints.is_empty() {
            return Err(CoordinateParseError::InvalidWkt(
                "MULTILINESTRING must contain at least one linestring with waypoints".to_string(),
            ));
        }

        Ok(all_waypoints)
    }

    /// Parse waypoints from a coordinate string based on the LINESTRING type.
    fn parse_waypoints(
        coords_str: &str,
        line_type: LineStringType,
    ) -> Result<Vec<TrajectoryWaypoint>, CoordinateParseError> {
        let expected_coords = match line_type {
            LineStringType::LineString => 2,
            LineStringType::LineStringZ | LineStringType::LineStringM => 3,
            LineStringType::LineStringZM => 4,
        };

        let number = |s: &str| -> Result<f64, CoordinateParseError> {
            s.parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| CoordinateParseError::InvalidCoordinate(s.to_string()))
        };
        let epoch = |s: &str| -> Result<i64, CoordinateParseError> {
            s.parse().map_err(|_| {
                CoordinateParseError::InvalidCoordinate(format!("Invalid Unix epoch time: {}", s))
            })
        };

        coords_str
            .split(',')
            .map(|waypoint_str| {
                let waypoint_str = waypoint_str.trim();
                let parts: Vec<&str> = waypoint_str.split_whitespace().collect();

                if parts.len() != expected_coords {
                    return Err(CoordinateParseError::InvalidWkt(format!(
                        "Expected {} coordinates for {:?}, got {} in '{}'",
                        expected_coords,
                        line_type,
                        parts.len(),
                        waypoint_str
                    )));
                }

                let lon = number(parts[0])?;
                let lat = number(parts[1])?;
                validate_coordinates(lon, lat)?;

                Ok(match line_type {
                    LineStringType::LineString => TrajectoryWaypoint::new_2d(lon, lat),
                    LineStringType::LineStringZ => {
                        TrajectoryWaypoint::new_3d_z(lon, lat, number(parts[2])?)
                    }
                    LineStringType::LineStringM => {
                        TrajectoryWaypoint::new_3d_m(lon, lat, epoch(parts[2])?)
                    }
                    LineStringType::LineStringZM => {
                        TrajectoryWaypoint::new_4d(lon, lat, number(parts[2])?, epoch(parts[3])?)
                    }
                })
            })
            .collect()
    }

    /// Encode the path as WKT. MULTI input is written back as a single
    /// LINESTRING of the concatenated waypoints.
    pub fn to_wkt(&self) -> String {
        let points: Vec<String> = self
            .waypoints
            .iter()
            .map(|wp| {
                let mut parts = vec![wp.lon.to_string(), wp.lat.to_string()];
                if self.line_type.has_z() {
                    parts.push(wp.z.unwrap_or_default().to_string());
                }
                if self.line_type.has_m() {
                    parts.push(wp.m.unwrap_or_default().to_string());
                }
                parts.join(" ")
            })
            .collect();
        format!("{}({})", self.line_type.keyword(), points.join(","))
    }

    /// Shift every waypoint by a lon/lat offset.
    ///
    /// Fails when any shifted waypoint leaves CRS:84 bounds; the query is
    /// left untouched in that case since a new one is returned.
    pub fn translated(&self, dlon: f64, dlat: f64) -> Result<Self, CoordinateParseError> {
        let mut moved = self.clone();
        for wp in &mut moved.waypoints {
            wp.lon += dlon;
            wp.lat += dlat;
            validate_coordinates(wp.lon, wp.lat)?;
        }
        Ok(moved)
    }

    /// Query string pairs for `{instance}/trajectory`.
    ///
    /// Order: `parameter-name`, `datetime`, `crs`, `coords`, `z`, `f`. The
    /// crs defaults to `CRS:84` and the format to `CoverageJSON`.
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(names) = &self.parameter_names {
            pairs.push(("parameter-name".to_string(), names.join(",")));
        }
        if let Some(datetime) = &self.datetime {
            pairs.push(("datetime".to_string(), datetime.clone()));
        }
        pairs.push((
            "crs".to_string(),
            self.crs.clone().unwrap_or_else(|| "CRS:84".to_string()),
        ));
        pairs.push(("coords".to_string(), self.to_wkt()));
        if let Some(z) = &self.z {
            let joined: Vec<String> = z.iter().map(|v| v.to_string()).collect();
            pairs.push(("z".to_string(), joined.join(",")));
        }
        pairs.push((
            "f".to_string(),
            self.format
                .clone()
                .unwrap_or_else(|| "CoverageJSON".to_string()),
        ));
        pairs
    }

    /// Get the number of waypoints in the trajectory.
    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    /// Check if the trajectory is empty.
    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }
}
