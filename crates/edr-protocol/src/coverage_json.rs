//! CoverageJSON types for EDR query responses.
//!
//! Trajectory queries answer with a `CoverageCollection` whose coverages use
//! a composite tuple axis: every domain position is one tuple such as
//! `[t, x, y, z]`, and the range array holds one value per tuple.
//!
//! See: <https://covjson.org/>

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

use crate::errors::EdrError;
use crate::parameters::{I18nString, ObservedProperty, Unit};

/// Name of the tuple axis in trajectory domains.
pub const COMPOSITE_AXIS: &str = "composite";

/// A CoverageJSON document containing coverage data.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CoverageJson {
    /// Document type (always "Coverage" for single coverage).
    #[serde(rename = "type")]
    pub type_: CoverageType,

    /// The domain defining the coverage's spatial/temporal extent.
    pub domain: Domain,

    /// Parameter definitions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<HashMap<String, CovJsonParameter>>,

    /// Data ranges for each parameter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ranges: Option<HashMap<String, NdArray>>,
}

/// One domain position of a composite axis and the parameter value there.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositePoint {
    pub value: Option<f64>,
    /// Axis name and coordinate, in the axis' declared order.
    pub coords: Vec<(String, AxisValue)>,
}

impl CoverageJson {
    /// Create a trajectory coverage from tuples.
    pub fn trajectory(coordinates: Vec<String>, tuples: Vec<Vec<AxisValue>>) -> Self {
        let mut axes = HashMap::new();
        axes.insert(
            COMPOSITE_AXIS.to_string(),
            Axis::Composite {
                data_type: "tuple".to_string(),
                coordinates,
                values: tuples,
            },
        );
        Self {
            type_: CoverageType::Coverage,
            domain: Domain {
                type_: "Domain".to_string(),
                domain_type: Some(DomainType::Trajectory),
                axes,
                referencing: None,
            },
            parameters: Some(HashMap::new()),
            ranges: Some(HashMap::new()),
        }
    }

    /// Add a parameter with values that may include nulls.
    pub fn with_parameter_values(
        mut self,
        name: &str,
        param: CovJsonParameter,
        values: Vec<Option<f64>>,
    ) -> Self {
        if let Some(ref mut params) = self.parameters {
            params.insert(name.to_string(), param);
        }
        if let Some(ref mut ranges) = self.ranges {
            let shape = vec![values.len()];
            ranges.insert(
                name.to_string(),
                NdArray::with_missing(values, shape, vec![COMPOSITE_AXIS.to_string()]),
            );
        }
        self
    }

    /// Pair every value of `parameter` with the tuple it belongs to.
    ///
    /// The composite axis is the one named by the range's `axisNames`, or
    /// the axis called `composite`. Values and tuples are zipped, so a
    /// length mismatch silently drops the surplus.
    pub fn composite_points(&self, parameter: &str) -> Result<Vec<CompositePoint>, EdrError> {
        let range = self
            .ranges
            .as_ref()
            .and_then(|r| r.get(parameter))
            .ok_or_else(|| EdrError::ParameterNotFound(parameter.to_string()))?;

        let axis = range
            .axis_names
            .as_ref()
            .and_then(|names| names.first())
            .and_then(|name| self.domain.axes.get(name))
            .filter(|axis| matches!(axis, Axis::Composite { .. }))
            .or_else(|| self.domain.axes.get(COMPOSITE_AXIS));

        let Some(Axis::Composite {
            coordinates,
            values: tuples,
            ..
        }) = axis
        else {
            return Err(EdrError::InvalidResponse(
                "coverage has no composite axis".to_string(),
            ));
        };

        Ok(range
            .values
            .iter()
            .zip(tuples)
            .map(|(value, tuple)| CompositePoint {
                value: *value,
                coords: coordinates.iter().cloned().zip(tuple.iter().cloned()).collect(),
            })
            .collect())
    }
}

/// Coverage type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum CoverageType {
    /// Single coverage.
    Coverage,
    /// Collection of coverages.
    CoverageCollection,
}

/// A collection of coverages sharing parameter definitions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CoverageCollection {
    #[serde(rename = "type")]
    pub type_: CoverageType,

    #[serde(rename = "domainType", skip_serializing_if = "Option::is_none")]
    pub domain_type: Option<DomainType>,

    #[serde(default)]
    pub parameters: BTreeMap<String, CovJsonParameter>,

    #[serde(default)]
    pub coverages: Vec<CoverageJson>,
}

impl CoverageCollection {
    /// Create a collection from coverages.
    pub fn new(coverages: Vec<CoverageJson>) -> Self {
        Self {
            type_: CoverageType::CoverageCollection,
            domain_type: None,
            parameters: BTreeMap::new(),
            coverages,
        }
    }

    /// Parse a response body that holds either a collection or a single
    /// coverage. A single coverage is wrapped into a one-element collection.
    pub fn from_json_str(body: &str) -> Result<Self, EdrError> {
        let value: serde_json::Value =
            serde_json::from_str(body).map_err(|e| EdrError::InvalidResponse(e.to_string()))?;

        match value.get("type").and_then(|t| t.as_str()) {
            Some("Coverage") => {
                let coverage: CoverageJson = serde_json::from_value(value)
                    .map_err(|e| EdrError::InvalidResponse(e.to_string()))?;
                let parameters = coverage
                    .parameters
                    .clone()
                    .unwrap_or_default()
                    .into_iter()
                    .collect();
                Ok(Self {
                    type_: CoverageType::CoverageCollection,
                    domain_type: coverage.domain.domain_type.clone(),
                    parameters,
                    coverages: vec![coverage],
                })
            }
            Some("CoverageCollection") => serde_json::from_value(value)
                .map_err(|e| EdrError::InvalidResponse(e.to_string())),
            other => Err(EdrError::InvalidResponse(format!(
                "expected CoverageJSON, got type {:?}",
                other
            ))),
        }
    }

    /// Parameter names declared by the collection, then by its coverages.
    pub fn parameter_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.parameters.keys().cloned().collect();
        for coverage in &self.coverages {
            let mut extra: Vec<&String> = coverage
                .parameters
                .iter()
                .flat_map(|p| p.keys())
                .chain(coverage.ranges.iter().flat_map(|r| r.keys()))
                .filter(|k| !names.contains(k))
                .collect();
            extra.sort();
            extra.dedup();
            names.extend(extra.into_iter().cloned());
        }
        names
    }

    /// Composite points of `parameter` across every coverage.
    pub fn composite_points(&self, parameter: &str) -> Result<Vec<CompositePoint>, EdrError> {
        let mut points = Vec::new();
        for coverage in &self.coverages {
            points.extend(coverage.composite_points(parameter)?);
        }
        Ok(points)
    }
}

/// The domain of a coverage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Domain {
    /// Domain type (always "Domain").
    #[serde(rename = "type", default = "default_domain")]
    pub type_: String,

    #[serde(rename = "domainType", skip_serializing_if = "Option::is_none")]
    pub domain_type: Option<DomainType>,

    #[serde(default)]
    pub axes: HashMap<String, Axis>,

    /// Reference systems for axes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referencing: Option<Vec<ReferenceSystemConnection>>,
}

fn default_domain() -> String {
    "Domain".to_string()
}

/// Domain types supported by CoverageJSON.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum DomainType {
    Point,
    PointSeries,
    VerticalProfile,
    Grid,
    /// Trajectory (1D path through space).
    Trajectory,
    MultiPoint,
}

/// An axis in the domain.
///
/// Untagged: a composite axis is recognised by its `dataType` and
/// `coordinates` members, so it must be tried before the plain list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Axis {
    /// Tuple axis; every value lists one coordinate per name in `coordinates`.
    Composite {
        #[serde(rename = "dataType")]
        data_type: String,
        coordinates: Vec<String>,
        values: Vec<Vec<AxisValue>>,
    },
    /// Explicit list of values.
    Values { values: Vec<AxisValue> },
    /// Regular axis defined by start, stop, and number of points.
    Regular { start: f64, stop: f64, num: usize },
}

impl Axis {
    /// Get the number of values in this axis.
    pub fn len(&self) -> usize {
        match self {
            Axis::Composite { values, .. } => values.len(),
            Axis::Values { values } => values.len(),
            Axis::Regular { num, .. } => *num,
        }
    }

    /// Check if axis is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A value on an axis.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum AxisValue {
    /// Floating-point value (coordinates, levels).
    Float(f64),
    /// String value (timestamps).
    String(String),
}

impl AxisValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            AxisValue::Float(v) => Some(*v),
            AxisValue::String(_) => None,
        }
    }
}

impl fmt::Display for AxisValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AxisValue::Float(v) => write!(f, "{}", v),
            AxisValue::String(s) => f.write_str(s),
        }
    }
}

/// Connection between axes and their reference system.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReferenceSystemConnection {
    pub coordinates: Vec<String>,
    /// Kept as raw JSON; only the axis names matter here.
    pub system: serde_json::Value,
}

/// A parameter in CoverageJSON format.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CovJsonParameter {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<I18nString>,

    #[serde(
        rename = "observedProperty",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub observed_property: Option<ObservedProperty>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<Unit>,
}

impl CovJsonParameter {
    /// Create a new CoverageJSON parameter.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            type_: Some("Parameter".to_string()),
            description: None,
            observed_property: Some(ObservedProperty::new(label)),
            unit: None,
        }
    }

    /// Set the unit.
    pub fn with_unit(mut self, unit: Unit) -> Self {
        self.unit = Some(unit);
        self
    }
}

/// N-dimensional array containing data values.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NdArray {
    #[serde(rename = "type", default = "default_ndarray")]
    pub type_: String,

    #[serde(rename = "dataType", default = "default_data_type")]
    pub data_type: String,

    /// Names of axes in order.
    #[serde(rename = "axisNames", skip_serializing_if = "Option::is_none")]
    pub axis_names: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub shape: Option<Vec<usize>>,

    /// The data values (may contain null for missing data).
    #[serde(default)]
    pub values: Vec<Option<f64>>,
}

fn default_ndarray() -> String {
    "NdArray".to_string()
}

fn default_data_type() -> String {
    "float".to_string()
}

impl NdArray {
    /// Create an array with missing data support.
    pub fn with_missing(
        values: Vec<Option<f64>>,
        shape: Vec<usize>,
        axis_names: Vec<String>,
    ) -> Self {
        Self {
            type_: default_ndarray(),
            data_type: default_data_type(),
            axis_names: Some(axis_names),
            shape: Some(shape),
            values,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tuple(x: f64, z: f64) -> Vec<AxisValue> {
        vec![AxisValue::Float(x), AxisValue::Float(z)]
    }

    #[test]
    fn test_composite_axis_deserializes_before_values() {
        let axis: Axis = serde_json::from_str(
            r#"{"dataType": "tuple", "coordinates": ["x", "z"], "values": [[1, 2], [3, 4]]}"#,
        )
        .unwrap();
        assert!(matches!(axis, Axis::Composite { .. }));
        assert_eq!(axis.len(), 2);

        let axis: Axis = serde_json::from_str(r#"{"values": [1, "a"]}"#).unwrap();
        assert_eq!(
            axis,
            Axis::Values {
                values: vec![AxisValue::Float(1.0), AxisValue::String("a".into())]
            }
        );

        let axis: Axis = serde_json::from_str(r#"{"start": 0, "stop": 1, "num": 5}"#).unwrap();
        assert_eq!(axis.len(), 5);
    }

    #[test]
    fn test_builder_composite_points() {
        let cov = CoverageJson::trajectory(
            vec!["x".into(), "z".into()],
            vec![tuple(7.0, 850.0), tuple(8.0, 850.0)],
        )
        .with_parameter_values("T", CovJsonParameter::new("T"), vec![Some(1.0), None]);

        let points = cov.composite_points("T").unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].value, Some(1.0));
        assert_eq!(points[1].value, None);
        assert_eq!(points[1].coords[0], ("x".to_string(), AxisValue::Float(8.0)));
    }

    #[test]
    fn test_missing_parameter() {
        let cov = CoverageJson::trajectory(vec!["x".into()], vec![]);
        assert!(matches!(
            cov.composite_points("nope"),
            Err(EdrError::ParameterNotFound(_))
        ));
    }

    #[test]
    fn test_length_mismatch_zips_shortest() {
        let cov = CoverageJson::trajectory(
            vec!["x".into(), "z".into()],
            vec![tuple(1.0, 1.0)],
        )
        .with_parameter_values("T", CovJsonParameter::new("T"), vec![Some(1.0), Some(2.0)]);
        assert_eq!(cov.composite_points("T").unwrap().len(), 1);
    }

    #[test]
    fn test_single_coverage_is_wrapped() {
        let cov = CoverageJson::trajectory(vec!["x".into()], vec![vec![AxisValue::Float(1.0)]])
            .with_parameter_values("T", CovJsonParameter::new("T"), vec![Some(4.0)]);
        let body = serde_json::to_string(&cov).unwrap();

        let collection = CoverageCollection::from_json_str(&body).unwrap();
        assert_eq!(collection.coverages.len(), 1);
        assert_eq!(collection.parameter_names(), vec!["T".to_string()]);
        assert_eq!(collection.domain_type, Some(DomainType::Trajectory));
    }

    #[test]
    fn test_rejects_non_coverage() {
        assert!(CoverageCollection::from_json_str(r#"{"type": "FeatureCollection"}"#).is_err());
        assert!(CoverageCollection::from_json_str("not json").is_err());
    }
}
