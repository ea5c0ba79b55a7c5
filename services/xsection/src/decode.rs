//! CoverageJSON trajectory responses to cross-section samples.

use cross_section::{Coordinate, Sample};
use edr_protocol::{AxisValue, CoverageCollection, EdrError};
use tracing::debug;

/// Pick the parameter to plot: the requested one, or the first declared.
pub fn select_parameter(
    collection: &CoverageCollection,
    requested: Option<&str>,
) -> Result<String, EdrError> {
    let names = collection.parameter_names();
    match requested {
        Some(name) if names.iter().any(|n| n == name) => Ok(name.to_string()),
        Some(name) => Err(EdrError::ParameterNotFound(name.to_string())),
        None => names
            .into_iter()
            .next()
            .ok_or_else(|| EdrError::NoDataAvailable("response declares no parameters".to_string())),
    }
}

/// Numeric strings become numbers so levels sent as text still sort by value.
fn coordinate(value: AxisValue) -> Coordinate {
    match value {
        AxisValue::Float(v) => Coordinate::Number(v),
        AxisValue::String(s) => match s.trim().parse::<f64>() {
            Ok(v) if v.is_finite() => Coordinate::Number(v),
            _ => Coordinate::Text(s),
        },
    }
}

/// Flatten every coverage's composite tuples into samples.
///
/// Every tuple becomes a sample, nulls included; dropping missing values
/// is left to the grid builder.
pub fn samples_from_collection(
    collection: &CoverageCollection,
    parameter: &str,
) -> Result<Vec<Sample>, EdrError> {
    let samples: Vec<Sample> = collection
        .composite_points(parameter)?
        .into_iter()
        .map(|point| {
            point
                .coords
                .into_iter()
                .fold(Sample::new(point.value), |sample, (axis, value)| {
                    sample.with_coord(axis, coordinate(value))
                })
        })
        .collect();

    debug!(
        parameter = parameter,
        coverages = collection.coverages.len(),
        samples = samples.len(),
        "Decoded trajectory samples"
    );

    Ok(samples)
}
