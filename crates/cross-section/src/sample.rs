//! Scattered observations along a cross-section path.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A coordinate on one named axis.
///
/// Level and position axes are numeric; time axes usually carry ISO 8601
/// strings and are passed through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Coordinate {
    Number(f64),
    Text(String),
}

impl Coordinate {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Coordinate::Number(v) => Some(*v),
            Coordinate::Text(_) => None,
        }
    }

    /// Total order used for grid layout: numbers first, then text
    /// (lexicographic).
    ///
    /// Numbers follow IEEE total order except that `-0.0` equals `0.0` and
    /// every NaN equals every other, so sorting and distinct counting agree.
    pub fn total_cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Coordinate::Number(a), Coordinate::Number(b)) => canonical(*a).total_cmp(&canonical(*b)),
            (Coordinate::Number(_), Coordinate::Text(_)) => Ordering::Less,
            (Coordinate::Text(_), Coordinate::Number(_)) => Ordering::Greater,
            (Coordinate::Text(a), Coordinate::Text(b)) => a.cmp(b),
        }
    }
}

fn canonical(v: f64) -> f64 {
    if v.is_nan() {
        f64::NAN
    } else {
        v + 0.0
    }
}

impl From<f64> for Coordinate {
    fn from(v: f64) -> Self {
        Coordinate::Number(v)
    }
}

impl From<&str> for Coordinate {
    fn from(v: &str) -> Self {
        Coordinate::Text(v.to_string())
    }
}

impl From<String> for Coordinate {
    fn from(v: String) -> Self {
        Coordinate::Text(v)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Coordinate::Number(v) => write!(f, "{}", v),
            Coordinate::Text(s) => f.write_str(s),
        }
    }
}

/// One scattered observation: a value (possibly missing) plus one
/// coordinate per named axis.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Sample {
    pub value: Option<f64>,
    pub coords: HashMap<String, Coordinate>,
}

impl Sample {
    pub fn new(value: Option<f64>) -> Self {
        Self {
            value,
            coords: HashMap::new(),
        }
    }

    /// Builder-style axis assignment.
    pub fn with_coord(mut self, axis: impl Into<String>, coord: impl Into<Coordinate>) -> Self {
        self.coords.insert(axis.into(), coord.into());
        self
    }

    pub fn coord(&self, axis: &str) -> Option<&Coordinate> {
        self.coords.get(axis)
    }

    /// Returns the value if present and finite.
    pub fn finite_value(&self) -> Option<f64> {
        self.value.filter(|v| v.is_finite())
    }
}

/// Compare two optional coordinates; a missing axis sorts first.
pub(crate) fn cmp_axis(a: Option<&Coordinate>, b: Option<&Coordinate>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(b),
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbers_sort_before_text() {
        let n = Coordinate::Number(1e9);
        let t = Coordinate::from("2024-01-01T00:00:00Z");
        assert_eq!(n.total_cmp(&t), Ordering::Less);
        assert_eq!(t.total_cmp(&n), Ordering::Greater);
    }

    #[test]
    fn test_signed_zero_and_nan_compare_equal() {
        let neg = Coordinate::Number(-0.0);
        let pos = Coordinate::Number(0.0);
        assert_eq!(neg.total_cmp(&pos), Ordering::Equal);
        assert_eq!(
            Coordinate::Number(-f64::NAN).total_cmp(&Coordinate::Number(f64::NAN)),
            Ordering::Equal
        );
        assert_eq!(Coordinate::Number(-1.0).total_cmp(&neg), Ordering::Less);
    }

    #[test]
    fn test_missing_axis_sorts_first() {
        let c = Coordinate::Number(-5.0);
        assert_eq!(cmp_axis(None, Some(&c)), Ordering::Less);
        assert_eq!(cmp_axis(None, None), Ordering::Equal);
    }

    #[test]
    fn test_finite_value_filters_nan() {
        assert_eq!(Sample::new(Some(f64::NAN)).finite_value(), None);
        assert_eq!(Sample::new(Some(2.5)).finite_value(), Some(2.5));
        assert_eq!(Sample::new(None).finite_value(), None);
    }

    #[test]
    fn test_untagged_deserialize() {
        let n: Coordinate = serde_json::from_str("850").unwrap();
        assert_eq!(n, Coordinate::Number(850.0));
        let t: Coordinate = serde_json::from_str("\"2024-12-29T12:00:00Z\"").unwrap();
        assert_eq!(t.as_f64(), None);
    }
}
