//! Regularization of scattered samples into a rectangular grid.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::sample::{cmp_axis, Coordinate, Sample};

/// Dense rectangular grid of scalar values in row-major order.
///
/// Row `j` holds the `j`-th smallest vertical level, column `i` the `i`-th
/// smallest horizontal position. The layout only holds when the input was
/// rectangular; see [`Grid::is_rectangular`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Grid {
    pub values: Vec<f64>,
    pub width: usize,
    pub height: usize,
}

impl Grid {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// `values.len() == width * height`
    pub fn is_rectangular(&self) -> bool {
        self.values.len() == self.width * self.height
    }

    /// Value at column `x`, row `y`.
    pub fn get(&self, x: usize, y: usize) -> Option<f64> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.values.get(y * self.width + x).copied()
    }

    /// Minimum and maximum of the finite grid values, used as the color domain.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.values
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}

/// Build a grid from scattered samples.
///
/// Samples with a missing or non-finite value are dropped. The rest are
/// sorted by `vertical_key` ascending, then `horizontal_key` ascending, and
/// their values emitted in that order. `width` and `height` are the numbers of
/// distinct horizontal and vertical coordinates among the kept samples.
///
/// Duplicate (horizontal, vertical) pairs are kept, so irregular input can
/// yield `values.len() != width * height`; that is logged, not repaired.
pub fn build_grid(samples: &[Sample], horizontal_key: &str, vertical_key: &str) -> Grid {
    let mut kept: Vec<(&Sample, f64)> = samples
        .iter()
        .filter_map(|s| s.finite_value().map(|v| (s, v)))
        .collect();

    if kept.is_empty() {
        debug!(input = samples.len(), "No valid samples, returning empty grid");
        return Grid::empty();
    }

    kept.sort_by(|(a, _), (b, _)| {
        cmp_axis(a.coord(vertical_key), b.coord(vertical_key))
            .then_with(|| cmp_axis(a.coord(horizontal_key), b.coord(horizontal_key)))
    });

    let width = count_distinct(kept.iter().map(|(s, _)| s.coord(horizontal_key)));
    let height = count_distinct(kept.iter().map(|(s, _)| s.coord(vertical_key)));
    let values: Vec<f64> = kept.into_iter().map(|(_, v)| v).collect();

    let grid = Grid {
        values,
        width,
        height,
    };

    if grid.is_rectangular() {
        debug!(
            input = samples.len(),
            width = grid.width,
            height = grid.height,
            "Built sample grid"
        );
    } else {
        warn!(
            input = samples.len(),
            values = grid.values.len(),
            width = grid.width,
            height = grid.height,
            "Sample set is not rectangular; grid dimensions do not match value count"
        );
    }

    grid
}

fn count_distinct<'a>(coords: impl Iterator<Item = Option<&'a Coordinate>>) -> usize {
    let mut all: Vec<Option<&Coordinate>> = coords.collect();
    all.sort_by(|a, b| cmp_axis(*a, *b));
    all.dedup_by(|a, b| cmp_axis(*a, *b) == Ordering::Equal);
    all.len()
}
