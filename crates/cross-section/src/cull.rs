//! Label culling: choose a well-separated subset of label candidates.
//!
//! Picking the largest set of mutually separated midpoints is a maximum
//! independent set problem on the proximity graph. The greedy culler below
//! processes candidates in a random priority order, keeps a candidate unless
//! an earlier kept one already excluded it, and then excludes every later
//! candidate closer than the threshold. The random order gives every band the
//! same chance of keeping a label inside a dense cluster.
//!
//! Results differ between runs unless a seeded RNG is passed to
//! [`cull_labels_with_rng`]; every result satisfies the separation guarantee.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::types::LineSegment;

/// Default minimum label separation, in drawing units (pixels).
pub const DEFAULT_THRESHOLD: f64 = 60.0;

/// Default bin counts for [`cull_uniform_grid`].
pub const DEFAULT_GRID_CELLS: (usize, usize) = (6, 4);

/// Cull with a fresh thread-local RNG.
pub fn cull_labels(segments: &[LineSegment], threshold: f64) -> Vec<LineSegment> {
    cull_labels_with_rng(segments, threshold, &mut rand::thread_rng())
}

/// Greedy culling under a priority order drawn from `rng`.
///
/// For every pair of returned segments the midpoint distance is at least
/// `threshold`. A threshold `<= 0` (or NaN) keeps every segment. Segments
/// with NaN midpoints never compare as close and are always kept.
///
/// Runs in O(n²) for dense clusters; `n` is bounded by the boundary vertex
/// count of one rendered frame.
pub fn cull_labels_with_rng<R: Rng + ?Sized>(
    segments: &[LineSegment],
    threshold: f64,
    rng: &mut R,
) -> Vec<LineSegment> {
    let mut order: Vec<usize> = (0..segments.len()).collect();
    order.shuffle(rng);

    if !(threshold > 0.0) {
        return order.into_iter().map(|i| segments[i]).collect();
    }

    // Indexed by position in `order`.
    let mut discarded = vec![false; order.len()];
    let mut kept = Vec::new();

    for i in 0..order.len() {
        if discarded[i] {
            continue;
        }

        let p1 = &segments[order[i]];
        kept.push(*p1);

        for j in (i + 1)..order.len() {
            if discarded[j] {
                continue;
            }
            let p2 = &segments[order[j]];
            if p1.mid.distance(&p2.mid) < threshold {
                discarded[j] = true;
            }
        }
    }

    debug!(
        candidates = segments.len(),
        kept = kept.len(),
        threshold = threshold,
        "Culled label candidates"
    );

    kept
}

/// Bin-based culling: at most one label per cell of a `cells_x` × `cells_y`
/// grid laid over the midpoint bounding box.
///
/// A cell with a single candidate keeps it. In busier cells, candidates that
/// share their midpoint with another candidate of the same cell are dropped
/// (stacked labels are unreadable) and one of the rest is chosen uniformly.
pub fn cull_uniform_grid<R: Rng + ?Sized>(
    segments: &[LineSegment],
    cells_x: usize,
    cells_y: usize,
    rng: &mut R,
) -> Vec<LineSegment> {
    if segments.is_empty() {
        return Vec::new();
    }

    let cells_x = cells_x.max(1);
    let cells_y = cells_y.max(1);

    let (min_x, max_x) = extent(segments.iter().map(|s| s.mid.x));
    let (min_y, max_y) = extent(segments.iter().map(|s| s.mid.y));
    // Pad so the maximum falls inside the last cell.
    let max_x = max_x + 0.01;
    let max_y = max_y + 0.01;

    let mut cells: Vec<Vec<usize>> = vec![Vec::new(); cells_x * cells_y];
    for (idx, seg) in segments.iter().enumerate() {
        let bx = bin(seg.mid.x, min_x, max_x, cells_x);
        let by = bin(seg.mid.y, min_y, max_y, cells_y);
        cells[bx + by * cells_x].push(idx);
    }

    let mut kept = Vec::new();
    for cell in &cells {
        match cell.len() {
            0 => {}
            1 => kept.push(segments[cell[0]]),
            _ => {
                let candidates: Vec<usize> = cell
                    .iter()
                    .copied()
                    .filter(|&i| nearest_distance(segments, cell, i) > 0.0)
                    .collect();
                if let Some(&pick) = candidates.choose(rng) {
                    kept.push(segments[pick]);
                }
            }
        }
    }

    debug!(
        candidates = segments.len(),
        kept = kept.len(),
        cells_x = cells_x,
        cells_y = cells_y,
        "Culled label candidates on uniform grid"
    );

    kept
}

fn extent(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (lo, hi) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if lo.is_finite() && hi.is_finite() {
        (lo, hi)
    } else {
        (0.0, 0.0)
    }
}

fn bin(v: f64, min: f64, max: f64, cells: usize) -> usize {
    let t = (v - min) / (max - min) * cells as f64;
    // NaN casts to 0
    (t.floor().max(0.0) as usize).min(cells - 1)
}

fn nearest_distance(segments: &[LineSegment], cell: &[usize], idx: usize) -> f64 {
    cell.iter()
        .filter(|&&other| other != idx)
        .map(|&other| segments[idx].mid.distance(&segments[other].mid))
        .fold(f64::INFINITY, f64::min)
}

/// Culling strategy selected by configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum CullStrategy {
    Greedy { threshold: f64 },
    UniformGrid { cells_x: usize, cells_y: usize },
}

impl Default for CullStrategy {
    fn default() -> Self {
        CullStrategy::Greedy {
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl CullStrategy {
    pub fn apply<R: Rng + ?Sized>(&self, segments: &[LineSegment], rng: &mut R) -> Vec<LineSegment> {
        match *self {
            CullStrategy::Greedy { threshold } => cull_labels_with_rng(segments, threshold, rng),
            CullStrategy::UniformGrid { cells_x, cells_y } => {
                cull_uniform_grid(segments, cells_x, cells_y, rng)
            }
        }
    }
}
