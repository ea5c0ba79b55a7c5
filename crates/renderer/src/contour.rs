//! Filled contour band (isoband) extraction using marching squares.
//!
//! For each threshold the extractor produces the rings bounding the region
//! `value >= threshold`. The grid is padded with an implicit ring of "below"
//! samples so every ring closes; missing (NaN) samples also count as below.
//!
//! Sample `(i, j)` sits at `(i + 0.5, j + 0.5)`, so ring coordinates lie in
//! `[0, width] × [0, height]` and scale to drawing space by
//! `drawing_width / width` and `drawing_height / height`.

use std::collections::HashMap;

use cross_section::{Point, PolygonFeature, Ring};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// How band thresholds are chosen for a grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContourConfig {
    /// Explicit thresholds; when non-empty they win over everything else.
    #[serde(default)]
    pub levels: Vec<f64>,
    /// Fixed spacing between thresholds.
    #[serde(default)]
    pub interval: Option<f64>,
    /// Approximate threshold count; `None` uses Sturges' rule on the sample count.
    #[serde(default)]
    pub count: Option<usize>,
    /// Number of Chaikin smoothing passes (0 = no smoothing)
    #[serde(default)]
    pub smoothing_passes: u32,
}

impl Default for ContourConfig {
    fn default() -> Self {
        Self {
            levels: vec![],
            interval: None,
            count: None,
            smoothing_passes: 0,
        }
    }
}

impl ContourConfig {
    /// Thresholds for a field spanning `[min, max]` with `sample_count` values.
    pub fn levels_for(&self, min: f64, max: f64, sample_count: usize) -> Vec<f64> {
        if !self.levels.is_empty() {
            let mut levels: Vec<f64> = self.levels.iter().copied().filter(|l| l.is_finite()).collect();
            levels.sort_by(|a, b| a.total_cmp(b));
            levels.dedup();
            return levels;
        }
        if let Some(interval) = self.interval {
            return generate_contour_levels(min, max, interval);
        }
        let count = self.count.unwrap_or_else(|| sturges(sample_count));
        thresholds(min, max, count)
    }
}

/// Sturges' rule: `ceil(log2(n)) + 1` bins for `n` values.
pub fn sturges(n: usize) -> usize {
    if n == 0 {
        return 1;
    }
    (n as f64).log2().ceil() as usize + 1
}

/// Generate contour levels automatically based on data range and interval
pub fn generate_contour_levels(min_value: f64, max_value: f64, interval: f64) -> Vec<f64> {
    if !(interval > 0.0) || !(max_value > min_value) {
        return vec![];
    }

    // Start from first multiple of interval above min_value
    let first = (min_value / interval).ceil() as i64;
    let last = (max_value / interval).floor() as i64;

    (first..=last).map(|i| i as f64 * interval).collect()
}

/// Nice step size (1, 2 or 5 × 10^k) splitting `[start, stop]` into roughly
/// `count` intervals.
pub fn tick_step(start: f64, stop: f64, count: usize) -> f64 {
    let count = count.max(1) as f64;
    let step0 = (stop - start).abs() / count;
    if !(step0 > 0.0) || !step0.is_finite() {
        return 0.0;
    }
    let mut step1 = 10f64.powf(step0.log10().floor());
    let error = step0 / step1;
    if error >= 50f64.sqrt() {
        step1 *= 10.0;
    } else if error >= 10f64.sqrt() {
        step1 *= 5.0;
    } else if error >= 2f64.sqrt() {
        step1 *= 2.0;
    }
    step1
}

/// Nice thresholds for a field spanning `[min, max]`.
///
/// The range is widened to whole steps and ticked; thresholds at or above
/// `max` are dropped, and of those below `min` only the greatest is kept, so
/// the first band covers the whole field. A flat or non-finite range yields
/// no thresholds.
pub fn thresholds(min: f64, max: f64, count: usize) -> Vec<f64> {
    if !min.is_finite() || !max.is_finite() || !(max > min) {
        return vec![];
    }

    let step = tick_step(min, max, count);
    if !(step > 0.0) {
        return vec![];
    }
    let lo = (min / step).floor() * step;
    let hi = (max / step).ceil() * step;
    let step = tick_step(lo, hi, count);
    if !(step > 0.0) {
        return vec![];
    }

    let mut ticks = ticks_with_step(lo, hi, step);
    while ticks.last().is_some_and(|&t| t >= max) {
        ticks.pop();
    }
    while ticks.len() > 1 && ticks[1] < min {
        ticks.remove(0);
    }
    ticks
}

fn ticks_with_step(start: f64, stop: f64, step: f64) -> Vec<f64> {
    // Divide by the inverse for sub-unit steps to keep ticks like 0.3 exact.
    if step < 1.0 {
        let inv = (1.0 / step).round();
        let first = (start * inv).ceil() as i64;
        let last = (stop * inv).floor() as i64;
        (first..=last).map(|i| i as f64 / inv).collect()
    } else {
        let first = (start / step).ceil() as i64;
        let last = (stop / step).floor() as i64;
        (first..=last).map(|i| i as f64 * step).collect()
    }
}

/// Edge between two neighbouring grid samples. `(x, y)` is the sample with the
/// smaller coordinates; horizontal edges go to `(x + 1, y)`, vertical ones to
/// `(x, y + 1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct EdgeKey {
    x: i64,
    y: i64,
    horizontal: bool,
}

/// Oriented piece of a band boundary inside one cell.
#[derive(Debug, Clone, Copy)]
struct Segment {
    start: EdgeKey,
    end: EdgeKey,
    start_point: Point,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Top,
    Right,
    Bottom,
    Left,
}

use self::Side::{Bottom, Left, Right, Top};

/// Oriented edge pairs for a marching squares case (corner bits: tl = 1,
/// tr = 2, br = 4, bl = 8). The band lies to the left of travel in screen
/// coordinates.
fn cell_sides(case: u8, centre_above: bool) -> &'static [(Side, Side)] {
    match case {
        1 => &[(Left, Top)],
        2 => &[(Top, Right)],
        3 => &[(Left, Right)],
        4 => &[(Right, Bottom)],
        5 if centre_above => &[(Right, Top), (Left, Bottom)],
        5 => &[(Left, Top), (Right, Bottom)],
        6 => &[(Top, Bottom)],
        7 => &[(Left, Bottom)],
        8 => &[(Bottom, Left)],
        9 => &[(Bottom, Top)],
        10 if centre_above => &[(Top, Left), (Bottom, Right)],
        10 => &[(Top, Right), (Bottom, Left)],
        11 => &[(Bottom, Right)],
        12 => &[(Right, Left)],
        13 => &[(Right, Top)],
        14 => &[(Top, Left)],
        _ => &[],
    }
}

/// Grid view with the implicit below-everything border.
struct Field<'a> {
    values: &'a [f64],
    width: usize,
    height: usize,
}

impl Field<'_> {
    /// Finite in-grid value at `(x, y)`.
    fn value(&self, x: i64, y: i64) -> Option<f64> {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return None;
        }
        let v = self.values[y as usize * self.width + x as usize];
        v.is_finite().then_some(v)
    }

    fn above(&self, x: i64, y: i64, threshold: f64) -> bool {
        self.value(x, y).is_some_and(|v| v >= threshold)
    }

    /// Crossing point of the band boundary on an edge.
    fn crossing(&self, edge: EdgeKey, threshold: f64) -> Point {
        let (x2, y2) = if edge.horizontal {
            (edge.x + 1, edge.y)
        } else {
            (edge.x, edge.y + 1)
        };
        let t = match (self.value(edge.x, edge.y), self.value(x2, y2)) {
            (Some(v1), Some(v2)) => interpolate(v1, v2, threshold),
            // Border with the outside (or a gap): halfway
            _ => 0.5,
        };
        let px = edge.x as f64 + 0.5;
        let py = edge.y as f64 + 0.5;
        if edge.horizontal {
            Point::new(px + t, py)
        } else {
            Point::new(px, py + t)
        }
    }
}

/// Fraction of the way from `v1` to `v2` where `threshold` is crossed.
fn interpolate(v1: f64, v2: f64, threshold: f64) -> f64 {
    if (v2 - v1).abs() < 1e-12 {
        // Values are essentially equal, use midpoint
        return 0.5;
    }
    ((threshold - v1) / (v2 - v1)).clamp(0.0, 1.0)
}

fn edge_of(side: Side, x: i64, y: i64) -> EdgeKey {
    match side {
        Top => EdgeKey { x, y, horizontal: true },
        Bottom => EdgeKey { x, y: y + 1, horizontal: true },
        Left => EdgeKey { x, y, horizontal: false },
        Right => EdgeKey { x: x + 1, y, horizontal: false },
    }
}

/// Marching squares over the padded grid for one threshold.
fn march_band(field: &Field<'_>, threshold: f64) -> Vec<Segment> {
    let mut segments = Vec::new();

    for y in -1..field.height as i64 {
        for x in -1..field.width as i64 {
            let mut case = 0u8;
            if field.above(x, y, threshold) {
                case |= 1;
            }
            if field.above(x + 1, y, threshold) {
                case |= 2;
            }
            if field.above(x + 1, y + 1, threshold) {
                case |= 4;
            }
            if field.above(x, y + 1, threshold) {
                case |= 8;
            }
            if case == 0 || case == 15 {
                continue;
            }

            let centre_above = (case == 5 || case == 10) && centre_average(field, x, y) >= threshold;

            for &(from, to) in cell_sides(case, centre_above) {
                let start = edge_of(from, x, y);
                segments.push(Segment {
                    start,
                    end: edge_of(to, x, y),
                    start_point: field.crossing(start, threshold),
                });
            }
        }
    }

    segments
}

fn centre_average(field: &Field<'_>, x: i64, y: i64) -> f64 {
    // Saddles only occur with all four corners present
    let corners = [
        field.value(x, y),
        field.value(x + 1, y),
        field.value(x + 1, y + 1),
        field.value(x, y + 1),
    ];
    corners.iter().map(|v| v.unwrap_or(f64::NEG_INFINITY)).sum::<f64>() / 4.0
}

/// Stitch oriented segments into closed rings by shared edges.
fn stitch(segments: &[Segment]) -> Vec<Ring> {
    let by_start: HashMap<EdgeKey, usize> = segments
        .iter()
        .enumerate()
        .map(|(i, s)| (s.start, i))
        .collect();

    let mut used = vec![false; segments.len()];
    let mut rings = Vec::new();

    for first in 0..segments.len() {
        if used[first] {
            continue;
        }

        let mut ring: Ring = Vec::new();
        let mut current = first;
        loop {
            used[current] = true;
            ring.push(segments[current].start_point);
            match by_start.get(&segments[current].end) {
                Some(&next) if !used[next] => current = next,
                _ => break,
            }
        }

        if ring.len() >= 3 {
            ring.push(ring[0]);
            rings.push(ring);
        }
    }

    rings
}

/// Rings bounding `value >= threshold` for one threshold.
pub fn isoband(values: &[f64], width: usize, height: usize, threshold: f64) -> Vec<Ring> {
    if width == 0 || height == 0 || values.len() != width * height || !threshold.is_finite() {
        return vec![];
    }
    let field = Field {
        values,
        width,
        height,
    };
    stitch(&march_band(&field, threshold))
}

/// One [`PolygonFeature`] per threshold; degenerate grids yield none.
pub fn contour_bands(
    values: &[f64],
    width: usize,
    height: usize,
    thresholds: &[f64],
) -> Vec<PolygonFeature> {
    if width == 0 || height == 0 || values.len() != width * height {
        debug!(
            values = values.len(),
            width = width,
            height = height,
            "Skipping contouring of degenerate grid"
        );
        return vec![];
    }

    let features: Vec<PolygonFeature> = thresholds
        .iter()
        .filter(|t| t.is_finite())
        .map(|&t| PolygonFeature::new(t, isoband(values, width, height, t)))
        .collect();

    debug!(
        thresholds = thresholds.len(),
        rings = features.iter().map(|f| f.rings.len()).sum::<usize>(),
        points = features.iter().map(|f| f.point_count()).sum::<usize>(),
        "Generated contour bands"
    );

    features
}

/// Generate every band for a grid, choosing thresholds and smoothing per `config`.
pub fn generate_all_bands(
    values: &[f64],
    width: usize,
    height: usize,
    config: &ContourConfig,
) -> Vec<PolygonFeature> {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    let Some((min, max)) = finite.iter().fold(None, |acc: Option<(f64, f64)>, &v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    }) else {
        return vec![];
    };

    let levels = config.levels_for(min, max, finite.len());
    let mut features = contour_bands(values, width, height, &levels);

    if config.smoothing_passes > 0 {
        for feature in &mut features {
            for ring in &mut feature.rings {
                *ring = smooth_ring(ring, config.smoothing_passes);
            }
        }
    }

    features
}

/// Apply Chaikin's corner cutting algorithm to a closed ring.
pub fn smooth_ring(ring: &[Point], iterations: u32) -> Ring {
    // Work on the distinct vertices; the closing point is re-added at the end.
    let open = match ring.split_last() {
        Some((last, rest)) if !rest.is_empty() && rest[0] == *last => rest,
        _ => ring,
    };
    if iterations == 0 || open.len() < 3 {
        return ring.to_vec();
    }

    let mut points = open.to_vec();

    for _ in 0..iterations {
        let mut new_points = Vec::with_capacity(points.len() * 2);

        for i in 0..points.len() {
            let p1 = points[i];
            let p2 = points[(i + 1) % points.len()];

            // Create two new points: 25% and 75% along the segment
            new_points.push(Point::new(
                0.75 * p1.x + 0.25 * p2.x,
                0.75 * p1.y + 0.25 * p2.y,
            ));
            new_points.push(Point::new(
                0.25 * p1.x + 0.75 * p2.x,
                0.25 * p1.y + 0.75 * p2.y,
            ));
        }

        points = new_points;
    }

    points.push(points[0]);
    points
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_contour_levels() {
        let levels = generate_contour_levels(0.0, 20.0, 5.0);
        assert_eq!(levels, vec![0.0, 5.0, 10.0, 15.0, 20.0]);

        let levels = generate_contour_levels(2.0, 18.0, 5.0);
        assert_eq!(levels, vec![5.0, 10.0, 15.0]);
    }

    #[test]
    fn test_interpolate() {
        assert!((interpolate(0.0, 10.0, 5.0) - 0.5).abs() < 1e-12);
        assert_eq!(interpolate(0.0, 10.0, 20.0), 1.0);
        assert_eq!(interpolate(3.0, 3.0, 3.0), 0.5);
    }

    #[test]
    fn test_border_crossing_is_midpoint() {
        let values = [1.0];
        let field = Field {
            values: &values,
            width: 1,
            height: 1,
        };
        let p = field.crossing(EdgeKey { x: -1, y: 0, horizontal: true }, 0.5);
        assert_eq!(p, Point::new(0.0, 0.5));
    }

    #[test]
    fn test_tick_step() {
        assert_eq!(tick_step(0.0, 10.0, 10), 1.0);
        assert_eq!(tick_step(0.0, 100.0, 4), 20.0);
        assert_eq!(tick_step(0.0, 1.0, 3), 0.5);
        assert_eq!(tick_step(0.0, 0.0, 3), 0.0);
    }

    #[test]
    fn test_sturges() {
        assert_eq!(sturges(1), 1);
        assert_eq!(sturges(6), 4);
        assert_eq!(sturges(1024), 11);
    }
}
