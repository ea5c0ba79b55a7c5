//! Test data generators for synthetic cross-section data.
//!
//! These generators create predictable, verifiable patterns that can be used
//! across the test suite.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// One scattered sample as `(x, z, value)`.
pub type Triple = (f64, f64, Option<f64>);

/// Creates a presorted cross-section: every `z` level crossed with every `x`
/// position, ordered by `z` ascending then `x` ascending.
///
/// # Example
///
/// ```
/// use test_utils::cross_section_triples;
///
/// let t = cross_section_triples(&[0.0, 1.0, 2.0], &[100.0, 200.0], |x, z| x + z);
/// assert_eq!(t.len(), 6);
/// assert_eq!(t[0], (0.0, 100.0, Some(100.0)));
/// assert_eq!(t[3], (0.0, 200.0, Some(200.0)));
/// ```
pub fn cross_section_triples<F>(xs: &[f64], zs: &[f64], f: F) -> Vec<Triple>
where
    F: Fn(f64, f64) -> f64,
{
    let mut out = Vec::with_capacity(xs.len() * zs.len());
    for &z in zs {
        for &x in xs {
            out.push((x, z, Some(f(x, z))));
        }
    }
    out
}

/// Returns `items` in a reproducible random order.
pub fn scrambled<T: Clone>(items: &[T], seed: u64) -> Vec<T> {
    let mut out = items.to_vec();
    out.shuffle(&mut StdRng::seed_from_u64(seed));
    out
}

/// Creates a test grid with predictable values.
///
/// Each cell value is `col * 1000 + row`, in row-major order.
pub fn create_test_grid(width: usize, height: usize) -> Vec<f64> {
    let mut data = Vec::with_capacity(width * height);
    for row in 0..height {
        for col in 0..width {
            data.push((col * 1000 + row) as f64);
        }
    }
    data
}

/// Creates a grid with a single smooth peak in the middle.
///
/// Values fall from 100 at the centre towards 0 at the corners.
pub fn create_peak_grid(width: usize, height: usize) -> Vec<f64> {
    let cx = (width as f64 - 1.0) / 2.0;
    let cy = (height as f64 - 1.0) / 2.0;
    let max_dist = (cx * cx + cy * cy).sqrt().max(1e-9);

    let mut data = Vec::with_capacity(width * height);
    for row in 0..height {
        for col in 0..width {
            let dx = col as f64 - cx;
            let dy = row as f64 - cy;
            let dist = (dx * dx + dy * dy).sqrt();
            data.push(100.0 * (1.0 - dist / max_dist));
        }
    }
    data
}

/// Creates a temperature-like cross-section grid in Kelvin: warm near the
/// surface (last rows), cold aloft, with a gentle wave along the path.
pub fn create_temperature_section(width: usize, height: usize) -> Vec<f64> {
    let mut data = Vec::with_capacity(width * height);
    for row in 0..height {
        for col in 0..width {
            let level = row as f64 / height.max(1) as f64;
            let along = col as f64 / width.max(1) as f64;
            let wave = (along * std::f64::consts::PI * 2.0).sin() * 4.0;
            data.push(220.0 + level * 70.0 + wave);
        }
    }
    data
}

/// Creates a grid filled with one value.
pub fn create_constant_grid(width: usize, height: usize, value: f64) -> Vec<f64> {
    vec![value; width * height]
}

/// Closed axis-aligned square ring, counter-clockwise, first point repeated.
pub fn square_ring(x0: f64, y0: f64, size: f64) -> Vec<[f64; 2]> {
    vec![
        [x0, y0],
        [x0 + size, y0],
        [x0 + size, y0 + size],
        [x0, y0 + size],
        [x0, y0],
    ]
}

/// Closed polygonal approximation of a circle with `n` distinct vertices.
pub fn circle_ring(cx: f64, cy: f64, radius: f64, n: usize) -> Vec<[f64; 2]> {
    let n = n.max(3);
    let mut ring: Vec<[f64; 2]> = (0..n)
        .map(|i| {
            let a = i as f64 / n as f64 * std::f64::consts::TAU;
            [cx + radius * a.cos(), cy + radius * a.sin()]
        })
        .collect();
    ring.push(ring[0]);
    ring
}

/// Midpoints scattered around `clusters` random centres inside a
/// `extent` × `extent` square, `per_cluster` points each within `spread`.
pub fn clustered_midpoints(
    clusters: usize,
    per_cluster: usize,
    spread: f64,
    extent: f64,
    seed: u64,
) -> Vec<[f64; 2]> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut points = Vec::with_capacity(clusters * per_cluster);
    for _ in 0..clusters {
        let cx = rng.gen_range(0.0..extent);
        let cy = rng.gen_range(0.0..extent);
        for _ in 0..per_cluster {
            points.push([
                cx + rng.gen_range(-spread..=spread),
                cy + rng.gen_range(-spread..=spread),
            ]);
        }
    }
    points
}
