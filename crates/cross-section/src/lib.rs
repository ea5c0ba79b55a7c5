//! Geometry core for labeled contour cross-sections.
//!
//! The pipeline turns scattered (position, level, value) samples into a
//! regular grid, and turns the rings of contoured bands into a readable set
//! of label positions:
//!
//! - [`build_grid`]: scattered samples to a row-major [`Grid`]
//! - [`segment_rings`]: band rings to [`LineSegment`] label candidates
//! - [`cull_labels`]: greedy selection of well-separated candidates
//!
//! Contour extraction itself lives in the `renderer` crate.
//!
//! # Example
//!
//! ```rust
//! use cross_section::{build_grid, cull_labels, segment_rings, Point, PolygonFeature, Sample};
//!
//! let samples: Vec<Sample> = (0..6)
//!     .map(|i| {
//!         Sample::new(Some(i as f64))
//!             .with_coord("x", (i % 3) as f64)
//!             .with_coord("z", (i / 3) as f64)
//!     })
//!     .collect();
//! let grid = build_grid(&samples, "x", "z");
//! assert_eq!((grid.width, grid.height), (3, 2));
//!
//! let ring = vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(0.0, 0.0)];
//! let segments = segment_rings(&[PolygonFeature::new(5.0, vec![ring])]);
//! let labels = cull_labels(&segments, 0.0);
//! assert_eq!(labels.len(), 2);
//! ```

pub mod cull;
pub mod grid;
pub mod sample;
pub mod segment;
pub mod types;

pub use cull::{cull_labels, cull_labels_with_rng, cull_uniform_grid, CullStrategy};
pub use grid::{build_grid, Grid};
pub use sample::{Coordinate, Sample};
pub use segment::{scale_features, segment_rings};
pub use types::{LineSegment, Point, PolygonFeature, Ring};

/// Axis names used by EDR trajectory coverages.
pub mod axes {
    /// Longitude / horizontal position along the path.
    pub const X: &str = "x";
    /// Latitude.
    pub const Y: &str = "y";
    /// Vertical level.
    pub const Z: &str = "z";
    /// Time.
    pub const T: &str = "t";
}
