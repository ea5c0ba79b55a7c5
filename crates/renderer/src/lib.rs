//! Image rendering for contour cross-sections.
//!
//! Implements the drawing side of the pipeline:
//! - Filled contour bands (marching squares isobands)
//! - Nice threshold generation
//! - Sequential color scales
//! - SVG documents with rotated value labels, rasterized to PNG with resvg

pub mod color;
pub mod contour;
pub mod error;
pub mod raster;
pub mod svg;

pub use color::{Color, SequentialScale};
pub use contour::{contour_bands, generate_all_bands, thresholds, ContourConfig};
pub use error::RenderError;
pub use raster::render_png;
pub use svg::{format_label, render_svg, Margin, RenderOptions, Scene};
