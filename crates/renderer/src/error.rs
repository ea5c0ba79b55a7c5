//! Rendering errors.

use thiserror::Error;

/// Errors from turning a scene into an image.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Failed to parse SVG: {0}")]
    Svg(#[from] usvg::Error),

    #[error("Invalid image size {width}x{height}")]
    InvalidSize { width: u32, height: u32 },

    #[error("PNG encoding failed: {0}")]
    Encode(String),
}
