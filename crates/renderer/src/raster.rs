//! Rasterization of rendered SVG documents with resvg.

use tracing::debug;

use crate::error::RenderError;

/// Rasterize `svg` to a PNG of `width` × `height` pixels.
///
/// The document is scaled uniformly to fit and anchored top-left. System
/// fonts are loaded so label text renders.
pub fn render_png(svg: &str, width: u32, height: u32) -> Result<Vec<u8>, RenderError> {
    let mut opt = usvg::Options::default();
    opt.fontdb_mut().load_system_fonts();

    let tree = usvg::Tree::from_str(svg, &opt)?;

    let mut pixmap =
        tiny_skia::Pixmap::new(width, height).ok_or(RenderError::InvalidSize { width, height })?;

    let size = tree.size();
    let scale = (width as f32 / size.width()).min(height as f32 / size.height());
    let transform = tiny_skia::Transform::from_scale(scale, scale);

    resvg::render(&tree, transform, &mut pixmap.as_mut());

    let png = pixmap
        .encode_png()
        .map_err(|e| RenderError::Encode(e.to_string()))?;

    debug!(width = width, height = height, bytes = png.len(), "Rasterized SVG");

    Ok(png)
}
