//! SVG output: filled bands plus rotated value labels.

use std::fmt::Write as _;

use cross_section::{LineSegment, PolygonFeature, Ring};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::color::SequentialScale;

/// Space around the plotting area, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Margin {
    fn default() -> Self {
        Self {
            top: 30.0,
            right: 30.0,
            bottom: 70.0,
            left: 60.0,
        }
    }
}

/// Document layout and label styling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Outer document width, margins included.
    pub width: f64,
    /// Outer document height, margins included.
    pub height: f64,
    pub margin: Margin,
    pub font_size: f64,
    pub label_color: String,
    /// Draw a white outline behind label text.
    pub halo: bool,
    pub background: Option<String>,
    pub title: Option<String>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: 460.0,
            height: 400.0,
            margin: Margin::default(),
            font_size: 10.0,
            label_color: "#000000".to_string(),
            halo: true,
            background: Some("#ffffff".to_string()),
            title: None,
        }
    }
}

impl RenderOptions {
    /// Width of the plotting area.
    pub fn inner_width(&self) -> f64 {
        (self.width - self.margin.left - self.margin.right).max(0.0)
    }

    /// Height of the plotting area.
    pub fn inner_height(&self) -> f64 {
        (self.height - self.margin.top - self.margin.bottom).max(0.0)
    }
}

/// Everything drawn in one frame. Ring and label coordinates are in
/// plotting-area pixels.
#[derive(Debug, Clone, Copy)]
pub struct Scene<'a> {
    pub features: &'a [PolygonFeature],
    pub labels: &'a [LineSegment],
    pub scale: &'a SequentialScale,
}

/// Label text: whole numbers without decimals, otherwise one decimal.
pub fn format_label(value: f64) -> String {
    if value.fract().abs() < 0.01 {
        let rounded = value.round();
        // Avoid "-0"
        if rounded == 0.0 {
            return "0".to_string();
        }
        format!("{:.0}", rounded)
    } else {
        format!("{:.1}", value)
    }
}

fn ring_path(out: &mut String, ring: &Ring) {
    let mut cmd = 'M';
    for p in ring.iter().filter(|p| p.x.is_finite() && p.y.is_finite()) {
        let _ = write!(out, "{}{:.2},{:.2}", cmd, p.x, p.y);
        cmd = 'L';
    }
    out.push('Z');
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Render a scene to an SVG document.
///
/// Bands are painted in the given order with their scale color, then every
/// label is drawn at its midpoint, rotated by `angle + π` so the text runs
/// along the band boundary.
pub fn render_svg(scene: &Scene<'_>, options: &RenderOptions) -> String {
    let mut svg = String::with_capacity(4096);

    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = options.width,
        h = options.height
    );

    if let Some(bg) = &options.background {
        let _ = writeln!(
            svg,
            r#"<rect width="100%" height="100%" fill="{}"/>"#,
            escape(bg)
        );
    }

    if let Some(title) = &options.title {
        let _ = writeln!(
            svg,
            r#"<text x="{}" y="{}" font-family="sans-serif" font-size="{}">{}</text>"#,
            options.margin.left,
            options.margin.top * 0.66,
            options.font_size * 1.4,
            escape(title)
        );
    }

    let _ = writeln!(
        svg,
        r#"<g transform="translate({},{})">"#,
        options.margin.left, options.margin.top
    );

    let mut drawn = 0usize;
    for feature in scene.features {
        if feature.rings.is_empty() {
            continue;
        }
        let mut d = String::new();
        for ring in &feature.rings {
            if ring.len() >= 2 {
                ring_path(&mut d, ring);
            }
        }
        if d.is_empty() {
            continue;
        }
        let _ = writeln!(
            svg,
            r#"<path d="{}" fill="{}" fill-rule="evenodd" stroke="none" data-value="{}"/>"#,
            d,
            scene.scale.color(feature.value).to_hex(),
            feature.value
        );
        drawn += 1;
    }

    let halo = if options.halo {
        r##" stroke="#ffffff" stroke-width="3" stroke-linejoin="round" paint-order="stroke""##
    } else {
        ""
    };
    for label in scene.labels {
        if !label.mid.x.is_finite() || !label.mid.y.is_finite() {
            continue;
        }
        let rotation = (label.angle + std::f64::consts::PI).to_degrees();
        let _ = writeln!(
            svg,
            r#"<text transform="translate({:.2},{:.2}) rotate({:.2})" text-anchor="middle" dominant-baseline="central" font-family="sans-serif" font-size="{}" fill="{}"{}>{}</text>"#,
            label.mid.x,
            label.mid.y,
            rotation,
            options.font_size,
            escape(&options.label_color),
            halo,
            format_label(label.value)
        );
    }

    svg.push_str("</g>\n</svg>\n");

    debug!(
        bands = drawn,
        labels = scene.labels.len(),
        bytes = svg.len(),
        "Rendered SVG"
    );

    svg
}
