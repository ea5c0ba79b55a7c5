//! Sequential color scales for filled contour bands.

use serde::{Deserialize, Serialize};

/// Color value in RGBA format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn transparent() -> Self {
        Self { r: 0, g: 0, b: 0, a: 0 }
    }

    /// Opaque color from a `0xRRGGBB` literal.
    pub const fn from_rgb_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as u8,
            g: ((hex >> 8) & 0xff) as u8,
            b: (hex & 0xff) as u8,
            a: 255,
        }
    }

    /// `#rrggbb`, as used in SVG `fill` attributes.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// ColorBrewer "Blues", light to dark.
pub const BLUES: [Color; 9] = [
    Color::from_rgb_hex(0xf7fbff),
    Color::from_rgb_hex(0xdeebf7),
    Color::from_rgb_hex(0xc6dbef),
    Color::from_rgb_hex(0x9ecae1),
    Color::from_rgb_hex(0x6baed6),
    Color::from_rgb_hex(0x4292c6),
    Color::from_rgb_hex(0x2171b5),
    Color::from_rgb_hex(0x08519c),
    Color::from_rgb_hex(0x08306b),
];

/// Linear color interpolation
pub fn interpolate_color(color1: Color, color2: Color, t: f64) -> Color {
    let t = t.clamp(0.0, 1.0);
    let t_inv = 1.0 - t;
    let mix = |a: u8, b: u8| (a as f64 * t_inv + b as f64 * t).round() as u8;

    Color::new(
        mix(color1.r, color2.r),
        mix(color1.g, color2.g),
        mix(color1.b, color2.b),
        mix(color1.a, color2.a),
    )
}

/// Maps a numeric domain onto evenly spaced color stops.
#[derive(Debug, Clone, PartialEq)]
pub struct SequentialScale {
    min: f64,
    max: f64,
    stops: Vec<Color>,
}

impl SequentialScale {
    /// Scale over `stops`; needs at least one stop to produce colors.
    pub fn new(min: f64, max: f64, stops: Vec<Color>) -> Self {
        Self { min, max, stops }
    }

    pub fn blues(min: f64, max: f64) -> Self {
        Self::new(min, max, BLUES.to_vec())
    }

    pub fn domain(&self) -> (f64, f64) {
        (self.min, self.max)
    }

    /// Position of `value` in the domain, clamped to `[0, 1]`. A degenerate
    /// domain maps everything to the middle.
    pub fn normalize(&self, value: f64) -> f64 {
        let span = self.max - self.min;
        if !(span.abs() > 0.0) || !span.is_finite() {
            return 0.5;
        }
        ((value - self.min) / span).clamp(0.0, 1.0)
    }

    /// Color for `value`; NaN is transparent.
    pub fn color(&self, value: f64) -> Color {
        if value.is_nan() || self.stops.is_empty() {
            return Color::transparent();
        }
        if self.stops.len() == 1 {
            return self.stops[0];
        }

        let t = self.normalize(value) * (self.stops.len() - 1) as f64;
        let i = (t.floor() as usize).min(self.stops.len() - 2);
        interpolate_color(self.stops[i], self.stops[i + 1], t - i as f64)
    }
}
