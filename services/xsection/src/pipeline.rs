//! Samples to labeled, colored cross-section.
//!
//! Stages: grid the samples, pick thresholds, extract filled bands, scale
//! them into the plotting area, cut the band boundaries into label
//! candidates and cull those to a readable set.

use cross_section::{
    axes, build_grid, scale_features, segment_rings, CullStrategy, Grid, LineSegment,
    PolygonFeature, Sample,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use renderer::{generate_all_bands, ContourConfig, RenderError, RenderOptions, Scene, SequentialScale};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// How a cross-section is contoured, labeled and drawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    pub contours: ContourConfig,
    pub cull: CullStrategy,
    pub options: RenderOptions,
    /// Fixed seed for label priorities; random when unset.
    pub seed: Option<u64>,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            contours: ContourConfig::default(),
            cull: CullStrategy::default(),
            options: RenderOptions::default(),
            seed: None,
        }
    }
}

impl RenderSettings {
    /// Same settings with the greedy culler at `threshold` pixels.
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.cull = CullStrategy::Greedy { threshold };
        self
    }
}

/// A computed cross-section, ready to draw.
#[derive(Debug, Clone)]
pub struct CrossSection {
    pub grid: Grid,
    /// Bands in plotting-area pixels, ascending by threshold.
    pub features: Vec<PolygonFeature>,
    /// Culled label positions in plotting-area pixels.
    pub labels: Vec<LineSegment>,
    /// Label candidates before culling.
    pub candidate_count: usize,
    pub scale: SequentialScale,
    pub options: RenderOptions,
}

impl CrossSection {
    /// Run the whole pipeline on scattered samples.
    ///
    /// Position runs along `x` and level along `z`. A grid that is empty or
    /// not rectangular yields no bands and no labels.
    pub fn compute(samples: &[Sample], settings: &RenderSettings) -> Self {
        let grid = build_grid(samples, axes::X, axes::Z);
        let (min, max) = grid.value_range().unwrap_or((0.0, 1.0));
        let scale = SequentialScale::blues(min, max);

        let empty = |grid: Grid, scale: SequentialScale| Self {
            grid,
            features: Vec::new(),
            labels: Vec::new(),
            candidate_count: 0,
            scale,
            options: settings.options.clone(),
        };

        if grid.is_empty() {
            debug!(samples = samples.len(), "No finite samples to contour");
            return empty(grid, scale);
        }
        if !grid.is_rectangular() {
            warn!(
                values = grid.values.len(),
                width = grid.width,
                height = grid.height,
                "Samples do not form a rectangular grid, skipping contours"
            );
            return empty(grid, scale);
        }

        let bands = generate_all_bands(&grid.values, grid.width, grid.height, &settings.contours);
        let features = scale_features(
            &bands,
            settings.options.inner_width() / grid.width as f64,
            settings.options.inner_height() / grid.height as f64,
        );

        let candidates = segment_rings(&features);
        let labels = match settings.seed {
            Some(seed) => settings
                .cull
                .apply(&candidates, &mut StdRng::seed_from_u64(seed)),
            None => settings.cull.apply(&candidates, &mut rand::thread_rng()),
        };

        debug!(
            width = grid.width,
            height = grid.height,
            bands = features.len(),
            candidates = candidates.len(),
            labels = labels.len(),
            "Computed cross-section"
        );

        Self {
            grid,
            features,
            labels,
            candidate_count: candidates.len(),
            scale,
            options: settings.options.clone(),
        }
    }

    /// Band thresholds, ascending.
    pub fn thresholds(&self) -> Vec<f64> {
        self.features.iter().map(|f| f.value).collect()
    }

    pub fn render_svg(&self) -> String {
        let scene = Scene {
            features: &self.features,
            labels: &self.labels,
            scale: &self.scale,
        };
        renderer::render_svg(&scene, &self.options)
    }

    /// Rasterize at the document's own size.
    pub fn render_png(&self) -> Result<Vec<u8>, RenderError> {
        renderer::render_png(
            &self.render_svg(),
            self.options.width.round() as u32,
            self.options.height.round() as u32,
        )
    }
}
