//! Cross-section rendering handler.
//!
//! Fetches the newest run of a collection along a path, contours the
//! returned samples and answers with an SVG, a PNG, or a JSON summary of
//! the bands and label positions.

use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use edr_protocol::EdrError;
use serde::{Deserialize, Serialize};

use super::{error_response, json_response};
use crate::pipeline::CrossSection;
use crate::state::AppState;

/// Query parameters for the cross-section endpoint.
#[derive(Debug, Deserialize)]
pub struct CrossSectionParams {
    /// Parameter to plot; the first offered one when absent.
    pub parameter: Option<String>,

    /// Path as WKT LINESTRING; the configured default path when absent.
    pub coords: Option<String>,

    /// svg (default), png or json.
    pub format: Option<String>,

    /// Minimum label spacing in pixels.
    pub threshold: Option<f64>,
}

/// Output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Svg,
    Png,
    Json,
}

impl OutputFormat {
    pub fn parse(value: Option<&str>) -> Result<Self, EdrError> {
        match value.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
            None | Some("") | Some("svg") => Ok(OutputFormat::Svg),
            Some("png") => Ok(OutputFormat::Png),
            Some("json") => Ok(OutputFormat::Json),
            Some(other) => Err(EdrError::UnsupportedFormat(other.to_string())),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LabelSummary {
    pub x: f64,
    pub y: f64,
    pub angle: f64,
    pub value: f64,
}

#[derive(Debug, Serialize)]
pub struct CrossSectionSummary {
    pub instance: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datetime: Option<String>,
    pub parameter: String,
    pub width: usize,
    pub height: usize,
    pub thresholds: Vec<f64>,
    pub candidates: usize,
    pub labels: Vec<LabelSummary>,
}

/// GET /collections/:collection_id/cross-section
pub async fn cross_section_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path(collection_id): Path<String>,
    Query(params): Query<CrossSectionParams>,
) -> Response {
    let format = match OutputFormat::parse(params.format.as_deref()) {
        Ok(format) => format,
        Err(e) => return error_response(&e),
    };

    let Some(client) = state.client(&collection_id) else {
        return error_response(&EdrError::CollectionNotFound(collection_id));
    };

    let coords = params
        .coords
        .as_deref()
        .filter(|c| !c.trim().is_empty())
        .unwrap_or(state.config.default_path.as_str());

    let mut fetched = match client.fetch_section(coords, params.parameter.as_deref()).await {
        Ok(fetched) => fetched,
        Err(e) => return error_response(&e),
    };

    let mut settings = state.config.render.clone();
    if let Some(threshold) = params.threshold {
        settings = settings.with_threshold(threshold);
    }

    // Contouring and rasterizing are CPU-bound.
    let samples = std::mem::take(&mut fetched.samples);
    let computed = tokio::task::spawn_blocking(move || {
        let section = CrossSection::compute(&samples, &settings);
        let body = match format {
            OutputFormat::Svg => Ok(section.render_svg().into_bytes()),
            OutputFormat::Png => section.render_png(),
            OutputFormat::Json => Ok(Vec::new()),
        };
        (section, body)
    })
    .await;

    let (section, body) = match computed {
        Ok(result) => result,
        Err(e) => return error_response(&EdrError::InternalError(e.to_string())),
    };
    let body = match body {
        Ok(body) => body,
        Err(e) => return error_response(&EdrError::InternalError(e.to_string())),
    };

    match format {
        OutputFormat::Svg => {
            (StatusCode::OK, [(header::CONTENT_TYPE, "image/svg+xml")], body).into_response()
        }
        OutputFormat::Png => {
            (StatusCode::OK, [(header::CONTENT_TYPE, "image/png")], body).into_response()
        }
        OutputFormat::Json => json_response(
            StatusCode::OK,
            &CrossSectionSummary {
                instance: fetched.instance_id,
                datetime: fetched.datetime,
                parameter: fetched.parameter,
                width: section.grid.width,
                height: section.grid.height,
                thresholds: section.thresholds(),
                candidates: section.candidate_count,
                labels: section
                    .labels
                    .iter()
                    .map(|l| LabelSummary {
                        x: l.mid.x,
                        y: l.mid.y,
                        angle: l.angle,
                        value: l.value,
                    })
                    .collect(),
            },
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_parse() {
        assert_eq!(OutputFormat::parse(None).unwrap(), OutputFormat::Svg);
        assert_eq!(OutputFormat::parse(Some("PNG")).unwrap(), OutputFormat::Png);
        assert_eq!(OutputFormat::parse(Some("json")).unwrap(), OutputFormat::Json);
        assert!(matches!(
            OutputFormat::parse(Some("gif")),
            Err(EdrError::UnsupportedFormat(_))
        ));
    }
}
