//! Path editing.

use axum::{http::StatusCode, response::Response, Json};
use edr_protocol::{EdrError, TrajectoryQuery};
use serde::{Deserialize, Serialize};

use super::{error_response, json_response};

#[derive(Debug, Deserialize)]
pub struct TranslateRequest {
    /// WKT LINESTRING.
    pub coords: String,
    /// Longitude offset in degrees.
    #[serde(default)]
    pub dlon: f64,
    /// Latitude offset in degrees.
    #[serde(default)]
    pub dlat: f64,
}

#[derive(Debug, Serialize)]
pub struct TranslateResponse {
    pub coords: String,
    pub waypoints: usize,
}

/// POST /path/translate
///
/// Moves every waypoint of a path by the same offset and returns the new
/// WKT, the way a dragged path is re-encoded before it is queried again.
pub async fn translate_handler(Json(request): Json<TranslateRequest>) -> Response {
    let moved = TrajectoryQuery::from_wkt(&request.coords)
        .and_then(|q| q.translated(request.dlon, request.dlat));

    match moved {
        Ok(query) => json_response(
            StatusCode::OK,
            &TranslateResponse {
                coords: query.to_wkt(),
                waypoints: query.len(),
            },
        ),
        Err(e) => error_response(&EdrError::from(e)),
    }
}
