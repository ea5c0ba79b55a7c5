//! HTTP request handlers.

pub mod collections;
pub mod cross_section;
pub mod health;
pub mod path;

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use edr_protocol::{media_types, EdrError};
use serde::Serialize;

/// JSON error body with the status the error maps to.
pub(crate) fn error_response(err: &EdrError) -> Response {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    if status.is_server_error() {
        tracing::error!(error = %err, "Request failed");
    } else {
        tracing::debug!(error = %err, "Request rejected");
    }
    json_response(status, &err.to_exception())
}

pub(crate) fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Response {
    let json = serde_json::to_string(body).unwrap_or_default();
    (status, [(header::CONTENT_TYPE, media_types::JSON)], json).into_response()
}
