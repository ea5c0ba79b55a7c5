//! EDR client error types.

use serde::Serialize;
use thiserror::Error;

use crate::queries::CoordinateParseError;

/// Errors that can occur while querying an EDR service.
#[derive(Debug, Error)]
pub enum EdrError {
    /// Collection not configured.
    #[error("Collection not found: {0}")]
    CollectionNotFound(String),

    /// The collection has no instances.
    #[error("Instance not found: {0}")]
    InstanceNotFound(String),

    /// Parameter not found.
    #[error("Parameter not found: {0}")]
    ParameterNotFound(String),

    /// Invalid query parameter.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Coordinate parsing error.
    #[error("Coordinate error: {0}")]
    CoordinateError(#[from] CoordinateParseError),

    /// No data available for the query.
    #[error("No data available: {0}")]
    NoDataAvailable(String),

    /// Unsupported output format.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Upstream answered with a non-success status.
    #[error("Upstream returned {status} for {url}")]
    Upstream { status: u16, url: String },

    /// Upstream could not be reached.
    #[error("Request failed: {0}")]
    Request(String),

    /// Upstream body is not the expected document.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// JSON error body returned by HTTP handlers.
#[derive(Debug, Clone, Serialize)]
pub struct ExceptionResponse {
    pub code: u16,
    pub description: String,
}

impl EdrError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            EdrError::CollectionNotFound(_) => 404,
            EdrError::InstanceNotFound(_) => 404,
            EdrError::ParameterNotFound(_) => 404,
            EdrError::InvalidParameter(_) => 400,
            EdrError::CoordinateError(_) => 400,
            EdrError::NoDataAvailable(_) => 404,
            EdrError::UnsupportedFormat(_) => 400,
            EdrError::Upstream { .. } => 502,
            EdrError::Request(_) => 502,
            EdrError::InvalidResponse(_) => 502,
            EdrError::InternalError(_) => 500,
        }
    }

    /// Convert to an ExceptionResponse.
    pub fn to_exception(&self) -> ExceptionResponse {
        ExceptionResponse {
            code: self.status_code(),
            description: self.to_string(),
        }
    }
}
