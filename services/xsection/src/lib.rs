//! Cross-Section Service Library
//!
//! Fetches EDR trajectory data, contours it and renders labeled
//! cross-sections, either from the command line or over HTTP.

pub mod client;
pub mod config;
pub mod decode;
pub mod handlers;
pub mod pipeline;
pub mod state;

use axum::{
    routing::{get, post},
    Extension, Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;

/// Build the HTTP router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health_handler))
        .route(
            "/collections",
            get(handlers::collections::list_collections_handler),
        )
        .route(
            "/collections/:collection_id/parameters",
            get(handlers::collections::parameters_handler),
        )
        .route(
            "/collections/:collection_id/cross-section",
            get(handlers::cross_section::cross_section_handler),
        )
        .route("/path/translate", post(handlers::path::translate_handler))
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
