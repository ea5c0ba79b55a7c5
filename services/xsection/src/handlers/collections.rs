//! Collection listing and parameter discovery.

use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::Response,
};
use edr_protocol::EdrError;
use serde::Serialize;

use super::{error_response, json_response};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct CollectionSummary {
    pub id: String,
    pub title: String,
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct CollectionsResponse {
    pub collections: Vec<CollectionSummary>,
}

#[derive(Debug, Serialize)]
pub struct ParameterSummary {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ParametersResponse {
    pub collection: String,
    pub instance: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datetime: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub levels: Option<String>,
    pub parameters: Vec<ParameterSummary>,
}

/// GET /collections
pub async fn list_collections_handler(Extension(state): Extension<Arc<AppState>>) -> Response {
    let collections = state
        .config
        .services
        .iter()
        .map(|s| CollectionSummary {
            id: s.id.clone(),
            title: s.title.clone(),
            url: s.url.clone(),
        })
        .collect();
    json_response(StatusCode::OK, &CollectionsResponse { collections })
}

/// GET /collections/:collection_id/parameters
///
/// Parameters of the newest run, sorted by id.
pub async fn parameters_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path(collection_id): Path<String>,
) -> Response {
    let Some(client) = state.client(&collection_id) else {
        return error_response(&EdrError::CollectionNotFound(collection_id));
    };

    let instance = match client.latest_instance().await {
        Ok(instance) => instance,
        Err(e) => return error_response(&e),
    };

    let parameters = instance
        .parameter_names
        .iter()
        .map(|(id, p)| ParameterSummary {
            id: id.clone(),
            label: p.display_label().map(str::to_string),
            unit: p.unit_symbol().map(str::to_string),
        })
        .collect();

    json_response(
        StatusCode::OK,
        &ParametersResponse {
            collection: collection_id,
            datetime: instance.datetime().map(str::to_string),
            levels: instance.vertical_levels(),
            instance: instance.id,
            parameters,
        },
    )
}
