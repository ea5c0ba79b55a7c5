//! HTTP client for one EDR collection.

use std::time::Duration;

use cross_section::Sample;
use edr_protocol::{media_types, CoverageCollection, EdrError, Instance, InstanceList, TrajectoryQuery};
use reqwest::{header, Client};
use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::decode;

/// Samples fetched for one cross-section request.
#[derive(Debug, Clone, Serialize)]
pub struct FetchedSection {
    pub instance_id: String,
    pub datetime: Option<String>,
    pub parameter: String,
    #[serde(skip)]
    pub samples: Vec<Sample>,
}

/// Client for the instances and trajectory endpoints of a collection.
#[derive(Debug, Clone)]
pub struct EdrClient {
    client: Client,
    base_url: String,
}

impl EdrClient {
    /// Create a client for the collection at `base_url`.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, EdrError> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| EdrError::InternalError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_text(&self, url: &str, query: &[(String, String)]) -> Result<String, EdrError> {
        let response = self
            .client
            .get(url)
            .query(query)
            .header(header::ACCEPT, media_types::JSON)
            .send()
            .await
            .map_err(|e| EdrError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(EdrError::Upstream {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        response
            .text()
            .await
            .map_err(|e| EdrError::Request(e.to_string()))
    }

    /// GET `{base}/instances`.
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    pub async fn instances(&self) -> Result<InstanceList, EdrError> {
        let url = format!("{}/instances", self.base_url);
        let body = self.get_text(&url, &[]).await?;
        let list: InstanceList =
            serde_json::from_str(&body).map_err(|e| EdrError::InvalidResponse(e.to_string()))?;
        debug!(count = list.instances.len(), "Fetched instances");
        Ok(list)
    }

    /// The newest model run.
    pub async fn latest_instance(&self) -> Result<Instance, EdrError> {
        self.instances()
            .await?
            .latest()
            .cloned()
            .ok_or_else(|| EdrError::InstanceNotFound(self.base_url.clone()))
    }

    /// GET `{base}/instances/{id}/trajectory` with the query's parameters.
    #[instrument(skip(self, query), fields(base_url = %self.base_url, waypoints = query.len()))]
    pub async fn trajectory(
        &self,
        instance_id: &str,
        query: &TrajectoryQuery,
    ) -> Result<CoverageCollection, EdrError> {
        let url = format!("{}/instances/{}/trajectory", self.base_url, instance_id);
        let body = self.get_text(&url, &query.to_query_pairs()).await?;
        CoverageCollection::from_json_str(&body)
    }

    /// Resolve the latest run and fetch samples along `coords`.
    ///
    /// Without a requested parameter the first one the run offers is used.
    /// The run's first valid time and all its vertical levels are requested.
    pub async fn fetch_section(
        &self,
        coords: &str,
        parameter: Option<&str>,
    ) -> Result<FetchedSection, EdrError> {
        let path = TrajectoryQuery::from_wkt(coords)?;
        let instance = self.latest_instance().await?;

        let offered = instance.parameter_ids();
        let parameter = match parameter {
            Some(p) if offered.is_empty() || offered.contains(&p) => p.to_string(),
            Some(p) => return Err(EdrError::ParameterNotFound(p.to_string())),
            None => offered
                .first()
                .map(|p| p.to_string())
                .ok_or_else(|| EdrError::ParameterNotFound("no parameters offered".to_string()))?,
        };

        let mut query = path.with_parameter(parameter.clone());
        if let Some(datetime) = instance.datetime() {
            query = query.with_datetime(datetime);
        }
        let levels = instance
            .extent
            .as_ref()
            .and_then(|e| e.vertical.as_ref())
            .map(|v| v.levels())
            .unwrap_or_default();
        if !levels.is_empty() {
            query = query.with_levels(levels);
        }

        let collection = self.trajectory(&instance.id, &query).await?;
        let samples = decode::samples_from_collection(&collection, &parameter)?;

        info!(
            instance = %instance.id,
            parameter = %parameter,
            samples = samples.len(),
            "Fetched cross-section samples"
        );

        Ok(FetchedSection {
            instance_id: instance.id.clone(),
            datetime: instance.datetime().map(str::to_string),
            parameter,
            samples,
        })
    }
}
