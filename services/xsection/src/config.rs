//! Service configuration loading and types.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::pipeline::RenderSettings;

/// Path shown when a request gives none: east-west along 66.2°N.
pub const DEFAULT_PATH: &str = "LINESTRING(7 66.2,8 66.2,9 66.2,10 66.2,11 66.2,12 66.2,12 66.2,13 66.2,14 66.2,15 66.2,16 66.2,17 66.2,18 66.2,19 66.2,20 66.2,21 66.2,22 66.2)";

/// Configuration loaded from a YAML file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct XsectionConfig {
    /// EDR collections offered for cross-sections.
    #[serde(default = "default_services")]
    pub services: Vec<ServiceDefinition>,

    /// WKT path used when a request names none.
    #[serde(default = "default_path")]
    pub default_path: String,

    /// Upstream request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,

    #[serde(default)]
    pub render: RenderSettings,
}

/// One EDR collection endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceDefinition {
    /// Identifier used in routes and on the command line.
    pub id: String,

    /// Human-readable title.
    #[serde(default)]
    pub title: String,

    /// Collection URL; `/instances` is appended to it.
    pub url: String,
}

impl ServiceDefinition {
    fn new(id: &str, title: &str, url: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            url: url.to_string(),
        }
    }
}

fn default_services() -> Vec<ServiceDefinition> {
    vec![
        ServiceDefinition::new(
            "ecmwf_painepinta",
            "FMI ECMWF Painepinta",
            "https://opendata.fmi.fi/edr/collections/ecmwf_painepinta",
        ),
        ServiceDefinition::new(
            "harmonie_scandinavia_hybrid",
            "FMI Harmonie Scandinavia Hybrid",
            "https://opendata.fmi.fi/edr/collections/harmonie_scandinavia_hybrid",
        ),
    ]
}

fn default_path() -> String {
    DEFAULT_PATH.to_string()
}

fn default_timeout() -> u64 {
    30
}

impl Default for XsectionConfig {
    fn default() -> Self {
        Self {
            services: default_services(),
            default_path: default_path(),
            request_timeout_secs: default_timeout(),
            render: RenderSettings::default(),
        }
    }
}

impl XsectionConfig {
    /// Load configuration from a YAML file.
    ///
    /// A missing file is not an error: the built-in FMI collections are
    /// used and a warning is logged.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::warn!(
                path = %path.display(),
                "Config file does not exist, using defaults"
            );
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read: {:?}", path))?;

        let config = Self::from_yaml_str(&content)
            .with_context(|| format!("Failed to parse: {:?}", path))?;

        tracing::info!(
            services = config.services.len(),
            path = %path.display(),
            "Loaded configuration"
        );

        Ok(config)
    }

    /// Parse configuration from YAML text.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content)?;
        if config.services.is_empty() {
            anyhow::bail!("at least one service must be configured");
        }
        Ok(config)
    }

    /// Find a service by ID.
    pub fn find_service(&self, id: &str) -> Option<&ServiceDefinition> {
        self.services.iter().find(|s| s.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_fmi_collections() {
        let config = XsectionConfig::default();
        assert_eq!(config.services.len(), 2);
        assert!(config.find_service("ecmwf_painepinta").is_some());
        assert!(config
            .find_service("harmonie_scandinavia_hybrid")
            .map(|s| s.url.ends_with("/harmonie_scandinavia_hybrid"))
            .unwrap_or(false));
        assert!(config.find_service("nope").is_none());
    }

    #[test]
    fn test_empty_yaml_uses_defaults() {
        let config = XsectionConfig::from_yaml_str("{}").unwrap();
        assert_eq!(config, XsectionConfig::default());
    }

    #[test]
    fn test_empty_service_list_rejected() {
        assert!(XsectionConfig::from_yaml_str("services: []").is_err());
    }
}
