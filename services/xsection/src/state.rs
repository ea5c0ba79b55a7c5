//! Application state for the HTTP server.

use std::collections::HashMap;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::client::EdrClient;
use crate::config::XsectionConfig;

/// Shared application state.
pub struct AppState {
    pub config: XsectionConfig,

    /// One client per configured service, keyed by service id.
    pub clients: HashMap<String, EdrClient>,
}

impl AppState {
    /// Build clients for every configured service.
    pub fn new(config: XsectionConfig) -> Result<Self> {
        let timeout = Duration::from_secs(config.request_timeout_secs);
        let mut clients = HashMap::new();
        for service in &config.services {
            let client = EdrClient::new(&service.url, timeout)
                .with_context(|| format!("Failed to create client for {}", service.id))?;
            clients.insert(service.id.clone(), client);
        }
        Ok(Self { config, clients })
    }

    pub fn client(&self, id: &str) -> Option<&EdrClient> {
        self.clients.get(id)
    }
}
