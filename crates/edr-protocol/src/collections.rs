//! EDR instance metadata.
//!
//! An instance is one model run of a collection. The instance list is the
//! entry point for a cross-section request: the newest run supplies the
//! parameter names, the valid time and the vertical levels.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::parameters::Parameter;
use crate::types::{Extent, Link};

/// A list of instances (model runs) for a collection.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct InstanceList {
    #[serde(default)]
    pub links: Vec<Link>,

    #[serde(default)]
    pub instances: Vec<Instance>,
}

impl InstanceList {
    /// The most recent run.
    ///
    /// Instance ids are timestamps such as `20241229T120000`, so the
    /// greatest id in string order is the latest run.
    pub fn latest(&self) -> Option<&Instance> {
        self.instances.iter().max_by(|a, b| a.id.cmp(&b.id))
    }
}

/// An instance represents a specific version of a collection,
/// typically a model run in the context of weather data.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Instance {
    /// Unique identifier for the instance (usually ISO8601 datetime).
    pub id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub links: Vec<Link>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub extent: Option<Extent>,

    /// Parameters queryable in this run, keyed by parameter name.
    #[serde(
        rename = "parameter_names",
        default,
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub parameter_names: BTreeMap<String, Parameter>,
}

impl Instance {
    /// Create a new instance.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: None,
            description: None,
            links: Vec::new(),
            extent: None,
            parameter_names: BTreeMap::new(),
        }
    }

    /// Set the extent.
    pub fn with_extent(mut self, extent: Extent) -> Self {
        self.extent = Some(extent);
        self
    }

    /// Add a queryable parameter.
    pub fn with_parameter(mut self, name: impl Into<String>, parameter: Parameter) -> Self {
        self.parameter_names.insert(name.into(), parameter);
        self
    }

    /// Parameter names in sorted order.
    pub fn parameter_ids(&self) -> Vec<&str> {
        self.parameter_names.keys().map(String::as_str).collect()
    }

    /// Start of the first temporal interval.
    pub fn datetime(&self) -> Option<&str> {
        self.extent.as_ref()?.temporal.as_ref()?.first_start()
    }

    /// Vertical levels joined for the `z` query parameter.
    pub fn vertical_levels(&self) -> Option<String> {
        let vertical = self.extent.as_ref()?.vertical.as_ref()?;
        if vertical.values.is_empty() {
            return None;
        }
        Some(vertical.joined())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{TemporalExtent, VerticalExtent};

    #[test]
    fn test_latest_picks_greatest_id() {
        let list = InstanceList {
            instances: vec![
                Instance::new("20241229T000000"),
                Instance::new("20241229T120000"),
                Instance::new("20241228T180000"),
            ],
            ..InstanceList::default()
        };
        assert_eq!(list.latest().map(|i| i.id.as_str()), Some("20241229T120000"));
        assert!(InstanceList::default().latest().is_none());
    }

    #[test]
    fn test_instance_accessors() {
        let instance = Instance::new("run")
            .with_extent(
                Extent::default()
                    .with_temporal(TemporalExtent::new(Some("2024-12-29T12:00:00Z".into()), None))
                    .with_vertical(VerticalExtent::with_levels(vec![850.0, 500.0], None)),
            )
            .with_parameter("Temperature", Parameter::new("Temperature", "Temperature"))
            .with_parameter("Humidity", Parameter::new("Humidity", "Humidity"));

        assert_eq!(instance.datetime(), Some("2024-12-29T12:00:00Z"));
        assert_eq!(instance.vertical_levels().as_deref(), Some("850,500"));
        assert_eq!(instance.parameter_ids(), vec!["Humidity", "Temperature"]);
    }

    #[test]
    fn test_instance_without_extent() {
        let instance = Instance::new("run");
        assert_eq!(instance.datetime(), None);
        assert_eq!(instance.vertical_levels(), None);
        assert!(instance.parameter_ids().is_empty());
    }
}
