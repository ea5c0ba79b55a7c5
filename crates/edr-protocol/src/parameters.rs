//! Parameter metadata types for EDR collections.
//!
//! Parameters describe the data variables available within an instance,
//! including their units and observed properties.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A parameter (observed property) available in a collection.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Parameter {
    /// The type of parameter (usually "Parameter").
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<I18nString>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<I18nString>,

    #[serde(
        rename = "observedProperty",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub observed_property: Option<ObservedProperty>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<Unit>,
}

impl Parameter {
    /// Create a new parameter.
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        let label = label.into();
        Self {
            type_: Some("Parameter".to_string()),
            id: Some(id.into()),
            label: Some(I18nString::Simple(label.clone())),
            description: None,
            observed_property: Some(ObservedProperty::new(label)),
            unit: None,
        }
    }

    /// Set the unit.
    pub fn with_unit(mut self, unit: Unit) -> Self {
        self.unit = Some(unit);
        self
    }

    /// Best human-readable name: label, then observed property label.
    pub fn display_label(&self) -> Option<&str> {
        self.label
            .as_ref()
            .map(I18nString::text)
            .or_else(|| {
                self.observed_property
                    .as_ref()
                    .and_then(|p| p.label.as_ref())
                    .map(I18nString::text)
            })
            .filter(|s| !s.is_empty())
    }

    /// Unit symbol, if any.
    pub fn unit_symbol(&self) -> Option<&str> {
        self.unit.as_ref()?.symbol.as_ref().map(UnitSymbol::value)
    }
}

/// Internationalized string supporting multiple languages.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum I18nString {
    /// Simple string (assumes English).
    Simple(String),
    /// Map of language codes to strings.
    Localized(HashMap<String, String>),
}

impl I18nString {
    /// Create an English-only i18n string.
    pub fn english(s: &str) -> Self {
        let mut map = HashMap::new();
        map.insert("en".to_string(), s.to_string());
        I18nString::Localized(map)
    }

    /// Get the English text, or any available text.
    pub fn text(&self) -> &str {
        match self {
            I18nString::Simple(s) => s,
            I18nString::Localized(map) => map
                .get("en")
                .map(|s| s.as_str())
                .unwrap_or_else(|| map.values().next().map(|s| s.as_str()).unwrap_or("")),
        }
    }
}

/// The observed property being measured.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ObservedProperty {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<I18nString>,
}

impl ObservedProperty {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            id: None,
            label: Some(I18nString::english(&label.into())),
        }
    }
}

/// Unit of measurement.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Unit {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<I18nString>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<UnitSymbol>,
}

impl Unit {
    /// Create a unit with label and symbol.
    pub fn new(label: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self {
            label: Some(I18nString::english(&label.into())),
            symbol: Some(UnitSymbol::Simple(symbol.into())),
        }
    }

    pub fn kelvin() -> Self {
        Self::new("Kelvin", "K")
    }
}

/// Unit symbol representation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum UnitSymbol {
    /// Simple string symbol.
    Simple(String),
    /// Structured symbol with type and value.
    Structured {
        value: String,
        #[serde(rename = "type")]
        type_: Option<String>,
    },
}

impl UnitSymbol {
    /// Get the symbol string.
    pub fn value(&self) -> &str {
        match self {
            UnitSymbol::Simple(s) => s,
            UnitSymbol::Structured { value, .. } => value,
        }
    }
}
