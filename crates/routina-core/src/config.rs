//! Application configuration model (`config.toml`).

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Model requested from the relay when none is configured.
pub const DEFAULT_MODEL: &str = "gpt-4.1-mini";

/// Catalog location used when none is configured.
pub const DEFAULT_CATALOG_SOURCE: &str = "products.json";

pub const ENV_RELAY_URL: &str = "ROUTINA_RELAY_URL";
pub const ENV_MODEL: &str = "ROUTINA_MODEL";
pub const ENV_API_KEY: &str = "ROUTINA_API_KEY";
pub const ENV_CATALOG: &str = "ROUTINA_CATALOG";

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct RoutinaConfig {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub relay: RelayConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    /// Filesystem path or `http(s)://` URL of the catalog JSON.
    #[serde(default = "default_catalog_source")]
    pub source: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            source: default_catalog_source(),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct RelayConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    #[serde(default = "default_model")]
    pub model: String,
    /// Sent as a bearer token when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            model: default_model(),
            api_key: None,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct StorageConfig {
    /// Overrides the key-value file location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

fn default_catalog_source() -> String {
    DEFAULT_CATALOG_SOURCE.to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

impl RoutinaConfig {
    /// Applies environment overrides using `lookup` (normally `std::env::var`).
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = non_empty(ENV_RELAY_URL) {
            self.relay.endpoint = Some(url);
        }
        if let Some(model) = non_empty(ENV_MODEL) {
            self.relay.model = model;
        }
        if let Some(key) = non_empty(ENV_API_KEY) {
            self.relay.api_key = Some(key);
        }
        if let Some(source) = non_empty(ENV_CATALOG) {
            self.catalog.source = source;
        }
    }
}
