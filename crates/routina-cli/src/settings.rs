//! Resolves the effective configuration and storage for a run.
//!
//! Precedence: command-line flags > environment > config file > defaults.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use routina_core::config::RoutinaConfig;
use routina_core::persistence::KeyValueStore;
use routina_infrastructure::{
    ConfigStorage, InMemoryKeyValueStore, JsonFileKeyValueStore, RoutinaPaths,
};
use tracing::{info, warn};

use crate::Args;

/// Loads the config file, then layers environment and flags on top.
pub fn resolve_config(args: &Args, paths: &RoutinaPaths) -> Result<RoutinaConfig> {
    let mut config = match &args.config {
        Some(path) => ConfigStorage::new(path.clone())
            .load()
            .with_context(|| format!("failed to load config {}", path.display()))?
            .with_context(|| format!("config file {} is missing or empty", path.display()))?,
        None => match ConfigStorage::default_location(paths).and_then(|s| s.load_or_seed()) {
            Ok(config) => config,
            Err(e) => {
                warn!(error = %e, "ignoring unreadable default config");
                RoutinaConfig::default()
            }
        },
    };

    config.apply_env(|key| std::env::var(key).ok());
    apply_flags(&mut config, args);
    Ok(config)
}

fn apply_flags(config: &mut RoutinaConfig, args: &Args) {
    if let Some(catalog) = &args.catalog {
        config.catalog.source = catalog.clone();
    }
    if let Some(url) = &args.relay_url {
        config.relay.endpoint = Some(url.clone());
    }
    if let Some(model) = &args.model {
        config.relay.model = model.clone();
    }
}

/// Where the key-value file lives: `[storage] path`, else the data dir.
pub fn storage_path(config: &RoutinaConfig, paths: &RoutinaPaths) -> Result<PathBuf> {
    match &config.storage.path {
        Some(path) => Ok(path.clone()),
        None => Ok(paths.storage_file()?),
    }
}

/// Opens the file-backed store, falling back to memory if it is unusable.
pub fn open_store(path: PathBuf) -> Arc<dyn KeyValueStore> {
    match JsonFileKeyValueStore::open(path.clone()) {
        Ok(store) => {
            info!(path = %path.display(), "using file storage");
            Arc::new(store)
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "storage unusable, state will not be saved");
            Arc::new(InMemoryKeyValueStore::new())
        }
    }
}
