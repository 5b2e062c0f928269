//! Config file storage.
//!
//! Reads and writes `config.toml` as a [`RoutinaConfig`].

use std::fs;
use std::path::{Path, PathBuf};

use routina_core::config::RoutinaConfig;
use routina_core::error::Result;
use tracing::{debug, info};

use crate::paths::RoutinaPaths;

/// Storage for the TOML configuration file.
///
/// Responsibilities:
/// - Load `config.toml` and parse it into [`RoutinaConfig`]
/// - Seed a default `config.toml` on first run so there is a file to edit
///
/// Does NOT:
/// - Apply environment or command-line overrides
pub struct ConfigStorage {
    path: PathBuf,
}

impl ConfigStorage {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Uses the platform config location (`~/.config/routina/config.toml`).
    pub fn default_location(paths: &RoutinaPaths) -> Result<Self> {
        Ok(Self::new(paths.config_file()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the config file.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(config))`: Successfully loaded
    /// - `Ok(None)`: File doesn't exist or is empty
    /// - `Err`: Failed to read or parse the file
    pub fn load(&self) -> Result<Option<RoutinaConfig>> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no config file");
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(None);
        }

        let config: RoutinaConfig = toml::from_str(&content)?;
        info!(path = %self.path.display(), "loaded config");
        Ok(Some(config))
    }

    /// Loads the file. When it does not exist yet, writes the defaults there
    /// and returns them.
    pub fn load_or_seed(&self) -> Result<RoutinaConfig> {
        if let Some(config) = self.load()? {
            return Ok(config);
        }
        let config = RoutinaConfig::default();
        if !self.path.exists() {
            self.save(&config)?;
            info!(path = %self.path.display(), "wrote default config");
        }
        Ok(config)
    }

    pub fn save(&self, config: &RoutinaConfig) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, toml::to_string_pretty(config)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_seeded_with_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let storage = ConfigStorage::new(temp_dir.path().join("routina/config.toml"));
        assert!(storage.load().unwrap().is_none());

        assert_eq!(storage.load_or_seed().unwrap(), RoutinaConfig::default());
        assert!(storage.path().exists());
        assert_eq!(storage.load().unwrap(), Some(RoutinaConfig::default()));
    }

    #[test]
    fn test_seeding_keeps_an_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "[relay]\nmodel = \"mini\"\n").unwrap();

        let config = ConfigStorage::new(path.clone()).load_or_seed().unwrap();
        assert_eq!(config.relay.model, "mini");
        assert_eq!(fs::read_to_string(&path).unwrap(), "[relay]\nmodel = \"mini\"\n");
    }

    #[test]
    fn test_empty_file_is_not_overwritten() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "").unwrap();

        let storage = ConfigStorage::new(path.clone());
        assert_eq!(storage.load_or_seed().unwrap(), RoutinaConfig::default());
        assert_eq!(fs::read_to_string(&path).unwrap(), "");
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let storage = ConfigStorage::new(temp_dir.path().join("nested/config.toml"));

        let mut config = RoutinaConfig::default();
        config.relay.endpoint = Some("https://relay.example.dev".to_string());
        config.catalog.source = "catalog/products.json".to_string();
        storage.save(&config).unwrap();

        assert_eq!(storage.load().unwrap(), Some(config));
    }

    #[test]
    fn test_malformed_file_is_a_toml_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "[relay\nendpoint = 1").unwrap();

        let err = ConfigStorage::new(path).load().unwrap_err();
        assert!(err.to_string().contains("TOML"));
    }
}
