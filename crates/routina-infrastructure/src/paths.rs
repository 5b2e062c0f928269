//! Unified path management for routina files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/routina/           # Config directory
//! └── config.toml              # Application configuration
//!
//! ~/.local/share/routina/      # Data directory
//! ├── storage.json             # Key-value storage (selection, preferences)
//! └── logs/                    # Application logs
//!     └── routina.log.YYYY-MM-DD
//! ```

use std::path::{Path, PathBuf};

const APP_DIR: &str = "routina";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Home directory could not be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

impl From<PathError> for routina_core::RoutinaError {
    fn from(e: PathError) -> Self {
        routina_core::RoutinaError::config(e.to_string())
    }
}

/// Resolves routina's config and data locations.
///
/// Platform directories come from `dirs`; an explicit data directory
/// (e.g. `--data-dir`) overrides the data side only.
#[derive(Debug, Clone, Default)]
pub struct RoutinaPaths {
    data_override: Option<PathBuf>,
}

impl RoutinaPaths {
    pub fn new(data_override: Option<PathBuf>) -> Self {
        Self { data_override }
    }

    /// Returns the routina configuration directory (e.g. `~/.config/routina/`).
    pub fn config_dir(&self) -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::HomeDirNotFound)
    }

    /// Returns the routina data directory (e.g. `~/.local/share/routina/`).
    pub fn data_dir(&self) -> Result<PathBuf, PathError> {
        if let Some(dir) = &self.data_override {
            return Ok(dir.clone());
        }
        dirs::data_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::HomeDirNotFound)
    }

    pub fn config_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("config.toml"))
    }

    pub fn storage_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.data_dir()?.join("storage.json"))
    }

    pub fn log_dir(&self) -> Result<PathBuf, PathError> {
        Ok(self.data_dir()?.join("logs"))
    }

    pub fn data_override(&self) -> Option<&Path> {
        self.data_override.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_override_drives_data_paths() {
        let paths = RoutinaPaths::new(Some(PathBuf::from("/tmp/routina-test")));
        assert_eq!(
            paths.storage_file().unwrap(),
            PathBuf::from("/tmp/routina-test/storage.json")
        );
        assert_eq!(paths.log_dir().unwrap(), PathBuf::from("/tmp/routina-test/logs"));
    }

    #[test]
    fn test_config_file_name() {
        let paths = RoutinaPaths::default();
        if let Ok(file) = paths.config_file() {
            assert!(file.ends_with("routina/config.toml"));
        }
    }
}
