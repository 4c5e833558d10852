//! Configuration management for albumload.
//!
//! Configuration is loaded from the platform config directory with sensible
//! defaults. Every section implements `Default`, so a missing file or a
//! partial file both produce a usable configuration.

mod types;
mod validate;

pub use types::*;

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration structure for albumload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where source images come from
    pub source: SourceConfig,

    /// Resize bounds and adjustment
    pub resize: ResizeConfig,

    /// Worker pool settings
    pub processing: ProcessingConfig,

    /// Resource limits
    pub limits: LimitsConfig,

    /// Destination database settings
    pub database: DatabaseConfig,

    /// Per-run load behavior
    pub load: LoadConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// Returns default configuration if the file doesn't exist.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default config file path.
    ///
    /// Uses platform-appropriate directories:
    /// - macOS: ~/Library/Application Support/com.albumload.albumload/config.toml
    /// - Linux: ~/.config/albumload/config.toml
    /// - Windows: C:\Users\<User>\AppData\Roaming\albumload\config\config.toml
    ///
    /// Falls back to ~/.albumload/config.toml if directory detection fails.
    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("com", "albumload", "albumload")
            .map(|dirs| dirs.config_dir().to_path_buf().join("config.toml"))
            .unwrap_or_else(|| {
                let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
                PathBuf::from(home).join(".albumload").join("config.toml")
            })
    }

    /// Get the resolved database path (with ~ expansion).
    pub fn database_path(&self) -> PathBuf {
        expand_path(&self.database.path)
    }

    /// Get the resolved source directory (with ~ expansion), if one is configured.
    pub fn source_dir(&self) -> Option<PathBuf> {
        self.source.dir.as_deref().map(expand_path)
    }

    /// Serialize the config to a pretty TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ValidationError(e.to_string()))
    }
}

/// Expand a leading `~` to the home directory.
pub fn expand_path(path: &Path) -> PathBuf {
    let path_str = path.to_string_lossy();
    let expanded = shellexpand::tilde(&path_str);
    PathBuf::from(expanded.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.resize.max_width, 800);
        assert_eq!(config.resize.max_height, 700);
        assert!(!config.load.clear_before_load);
        assert_eq!(config.database.pool_size, 8);
    }

    #[test]
    fn test_config_to_toml() {
        let config = Config::default();
        let toml = config.to_toml().unwrap();
        assert!(toml.contains("[resize]"));
        assert!(toml.contains("[database]"));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[resize]\nmax_width = 1024\n\n[load]\nclear_before_load = true\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.resize.max_width, 1024);
        assert_eq!(config.resize.max_height, 700);
        assert!(config.load.clear_before_load);
        assert_eq!(config.source.extensions, SourceConfig::default().extensions);
    }

    #[test]
    fn test_load_from_rejects_invalid_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[resize]\nmax_height = 0\n").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("resize.max_height"));
    }

    #[test]
    fn test_database_path_expands_tilde() {
        let config = Config::default();
        let resolved = config.database_path();
        assert!(!resolved.to_string_lossy().starts_with('~'));
        assert!(resolved.ends_with("albumload.db"));
    }

    #[test]
    fn test_expand_path() {
        assert!(!expand_path(Path::new("~/photos"))
            .to_string_lossy()
            .starts_with('~'));
        assert_eq!(expand_path(Path::new("/srv/photos")), Path::new("/srv/photos"));
    }

    #[test]
    fn test_source_dir_unset_by_default() {
        assert!(Config::default().source_dir().is_none());
    }
}
