//! Configuration validation with range checks.

use crate::error::ConfigError;

use super::Config;

impl Config {
    /// Validate configuration values are within acceptable ranges.
    ///
    /// Called on load and again after command-line overrides are applied.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.resize.max_width == 0 {
            return Err(ConfigError::ValidationError(
                "resize.max_width must be > 0".into(),
            ));
        }
        if self.resize.max_height == 0 {
            return Err(ConfigError::ValidationError(
                "resize.max_height must be > 0".into(),
            ));
        }
        if self.source.extensions.is_empty() {
            return Err(ConfigError::ValidationError(
                "source.extensions must not be empty".into(),
            ));
        }
        if matches!(&self.source.album, Some(album) if album.trim().is_empty()) {
            return Err(ConfigError::ValidationError(
                "source.album must not be blank".into(),
            ));
        }
        if self.limits.max_file_size_mb == 0 {
            return Err(ConfigError::ValidationError(
                "limits.max_file_size_mb must be > 0".into(),
            ));
        }
        if self.limits.max_image_dimension == 0 {
            return Err(ConfigError::ValidationError(
                "limits.max_image_dimension must be > 0".into(),
            ));
        }
        if self.database.pool_size == 0 {
            return Err(ConfigError::ValidationError(
                "database.pool_size must be > 0".into(),
            ));
        }
        if self.database.path.as_os_str().is_empty() {
            return Err(ConfigError::ValidationError(
                "database.path must not be empty".into(),
            ));
        }
        Ok(())
    }
}
