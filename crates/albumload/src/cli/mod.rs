//! Command implementations.

pub mod config;
pub mod load;

use albumload_core::{Config, ConfigError};
use std::path::Path;

/// Load configuration from `path`, or from the default location when `None`.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}
