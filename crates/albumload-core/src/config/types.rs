//! Sub-configuration structs with their defaults.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Source directory settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Directory to load from when none is given on the command line
    pub dir: Option<PathBuf>,

    /// File extensions treated as images (case-insensitive)
    pub extensions: Vec<String>,

    /// Album name to store instead of the directory name
    pub album: Option<String>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            dir: None,
            extensions: vec!["jpg".to_string(), "jpeg".to_string(), "png".to_string()],
            album: None,
        }
    }
}

/// Resize bounds and the fixed brightening step.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResizeConfig {
    /// Maximum output width in pixels
    pub max_width: u32,

    /// Maximum output height in pixels
    pub max_height: u32,

    /// Amount added to every channel after resizing (0 disables)
    pub brighten: i32,
}

impl Default for ResizeConfig {
    fn default() -> Self {
        Self {
            max_width: 800,
            max_height: 700,
            brighten: 10,
        }
    }
}

/// Worker pool settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ProcessingConfig {
    /// Number of parallel workers; 0 uses the available hardware parallelism
    pub parallel_workers: usize,
}

impl ProcessingConfig {
    /// Resolve the worker count actually used for a run.
    pub fn effective_workers(&self) -> usize {
        let hardware = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        match self.parallel_workers {
            0 => hardware,
            n => n.min(hardware),
        }
    }
}

/// Resource limits to protect against problematic inputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum file size in megabytes
    pub max_file_size_mb: u64,

    /// Maximum decoded image dimension (width or height)
    pub max_image_dimension: u32,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_file_size_mb: 100,
            max_image_dimension: 20000,
        }
    }
}

/// Destination database settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// SQLite database file (supports ~)
    pub path: PathBuf,

    /// Maximum pooled connections
    pub pool_size: u32,

    /// How long a writer waits on a locked database, in milliseconds
    pub busy_timeout_ms: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("~/.albumload/albumload.db"),
            pool_size: 8,
            busy_timeout_ms: 5000,
        }
    }
}

/// Per-run load behavior.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LoadConfig {
    /// Delete every photo row and image row before loading
    pub clear_before_load: bool,
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    pub level: String,

    /// Log format: "pretty" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
