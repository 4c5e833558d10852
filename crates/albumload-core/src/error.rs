//! Error types for the albumload pipeline.
//!
//! Errors are organized by stage. Run-level errors (`Config`,
//! `SourceUnavailable`, pool setup under `Storage`) abort a load before any
//! image is touched. Per-item errors (`PipelineError`, a failed write) are
//! caught by the loader and recorded in the run report.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for albumload operations.
#[derive(Error, Debug)]
pub enum LoaderError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The source directory could not be enumerated
    #[error("Source unavailable: {path}: {message}")]
    SourceUnavailable { path: PathBuf, message: String },

    /// Per-image pipeline errors
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    /// Destination storage errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// The worker thread pool could not be started
    #[error("Worker pool error: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),

    /// General I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Per-image errors from reading, decoding and re-encoding a source file.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Source file could not be read
    #[error("Cannot read {path}: {message}")]
    Read { path: PathBuf, message: String },

    /// Image decoding failed
    #[error("Decode error for {path}: {message}")]
    Decode { path: PathBuf, message: String },

    /// Re-encoding the resized image failed
    #[error("Encode error for {path}: {message}")]
    Encode { path: PathBuf, message: String },

    /// File exceeds size limit
    #[error("File too large: {path} ({size_mb}MB > {max_mb}MB)")]
    FileTooLarge {
        path: PathBuf,
        size_mb: u64,
        max_mb: u64,
    },

    /// Image dimensions exceed limit
    #[error("Image too large: {path} ({width}x{height} > {max_dim})")]
    ImageTooLarge {
        path: PathBuf,
        width: u32,
        height: u32,
        max_dim: u32,
    },

    /// Bytes do not start with a known image signature
    #[error("Unsupported format for {path}: {format}")]
    UnsupportedFormat { path: PathBuf, format: String },
}

impl PipelineError {
    /// Path of the source file this error refers to.
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::Read { path, .. }
            | Self::Decode { path, .. }
            | Self::Encode { path, .. }
            | Self::FileTooLarge { path, .. }
            | Self::ImageTooLarge { path, .. }
            | Self::UnsupportedFormat { path, .. } => path,
        }
    }
}

/// Destination storage errors.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Pool could not be built or a connection could not be checked out
    #[error("Connection pool error: {0}")]
    Pool(#[from] r2d2::Error),

    /// A statement failed
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Convenience type alias for albumload results.
pub type Result<T> = std::result::Result<T, LoaderError>;

/// Convenience type alias for storage-specific results.
pub type StorageResult<T> = std::result::Result<T, StorageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_error_path() {
        let err = PipelineError::Decode {
            path: PathBuf::from("/photos/b.jpg"),
            message: "bad header".to_string(),
        };
        assert_eq!(err.path(), std::path::Path::new("/photos/b.jpg"));
        assert!(err.to_string().contains("b.jpg"));
    }

    #[test]
    fn test_source_unavailable_message() {
        let err = LoaderError::SourceUnavailable {
            path: PathBuf::from("/missing"),
            message: "No such file or directory".to_string(),
        };
        assert!(err.to_string().starts_with("Source unavailable"));
    }
}
