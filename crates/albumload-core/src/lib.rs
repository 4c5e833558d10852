//! albumload core - resize a directory of photos and load them into SQLite.
//!
//! # Architecture
//!
//! ```text
//! Source dir → Discover → [parallel per file] Validate → Decode → Fit → Brighten → JPEG → Store
//! ```
//!
//! Each file becomes one `t_photo` row and one `t_photo_image` row, written
//! together in a single transaction on a pooled connection.
//!
//! # Usage
//!
//! ```rust,ignore
//! use albumload_core::{Config, LoadOptions, Loader, Store};
//!
//! fn main() -> albumload_core::Result<()> {
//!     let config = Config::load()?;
//!     let store = Store::open(&config)?;
//!     let loader = Loader::new(&config, store);
//!
//!     let mut options = LoadOptions::from_config(&config, "photos/vacation");
//!     options.clear_before_load = true;
//!     let report = loader.run(&options)?;
//!     println!("Loaded {} photos", report.loaded);
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod config;
pub mod error;
pub mod loader;
pub mod pipeline;
pub mod storage;
pub mod types;

// Re-exports for convenient access
pub use config::Config;
pub use error::{ConfigError, LoaderError, PipelineError, Result, StorageError};
pub use loader::{album_name, LoadOptions, Loader};
pub use pipeline::{DiscoveredFile, FileDiscovery, Transcoded, Transcoder};
pub use storage::Store;
pub use types::{ImageItem, ItemOutcome, LoadReport, PhotoRecord};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
