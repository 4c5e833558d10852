//! Image pipeline stages.
//!
//! - **discovery**: List image files in a source directory
//! - **validate**: Size and signature checks on raw bytes
//! - **decode**: Content-sniffed decoding with dimension limits
//! - **transcode**: Fit-within-bounds resize, brighten, JPEG re-encode

pub mod decode;
pub mod discovery;
pub mod transcode;
pub mod validate;

// Re-exports for convenient access
pub use decode::{DecodedImage, ImageDecoder};
pub use discovery::{DiscoveredFile, FileDiscovery};
pub use transcode::{fit_within, Transcoded, Transcoder};
pub use validate::Validator;
