//! Cheap checks on raw source bytes before a full decode.

use std::path::Path;

use crate::config::LimitsConfig;
use crate::error::PipelineError;

/// Validates source bytes before decoding.
pub struct Validator {
    limits: LimitsConfig,
}

impl Validator {
    /// Create a new validator with the given limits.
    pub fn new(limits: LimitsConfig) -> Self {
        Self { limits }
    }

    /// Reject files that are too large or carry no known image signature.
    pub fn validate(&self, bytes: &[u8], path: &Path) -> Result<(), PipelineError> {
        let max_bytes = self.limits.max_file_size_mb * 1024 * 1024;
        let len = bytes.len() as u64;
        if len > max_bytes {
            return Err(PipelineError::FileTooLarge {
                path: path.to_path_buf(),
                size_mb: len / (1024 * 1024),
                max_mb: self.limits.max_file_size_mb,
            });
        }

        if bytes.len() < 4 {
            return Err(PipelineError::Decode {
                path: path.to_path_buf(),
                message: "File too small to be a valid image".to_string(),
            });
        }

        if sniff_format(bytes).is_none() {
            return Err(PipelineError::UnsupportedFormat {
                path: path.to_path_buf(),
                format: "unrecognized signature".to_string(),
            });
        }

        Ok(())
    }
}

/// Name the container format from its leading signature bytes.
pub fn sniff_format(header: &[u8]) -> Option<&'static str> {
    match header {
        [0xFF, 0xD8, 0xFF, ..] => Some("jpeg"),
        [0x89, b'P', b'N', b'G', ..] => Some("png"),
        [b'G', b'I', b'F', b'8', ..] => Some("gif"),
        [b'R', b'I', b'F', b'F', _, _, _, _, b'W', b'E', b'B', b'P', ..] => Some("webp"),
        [b'B', b'M', ..] => Some("bmp"),
        [b'I', b'I', 0x2A, 0x00, ..] | [b'M', b'M', 0x00, 0x2A, ..] => Some("tiff"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validator() -> Validator {
        Validator::new(LimitsConfig::default())
    }

    #[test]
    fn test_sniff_jpeg() {
        assert_eq!(sniff_format(&[0xFF, 0xD8, 0xFF, 0xE0, 0, 0]), Some("jpeg"));
    }

    #[test]
    fn test_sniff_png() {
        let header = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
        assert_eq!(sniff_format(&header), Some("png"));
    }

    #[test]
    fn test_sniff_webp_needs_full_header() {
        let full = [b'R', b'I', b'F', b'F', 0, 0, 0, 0, b'W', b'E', b'B', b'P'];
        assert_eq!(sniff_format(&full), Some("webp"));
        assert_eq!(sniff_format(&full[..6]), None);
    }

    #[test]
    fn test_sniff_tiff_requires_version() {
        assert_eq!(sniff_format(&[b'I', b'I', 0x2A, 0x00]), Some("tiff"));
        assert_eq!(sniff_format(&[b'M', b'M', 0x00, 0x2A]), Some("tiff"));
        assert_eq!(sniff_format(&[b'I', b'I', 0x00, 0x00]), None);
    }

    #[test]
    fn test_validate_rejects_garbage() {
        let err = validator()
            .validate(b"this is not an image", Path::new("b.jpg"))
            .unwrap_err();
        assert!(matches!(err, PipelineError::UnsupportedFormat { .. }));
    }

    #[test]
    fn test_validate_rejects_tiny_file() {
        let err = validator()
            .validate(&[0xFF, 0xD8], Path::new("b.jpg"))
            .unwrap_err();
        assert!(matches!(err, PipelineError::Decode { .. }));
    }

    #[test]
    fn test_validate_rejects_oversized_file() {
        let validator = Validator::new(LimitsConfig {
            max_file_size_mb: 1,
            ..LimitsConfig::default()
        });
        let mut bytes = vec![0xFF, 0xD8, 0xFF, 0xE0];
        bytes.resize(2 * 1024 * 1024, 0);

        let err = validator.validate(&bytes, Path::new("big.jpg")).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::FileTooLarge {
                size_mb: 2,
                max_mb: 1,
                ..
            }
        ));
    }

    #[test]
    fn test_validate_accepts_jpeg_header() {
        assert!(validator()
            .validate(&[0xFF, 0xD8, 0xFF, 0xE0, 0, 0x10], Path::new("a.jpg"))
            .is_ok());
    }
}
