//! Resize-and-reencode: the per-image work of a load.
//!
//! Every source image comes out as a JPEG that fits inside the configured
//! bounds, with the fixed brightening step applied.

use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, ImageFormat};
use std::io::Cursor;
use std::path::Path;

use crate::config::{LimitsConfig, ResizeConfig};
use crate::error::PipelineError;

use super::decode::ImageDecoder;
use super::validate::Validator;

/// A re-encoded image ready to be stored.
#[derive(Debug, Clone)]
pub struct Transcoded {
    /// JPEG bytes
    pub content: Vec<u8>,
    /// Output width in pixels
    pub width: u32,
    /// Output height in pixels
    pub height: u32,
}

/// Decodes, resizes, brightens and re-encodes source images.
pub struct Transcoder {
    resize: ResizeConfig,
    validator: Validator,
    decoder: ImageDecoder,
}

impl Transcoder {
    /// Create a transcoder with the given bounds and input limits.
    pub fn new(resize: ResizeConfig, limits: LimitsConfig) -> Self {
        Self {
            resize,
            validator: Validator::new(limits.clone()),
            decoder: ImageDecoder::new(limits),
        }
    }

    /// Read a source file from disk and transcode it.
    pub fn transcode_file(&self, path: &Path) -> Result<Transcoded, PipelineError> {
        let bytes = std::fs::read(path).map_err(|e| PipelineError::Read {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        self.transcode(&bytes, path)
    }

    /// Transcode an in-memory source image. `path` is only used for errors.
    pub fn transcode(&self, bytes: &[u8], path: &Path) -> Result<Transcoded, PipelineError> {
        self.validator.validate(bytes, path)?;
        let decoded = self.decoder.decode(bytes, path)?;

        let resized = fit_within(decoded.image, self.resize.max_width, self.resize.max_height);
        let adjusted = if self.resize.brighten != 0 {
            resized.brighten(self.resize.brighten)
        } else {
            resized
        };
        let (width, height) = adjusted.dimensions();
        tracing::trace!(
            "  Resized {:?}: {}x{} -> {}x{}",
            path,
            decoded.width,
            decoded.height,
            width,
            height
        );

        let content = encode_jpeg(adjusted).map_err(|e| PipelineError::Encode {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        Ok(Transcoded {
            content,
            width,
            height,
        })
    }
}

/// Scale `image` down so neither side exceeds the bounds, keeping its aspect ratio.
///
/// Images already inside the bounds are returned unchanged.
pub fn fit_within(image: DynamicImage, max_width: u32, max_height: u32) -> DynamicImage {
    let (width, height) = image.dimensions();
    if width <= max_width && height <= max_height {
        return image;
    }
    image.resize(max_width, max_height, FilterType::Lanczos3)
}

/// JPEG has no alpha channel, so everything is flattened to RGB8 first.
fn encode_jpeg(image: DynamicImage) -> image::ImageResult<Vec<u8>> {
    let rgb = DynamicImage::ImageRgb8(image.into_rgb8());
    let mut buffer = Cursor::new(Vec::new());
    rgb.write_to(&mut buffer, ImageFormat::Jpeg)?;
    Ok(buffer.into_inner())
}
