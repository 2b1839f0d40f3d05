//! Raster reader implementation using the image library.
//!
//! Decodes PNG, JPEG and BMP data into a floating-point `RasterBuffer` with
//! channel values normalized to `[0, 1]`. Only 3-channel RGB sources are
//! accepted; greyscale and alpha-carrying images are rejected instead of
//! being converted.

use tracing::debug;

use crate::image_pipeline::common::error::{MipmapError, Result};
use crate::image_pipeline::raster::reader::RasterReader;
use crate::image_pipeline::raster::types::RasterBuffer;

/// Number of channels a source image must carry.
const RGB_CHANNELS: u8 = 3;

pub struct ImageRasterReader;

impl RasterReader for ImageRasterReader {
    /// Decodes an encoded image held in memory.
    ///
    /// 8-bit, 16-bit and float RGB sources are all normalized to `[0, 1]`.
    ///
    /// # Errors
    ///
    /// * `DecodeError` when the bytes are not a supported image or the image
    ///   does not have exactly three channels.
    /// * `InvalidDimensions` when the decoded image is empty.
    fn read_raster(&self, data: &[u8]) -> Result<RasterBuffer> {
        debug!("Decoding image, {} bytes", data.len());

        let decoded =
            image::load_from_memory(data).map_err(|e| MipmapError::DecodeError(e.to_string()))?;

        let color = decoded.color();
        if color.channel_count() != RGB_CHANNELS {
            return Err(MipmapError::DecodeError(format!(
                "image must be RGB, found {:?} with {} channel(s)",
                color,
                color.channel_count()
            )));
        }

        let rgb = decoded.to_rgb32f();
        let (width, height) = (rgb.width(), rgb.height());

        debug!("Decoded image: {}x{} ({:?})", width, height, color);

        RasterBuffer::from_interleaved(width, height, rgb.as_raw())
    }
}
