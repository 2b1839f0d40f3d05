use std::io::Write;
use image::ImageEncoder;
use tracing::debug;
use crate::image_pipeline::common::error::{MipmapError, Result};
use crate::image_pipeline::encode::quantize::to_rgb8;
use crate::image_pipeline::encode::types::PyramidConfig;
use crate::image_pipeline::encode::writer::RasterWriter;
use crate::image_pipeline::raster::RasterBuffer;

pub struct PngRasterWriter;

impl RasterWriter for PngRasterWriter {
    fn write_raster(&self, raster: &RasterBuffer, output: &mut dyn Write, _config: &PyramidConfig) -> Result<()> {
        debug!("Encoding PNG image: {}x{}", raster.width(), raster.height());

        let bytes = to_rgb8(raster);
        let mut buffer = Vec::new();

        image::codecs::png::PngEncoder::new(&mut buffer)
            .write_image(
                &bytes,
                raster.width(),
                raster.height(),
                image::ExtendedColorType::Rgb8,
            )
            .map_err(|e| MipmapError::EncodeError(e.to_string()))?;

        output
            .write_all(&buffer)
            .map_err(|e| MipmapError::EncodeError(e.to_string()))?;

        debug!("PNG encoding complete");
        Ok(())
    }
}
