use std::io::Write;
use tracing::debug;
use crate::image_pipeline::common::error::{MipmapError, Result};
use crate::image_pipeline::encode::quantize::to_rgb8;
use crate::image_pipeline::encode::types::{PyramidConfig, TiffCompression};
use crate::image_pipeline::encode::writer::RasterWriter;
use crate::image_pipeline::raster::RasterBuffer;

pub struct TiffRasterWriter;

impl RasterWriter for TiffRasterWriter {
    fn write_raster(&self, raster: &RasterBuffer, output: &mut dyn Write, config: &PyramidConfig) -> Result<()> {
        debug!("Encoding TIFF image: {}x{}", raster.width(), raster.height());

        let bytes = to_rgb8(raster);
        let mut buffer = Vec::new();

        let compression = match config.compression {
            TiffCompression::None => tiff::encoder::Compression::Uncompressed,
            TiffCompression::Lzw => tiff::encoder::Compression::Lzw,
            TiffCompression::Deflate => tiff::encoder::Compression::Deflate(tiff::encoder::compression::DeflateLevel::Balanced),
        };

        let mut encoder = tiff::encoder::TiffEncoder::new(std::io::Cursor::new(&mut buffer))
            .map_err(|e| MipmapError::EncodeError(e.to_string()))?
            .with_compression(compression);

        encoder.write_image::<tiff::encoder::colortype::RGB8>(
            raster.width(),
            raster.height(),
            &bytes,
        ).map_err(|e| MipmapError::EncodeError(e.to_string()))?;

        output
            .write_all(&buffer)
            .map_err(|e| MipmapError::EncodeError(e.to_string()))?;

        debug!("TIFF encoding complete");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image_pipeline::raster::Rgb;

    #[test]
    fn test_writes_tiff_header() {
        let raster = RasterBuffer::filled(3, 2, Rgb::new(0.25, 0.5, 0.75)).unwrap();

        for compression in [TiffCompression::None, TiffCompression::Lzw, TiffCompression::Deflate] {
            let config = PyramidConfig::builder().compression(compression).build();
            let mut out = Vec::new();
            TiffRasterWriter.write_raster(&raster, &mut out, &config).unwrap();

            assert!(out.len() > 8, "{:?}", compression);
            assert!(out.starts_with(b"II*\0") || out.starts_with(b"MM\0*"));
        }
    }
}
