use std::io::Write;
use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::encode::png_writer::PngRasterWriter;
use crate::image_pipeline::encode::tiff_writer::TiffRasterWriter;
use crate::image_pipeline::encode::types::{OutputFormat, PyramidConfig};
use crate::image_pipeline::encode::writer::RasterWriter;
use crate::image_pipeline::raster::RasterBuffer;

/// Writes each raster in the format selected by `PyramidConfig::output_format`.
pub struct StandardRasterWriter;

impl RasterWriter for StandardRasterWriter {
    fn write_raster(&self, raster: &RasterBuffer, output: &mut dyn Write, config: &PyramidConfig) -> Result<()> {
        match config.output_format {
            OutputFormat::Png => PngRasterWriter.write_raster(raster, output, config),
            OutputFormat::Tiff => TiffRasterWriter.write_raster(raster, output, config),
        }
    }
}
