use std::io::Write;
use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::encode::types::PyramidConfig;
use crate::image_pipeline::raster::RasterBuffer;

pub trait RasterWriter {
    fn write_raster(&self, raster: &RasterBuffer, output: &mut dyn Write, config: &PyramidConfig) -> Result<()>;
}
