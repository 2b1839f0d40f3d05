//! Level encoding module
//!
//! Quantizes floating-point rasters to 8-bit RGB and stores them as PNG or
//! TIFF, plus the configuration shared by the whole pipeline.

mod writer;
mod png_writer;
mod tiff_writer;
mod standard_writer;
mod quantize;
pub mod types;

pub use writer::RasterWriter;
pub use png_writer::PngRasterWriter;
pub use tiff_writer::TiffRasterWriter;
pub use standard_writer::StandardRasterWriter;
pub use quantize::{quantize_channel, to_rgb8};
pub use types::{OutputFormat, PyramidConfig, PyramidConfigBuilder, TiffCompression};
