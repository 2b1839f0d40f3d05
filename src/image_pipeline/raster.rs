//! Raster module
//!
//! The floating-point RGB buffer shared by the reader, the pyramid builders
//! and the writers, plus the decoding side of the file boundary.

mod reader;
mod image_reader;
pub mod types;

pub use reader::RasterReader;
pub use image_reader::ImageRasterReader;
pub use types::{RasterBuffer, Rgb};
