//! Mipmap pipeline module
//!
//! Decodes an RGB image, builds its mipmap pyramid and stores every level,
//! with separate modules for raster decoding, pyramid construction, level
//! encoding and orchestration.

pub mod raster;
pub mod mipmap;
pub mod encode;
pub mod conversions;
pub mod common;

pub use common::{
    MipmapError,
    Result,
};

pub use raster::{
    RasterBuffer,
    RasterReader,
    ImageRasterReader,
    Rgb,
};

pub use mipmap::{
    BuildStrategy,
    NonPowerOfTwoBuilder,
    PowerOfTwoBuilder,
    Pyramid,
    PyramidBuilder,
    PyramidLevel,
    level_count,
};

pub use encode::{
    OutputFormat,
    PyramidConfig,
    PyramidConfigBuilder,
    RasterWriter,
    StandardRasterWriter,
    TiffCompression,
};

pub use conversions::{
    MipmapPipeline,
    PipelineTimings,
};
