//! Pyramid generation configuration types

use std::path::PathBuf;

use crate::image_pipeline::mipmap::BuildStrategy;

/// File format each pyramid level is stored in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Lossless PNG (default)
    #[default]
    Png,
    /// TIFF, compressed according to `PyramidConfig::compression`
    Tiff,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Tiff => "tiff",
        }
    }
}

/// TIFF compression methods
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TiffCompression {
    /// No compression (fastest, largest file)
    None,
    /// LZW compression
    Lzw,
    /// Deflate compression, balanced level
    Deflate,
}

/// Configuration for building and storing a mipmap pyramid
#[derive(Debug, Clone)]
pub struct PyramidConfig {
    /// How levels are derived from the source
    pub strategy: BuildStrategy,
    /// File format of the stored levels
    pub output_format: OutputFormat,
    /// Compression used when `output_format` is TIFF
    pub compression: TiffCompression,
    /// Whether to validate image dimensions before building
    pub validate_dimensions: bool,
    /// Largest accepted width or height when validating
    pub max_dimension: Option<u32>,
    /// Evaluate resample passes on the rayon pool
    pub parallel: bool,
    /// Level files are named `{file_prefix}_{index}.{ext}`
    pub file_prefix: String,
    /// Directory for level files; the input file's directory when unset
    pub output_dir: Option<PathBuf>,
}

impl Default for PyramidConfig {
    fn default() -> Self {
        Self {
            strategy: BuildStrategy::PowerOfTwo,
            output_format: OutputFormat::Png,
            compression: TiffCompression::None,
            validate_dimensions: true,
            max_dimension: Some(65536),
            parallel: true,
            file_prefix: "pyramid".to_string(),
            output_dir: None,
        }
    }
}

impl PyramidConfig {
    pub fn builder() -> PyramidConfigBuilder {
        PyramidConfigBuilder::default()
    }
}

/// Builder for PyramidConfig
#[derive(Default)]
pub struct PyramidConfigBuilder {
    strategy: Option<BuildStrategy>,
    output_format: Option<OutputFormat>,
    compression: Option<TiffCompression>,
    validate_dimensions: Option<bool>,
    max_dimension: Option<Option<u32>>,
    parallel: Option<bool>,
    file_prefix: Option<String>,
    output_dir: Option<Option<PathBuf>>,
}

impl PyramidConfigBuilder {
    pub fn strategy(mut self, strategy: BuildStrategy) -> Self {
        self.strategy = Some(strategy);
        self
    }

    pub fn output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = Some(format);
        self
    }

    pub fn compression(mut self, compression: TiffCompression) -> Self {
        self.compression = Some(compression);
        self
    }

    pub fn validate_dimensions(mut self, validate: bool) -> Self {
        self.validate_dimensions = Some(validate);
        self
    }

    pub fn max_dimension(mut self, max: Option<u32>) -> Self {
        self.max_dimension = Some(max);
        self
    }

    pub fn parallel(mut self, enable: bool) -> Self {
        self.parallel = Some(enable);
        self
    }

    pub fn file_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.file_prefix = Some(prefix.into());
        self
    }

    pub fn output_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.output_dir = Some(dir);
        self
    }

    pub fn build(self) -> PyramidConfig {
        let default = PyramidConfig::default();
        PyramidConfig {
            strategy: self.strategy.unwrap_or(default.strategy),
            output_format: self.output_format.unwrap_or(default.output_format),
            compression: self.compression.unwrap_or(default.compression),
            validate_dimensions: self.validate_dimensions.unwrap_or(default.validate_dimensions),
            max_dimension: self.max_dimension.unwrap_or(default.max_dimension),
            parallel: self.parallel.unwrap_or(default.parallel),
            file_prefix: self.file_prefix.unwrap_or(default.file_prefix),
            output_dir: self.output_dir.unwrap_or(default.output_dir),
        }
    }
}
