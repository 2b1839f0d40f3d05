use tracing::{info, instrument, warn};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::image_pipeline::{
    common::error::{MipmapError, Result},
    conversions::timing::{PipelineTimings, Timer},
    encode::{PyramidConfig, RasterWriter, StandardRasterWriter},
    mipmap::{Pyramid, PyramidLevel},
    raster::{ImageRasterReader, RasterBuffer, RasterReader},
};

pub struct MipmapPipeline<R: RasterReader, W: RasterWriter> {
    reader: R,
    writer: W,
    config: PyramidConfig,
}

impl MipmapPipeline<ImageRasterReader, StandardRasterWriter> {
    pub fn new(config: PyramidConfig) -> Self {
        Self {
            reader: ImageRasterReader,
            writer: StandardRasterWriter,
            config,
        }
    }
}

impl<R: RasterReader, W: RasterWriter> MipmapPipeline<R, W> {
    pub fn with_custom(reader: R, writer: W, config: PyramidConfig) -> Self {
        Self {
            reader,
            writer,
            config,
        }
    }

    fn validate_dimensions(&self, width: u32, height: u32) -> Result<()> {
        if !self.config.validate_dimensions {
            return Ok(());
        }

        if width == 0 || height == 0 {
            return Err(MipmapError::InvalidDimensions(width, height));
        }

        if let Some(max) = self.config.max_dimension {
            if width > max || height > max {
                warn!(
                    "Image dimensions {}x{} exceed maximum {}",
                    width, height, max
                );
                return Err(MipmapError::InvalidDimensions(width, height));
            }
        }

        Ok(())
    }

    /// Builds the pyramid for an already decoded raster with the configured
    /// strategy.
    pub fn build(&self, raster: RasterBuffer) -> Result<Pyramid> {
        self.validate_dimensions(raster.width(), raster.height())?;
        self.config
            .strategy
            .builder(self.config.parallel)
            .build(raster)
    }

    /// Decodes `input_data` and builds its pyramid.
    pub fn generate(&self, input_data: &[u8]) -> Result<Pyramid> {
        self.generate_with_timings(input_data)
            .map(|(pyramid, _)| pyramid)
    }

    #[instrument(skip(self, input_data), fields(input_size = input_data.len()))]
    pub fn generate_with_timings(&self, input_data: &[u8]) -> Result<(Pyramid, PipelineTimings)> {
        let mut timings = PipelineTimings::new();
        info!("Starting mipmap generation ({:?})", self.config.strategy);

        let timer = Timer::start("decode");
        let raster = {
            let _span = tracing::info_span!("decode").entered();
            self.reader.read_raster(input_data)?
        };
        timer.record(&mut timings);

        let timer = Timer::start("validate_dimensions");
        {
            let _span = tracing::info_span!(
                "validate_dimensions",
                width = raster.width(),
                height = raster.height()
            )
            .entered();
            self.validate_dimensions(raster.width(), raster.height())?;
        }
        timer.record(&mut timings);

        let (width, height) = raster.dimensions();
        let timer = Timer::start("build_pyramid");
        let pyramid = {
            let _span = tracing::info_span!("build_pyramid").entered();
            self.config
                .strategy
                .builder(self.config.parallel)
                .build(raster)?
        };
        timer.record(&mut timings);

        info!(
            width,
            height,
            levels = pyramid.len(),
            "Generated mipmap pyramid in {:.3}ms",
            timings.get_step("build_pyramid").unwrap_or_default().as_secs_f64() * 1000.0
        );
        Ok((pyramid, timings))
    }

    pub fn write_level(&self, level: &PyramidLevel, output: &mut dyn Write) -> Result<()> {
        let _span = tracing::info_span!(
            "encode_level",
            index = level.index(),
            width = level.width(),
            height = level.height()
        )
        .entered();
        self.writer.write_raster(level.raster(), output, &self.config)
    }

    /// `dir/{prefix}_{index}.{ext}`
    pub fn level_path(&self, dir: &Path, index: u32) -> PathBuf {
        dir.join(format!(
            "{}_{}.{}",
            self.config.file_prefix,
            index,
            self.config.output_format.extension()
        ))
    }

    /// Directory level files go to: the configured one, else beside the input.
    pub fn output_dir_for(&self, input_path: &Path) -> PathBuf {
        self.config.output_dir.clone().unwrap_or_else(|| {
            input_path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_default()
        })
    }

    /// Writes every level into `dir`, stopping at the first failure.
    pub fn write_pyramid<P: AsRef<Path>>(&self, pyramid: &Pyramid, dir: P) -> Result<Vec<PathBuf>> {
        self.write_pyramid_with_timings(pyramid, dir.as_ref())
            .map(|(paths, _)| paths)
    }

    fn write_pyramid_with_timings(
        &self,
        pyramid: &Pyramid,
        dir: &Path,
    ) -> Result<(Vec<PathBuf>, PipelineTimings)> {
        let mut timings = PipelineTimings::new();
        let mut paths = Vec::with_capacity(pyramid.len());

        for level in pyramid {
            let path = self.level_path(dir, level.index());

            let timer = Timer::start("encode_level");
            let mut output_file = std::fs::File::create(&path).map_err(|e| {
                MipmapError::EncodeError(format!("level {} ({}): {}", level.index(), path.display(), e))
            })?;
            self.write_level(level, &mut output_file)?;
            timer.record(&mut timings);

            paths.push(path);
        }

        info!(
            "Wrote {} level(s) in {:.3}ms",
            paths.len(),
            timings.total_duration().as_secs_f64() * 1000.0
        );
        Ok((paths, timings))
    }

    pub fn generate_file<P: AsRef<Path>>(&self, input_path: P) -> Result<Vec<PathBuf>> {
        self.generate_file_with_timings(input_path)
            .map(|(paths, _)| paths)
    }

    #[instrument(skip(self, input_path))]
    pub fn generate_file_with_timings<P: AsRef<Path>>(
        &self,
        input_path: P,
    ) -> Result<(Vec<PathBuf>, PipelineTimings)> {
        let mut timings = PipelineTimings::new();
        let input_path = input_path.as_ref();
        let output_dir = self.output_dir_for(input_path);

        info!(
            input = %input_path.display(),
            output_dir = %output_dir.display(),
            "Generating mipmaps"
        );

        let timer = Timer::start("read_input_file");
        let input_data = {
            let _span = tracing::info_span!("read_input_file").entered();
            std::fs::read(input_path).map_err(|e| {
                MipmapError::DecodeError(format!("{}: {}", input_path.display(), e))
            })?
        };
        timer.record(&mut timings);

        let (pyramid, generate_timings) = self.generate_with_timings(&input_data)?;
        timings.merge(generate_timings);

        let (paths, write_timings) = self.write_pyramid_with_timings(&pyramid, &output_dir)?;
        timings.merge(write_timings);

        Ok((paths, timings))
    }

    pub fn config(&self) -> &PyramidConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: PyramidConfig) {
        self.config = config;
    }
}
