use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use mipmap_rs::image_pipeline::{
    BuildStrategy, MipmapPipeline, OutputFormat, PyramidConfig, TiffCompression,
};
use mipmap_rs::logger::{self, info};

#[derive(ValueEnum, Debug, Clone, Copy)]
enum Mode {
    /// Pad to power-of-two dimensions, then halve with 2x2 box averages
    #[value(alias = "1")]
    Pot,
    /// Halve the source size directly with a separable 3-tap filter
    #[value(alias = "0")]
    Npot,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum Format {
    Png,
    Tiff,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum Compression {
    None,
    Lzw,
    Deflate,
}

#[derive(Parser, Debug)]
#[command(name = "mipmap")]
#[command(about = "Generate a mipmap pyramid from an RGB image")]
struct Cli {
    /// RGB image to build the pyramid from
    filename: PathBuf,
    /// Pyramid strategy (`1` and `0` are accepted for pot and npot)
    #[arg(long, value_enum, default_value_t = Mode::Pot)]
    mode: Mode,
    /// File format of the written levels
    #[arg(long, value_enum, default_value_t = Format::Png)]
    format: Format,
    /// Compression for TIFF output
    #[arg(long, value_enum, default_value_t = Compression::None)]
    compression: Compression,
    /// Levels are written as `<prefix>_<index>.<ext>`
    #[arg(long, default_value = "pyramid")]
    prefix: String,
    /// Directory for the levels, defaults to the input file's directory
    #[arg(long)]
    output_dir: Option<PathBuf>,
    /// Run every resample pass on the calling thread
    #[arg(long)]
    single_threaded: bool,
    /// Print a per-step timing summary
    #[arg(long)]
    timings: bool,
    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn config(&self) -> PyramidConfig {
        PyramidConfig::builder()
            .strategy(match self.mode {
                Mode::Pot => BuildStrategy::PowerOfTwo,
                Mode::Npot => BuildStrategy::NonPowerOfTwo,
            })
            .output_format(match self.format {
                Format::Png => OutputFormat::Png,
                Format::Tiff => OutputFormat::Tiff,
            })
            .compression(match self.compression {
                Compression::None => TiffCompression::None,
                Compression::Lzw => TiffCompression::Lzw,
                Compression::Deflate => TiffCompression::Deflate,
            })
            .parallel(!self.single_threaded)
            .file_prefix(self.prefix.clone())
            .output_dir(self.output_dir.clone())
            .build()
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::init(cli.verbose);

    let pipeline = MipmapPipeline::new(cli.config());
    info!("Strategy: {:?}", pipeline.config().strategy);

    let (paths, timings) = pipeline
        .generate_file_with_timings(&cli.filename)
        .with_context(|| format!("failed to generate mipmaps for {}", cli.filename.display()))?;

    for path in &paths {
        info!("Wrote {}", path.display());
    }
    if cli.timings {
        timings.log_summary();
    }

    Ok(())
}
