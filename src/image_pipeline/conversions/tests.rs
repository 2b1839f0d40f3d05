use std::io::{self, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};

use crate::image_pipeline::common::error::{MipmapError, Result};
use crate::image_pipeline::conversions::MipmapPipeline;
use crate::image_pipeline::encode::{OutputFormat, PyramidConfig, RasterWriter, TiffCompression};
use crate::image_pipeline::mipmap::BuildStrategy;
use crate::image_pipeline::raster::{RasterBuffer, RasterReader, Rgb};

struct MockReader {
    should_fail: bool,
    mock_data: Option<RasterBuffer>,
}

impl RasterReader for MockReader {
    fn read_raster(&self, _data: &[u8]) -> Result<RasterBuffer> {
        if self.should_fail {
            return Err(MipmapError::DecodeError("Mock decode error".to_string()));
        }
        Ok(self
            .mock_data
            .clone()
            .unwrap_or_else(|| RasterBuffer::filled(8, 8, Rgb::new(1.0, 0.0, 0.0)).unwrap()))
    }
}

struct MockWriter {
    should_fail: bool,
    written_data: Arc<Mutex<Vec<(u32, u32)>>>,
}

impl RasterWriter for MockWriter {
    fn write_raster(&self, raster: &RasterBuffer, output: &mut dyn Write, _config: &PyramidConfig) -> Result<()> {
        self.written_data.lock().unwrap().push(raster.dimensions());
        if self.should_fail {
            return Err(MipmapError::EncodeError("Mock encode error".to_string()));
        }
        output
            .write_all(b"level")
            .map_err(|e| MipmapError::EncodeError(e.to_string()))?;
        Ok(())
    }
}

/// Sink that rejects every write, like a full disk.
struct FullDisk;

impl Write for FullDisk {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::Other, "disk full"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn mock_pipeline(
    reader_fails: bool,
    writer_fails: bool,
    mock_data: Option<RasterBuffer>,
    config: PyramidConfig,
) -> (MipmapPipeline<MockReader, MockWriter>, Arc<Mutex<Vec<(u32, u32)>>>) {
    let written = Arc::new(Mutex::new(Vec::new()));
    let reader = MockReader { should_fail: reader_fails, mock_data };
    let writer = MockWriter { should_fail: writer_fails, written_data: written.clone() };
    (MipmapPipeline::with_custom(reader, writer, config), written)
}

fn files_in(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

fn checkerboard_png(path: &Path) {
    let img = image::RgbImage::from_fn(4, 4, |x, y| {
        if (x + y) % 2 == 0 {
            image::Rgb([255, 255, 255])
        } else {
            image::Rgb([0, 0, 0])
        }
    });
    img.save(path).unwrap();
}

#[test]
fn test_config_builder() {
    let config = PyramidConfig::builder()
        .strategy(BuildStrategy::NonPowerOfTwo)
        .output_format(OutputFormat::Tiff)
        .compression(TiffCompression::Deflate)
        .validate_dimensions(false)
        .max_dimension(Some(10000))
        .parallel(false)
        .file_prefix("level")
        .output_dir(Some("out".into()))
        .build();

    assert_eq!(config.strategy, BuildStrategy::NonPowerOfTwo);
    assert_eq!(config.output_format, OutputFormat::Tiff);
    assert_eq!(config.compression, TiffCompression::Deflate);
    assert!(!config.validate_dimensions);
    assert_eq!(config.max_dimension, Some(10000));
    assert!(!config.parallel);
    assert_eq!(config.file_prefix, "level");
    assert_eq!(config.output_dir.as_deref(), Some(Path::new("out")));
}

#[test]
fn test_config_defaults() {
    let config = PyramidConfig::builder().build();

    assert_eq!(config.strategy, BuildStrategy::PowerOfTwo);
    assert_eq!(config.output_format, OutputFormat::Png);
    assert!(config.validate_dimensions);
    assert!(config.parallel);
    assert_eq!(config.file_prefix, "pyramid");
    assert!(config.output_dir.is_none());
}

#[test]
fn test_successful_generation() {
    let (pipeline, written) = mock_pipeline(false, false, None, PyramidConfig::default());

    let pyramid = pipeline.generate(b"fake image data").unwrap();
    assert_eq!(pyramid.len(), 4);

    let dir = tempfile::tempdir().unwrap();
    let paths = pipeline.write_pyramid(&pyramid, dir.path()).unwrap();

    assert_eq!(paths.len(), 4);
    assert_eq!(
        *written.lock().unwrap(),
        vec![(8, 8), (4, 4), (2, 2), (1, 1)]
    );
    assert_eq!(
        files_in(dir.path()),
        vec!["pyramid_0.png", "pyramid_1.png", "pyramid_2.png", "pyramid_3.png"]
    );
}

#[test]
fn test_reader_failure() {
    let (pipeline, written) = mock_pipeline(true, false, None, PyramidConfig::default());

    let result = pipeline.generate(b"fake image data");

    assert!(matches!(result.unwrap_err(), MipmapError::DecodeError(_)));
    assert!(written.lock().unwrap().is_empty());
}

#[test]
fn test_writer_failure_stops_at_first_level() {
    let (pipeline, written) = mock_pipeline(false, true, None, PyramidConfig::default());
    let pyramid = pipeline.generate(b"fake image data").unwrap();

    let dir = tempfile::tempdir().unwrap();
    let result = pipeline.write_pyramid(&pyramid, dir.path());

    assert!(matches!(result.unwrap_err(), MipmapError::EncodeError(_)));
    assert_eq!(written.lock().unwrap().len(), 1);
}

#[test]
fn test_unwritable_output_directory() {
    let (pipeline, written) = mock_pipeline(false, false, None, PyramidConfig::default());
    let pyramid = pipeline.generate(b"fake image data").unwrap();

    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("does").join("not").join("exist");
    let result = pipeline.write_pyramid(&pyramid, &missing);

    assert!(matches!(result.unwrap_err(), MipmapError::EncodeError(_)));
    assert!(written.lock().unwrap().is_empty());
}

#[test]
fn test_dimension_validation_failure() {
    let config = PyramidConfig::builder()
        .validate_dimensions(true)
        .max_dimension(Some(16))
        .build();
    let large = RasterBuffer::filled(32, 4, Rgb::BLACK).unwrap();
    let (pipeline, _) = mock_pipeline(false, false, Some(large), config);

    let result = pipeline.generate(b"fake image data");

    assert!(matches!(result.unwrap_err(), MipmapError::InvalidDimensions(32, 4)));
}

#[test]
fn test_dimension_validation_disabled() {
    let config = PyramidConfig::builder()
        .validate_dimensions(false)
        .max_dimension(Some(16))
        .build();
    let large = RasterBuffer::filled(32, 4, Rgb::BLACK).unwrap();
    let (pipeline, _) = mock_pipeline(false, false, Some(large), config);

    let pyramid = pipeline.generate(b"fake image data").unwrap();

    assert_eq!(pyramid.len(), 6);
}

#[test]
fn test_strategy_selects_builder() {
    let source = RasterBuffer::filled(5, 3, Rgb::new(0.5, 0.5, 0.5)).unwrap();

    let pot = PyramidConfig::builder().strategy(BuildStrategy::PowerOfTwo).build();
    let (pipeline, _) = mock_pipeline(false, false, Some(source.clone()), pot);
    let pyramid = pipeline.generate(b"").unwrap();
    assert_eq!(pyramid.base().raster().dimensions(), (8, 4));
    assert_eq!(pyramid.len(), 4);

    let npot = PyramidConfig::builder().strategy(BuildStrategy::NonPowerOfTwo).build();
    let (pipeline, _) = mock_pipeline(false, false, Some(source.clone()), npot);
    let pyramid = pipeline.generate(b"").unwrap();
    assert_eq!(pyramid.base().raster(), &source);
    assert_eq!(pyramid.len(), 3);
}

#[test]
fn test_generate_with_timings_records_steps() {
    let (pipeline, _) = mock_pipeline(false, false, None, PyramidConfig::default());

    let (_, timings) = pipeline.generate_with_timings(b"").unwrap();

    let names: Vec<&str> = timings.steps().iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["decode", "validate_dimensions", "build_pyramid"]);
}

#[test]
fn test_level_path_naming() {
    let config = PyramidConfig::builder()
        .output_format(OutputFormat::Tiff)
        .file_prefix("mip")
        .build();
    let (pipeline, _) = mock_pipeline(false, false, None, config);

    assert_eq!(
        pipeline.level_path(Path::new("assets"), 3),
        Path::new("assets").join("mip_3.tiff")
    );
    assert_eq!(
        pipeline.output_dir_for(Path::new("textures/brick.png")),
        Path::new("textures")
    );
    assert_eq!(pipeline.output_dir_for(Path::new("brick.png")), Path::new(""));
}

#[test]
fn test_set_config() {
    let (mut pipeline, _) = mock_pipeline(false, false, None, PyramidConfig::default());
    pipeline.set_config(PyramidConfig::builder().file_prefix("other").build());

    assert_eq!(pipeline.config().file_prefix, "other");
}

#[test]
fn test_generate_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("checker.png");
    checkerboard_png(&input);

    let pipeline = MipmapPipeline::new(PyramidConfig::default());
    let (paths, timings) = pipeline.generate_file_with_timings(&input).unwrap();

    assert_eq!(paths.len(), 3);
    assert_eq!(paths[0], dir.path().join("pyramid_0.png"));
    assert!(timings.get_step("encode_level").is_some());

    let level0 = image::open(&paths[0]).unwrap().to_rgb8();
    let source = image::open(&input).unwrap().to_rgb8();
    assert_eq!(level0, source);

    // every quadrant holds two white and two black pixels
    let level1 = image::open(&paths[1]).unwrap().to_rgb8();
    assert_eq!(level1.dimensions(), (2, 2));
    assert!(level1.pixels().all(|p| p.0 == [128, 128, 128]));

    let level2 = image::open(&paths[2]).unwrap().to_rgb8();
    assert_eq!(level2.dimensions(), (1, 1));
    assert_eq!(level2.get_pixel(0, 0).0, [128, 128, 128]);
}

#[test]
fn test_generate_file_into_output_dir_as_tiff() {
    let input_dir = tempfile::tempdir().unwrap();
    let output_dir = tempfile::tempdir().unwrap();
    let input = input_dir.path().join("checker.png");
    checkerboard_png(&input);

    let config = PyramidConfig::builder()
        .strategy(BuildStrategy::NonPowerOfTwo)
        .output_format(OutputFormat::Tiff)
        .compression(TiffCompression::Lzw)
        .output_dir(Some(output_dir.path().to_path_buf()))
        .build();
    let paths = MipmapPipeline::new(config).generate_file(&input).unwrap();

    assert_eq!(paths.len(), 3);
    assert_eq!(
        files_in(output_dir.path()),
        vec!["pyramid_0.tiff", "pyramid_1.tiff", "pyramid_2.tiff"]
    );
    assert_eq!(files_in(input_dir.path()), vec!["checker.png"]);
}

#[test]
fn test_generate_file_missing_input() {
    let dir = tempfile::tempdir().unwrap();
    let pipeline = MipmapPipeline::new(PyramidConfig::default());

    let result = pipeline.generate_file(dir.path().join("missing.png"));

    assert!(matches!(result.unwrap_err(), MipmapError::DecodeError(_)));
    assert!(files_in(dir.path()).is_empty());
}

#[test]
fn test_generate_file_rejects_non_rgb_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("gray.png");
    image::GrayImage::from_pixel(4, 4, image::Luma([10])).save(&input).unwrap();

    let pipeline = MipmapPipeline::new(PyramidConfig::default());
    let result = pipeline.generate_file(&input);

    assert!(matches!(result.unwrap_err(), MipmapError::DecodeError(_)));
    assert_eq!(files_in(dir.path()), vec!["gray.png"]);
}

#[test]
fn test_failed_level_write_is_encode_error() {
    let source = RasterBuffer::filled(4, 4, Rgb::new(0.2, 0.4, 0.6)).unwrap();
    let (reader_pipeline, _) = mock_pipeline(false, false, Some(source), PyramidConfig::default());
    let pyramid = reader_pipeline.generate(b"").unwrap();

    for format in [OutputFormat::Png, OutputFormat::Tiff] {
        let config = PyramidConfig::builder().output_format(format).build();
        let pipeline = MipmapPipeline::new(config);

        let err = pipeline.write_level(pyramid.base(), &mut FullDisk).unwrap_err();

        assert!(matches!(err, MipmapError::EncodeError(_)), "{:?}: {}", format, err);
        assert!(err.to_string().contains("disk full"));
    }
}
