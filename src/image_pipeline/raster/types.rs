//! Floating-point RGB raster types

use std::ops::{Add, Mul};

use crate::image_pipeline::common::error::{MipmapError, Result};

/// Linear RGB triple. Components are unconstrained while filtering and only
/// clamped when a raster is quantized for storage.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rgb(pub [f32; 3]);

impl Rgb {
    pub const BLACK: Rgb = Rgb([0.0; 3]);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self([r, g, b])
    }

    pub fn r(&self) -> f32 {
        self.0[0]
    }

    pub fn g(&self) -> f32 {
        self.0[1]
    }

    pub fn b(&self) -> f32 {
        self.0[2]
    }

    /// Largest per-channel absolute difference.
    pub fn max_abs_diff(&self, other: &Rgb) -> f32 {
        self.0
            .iter()
            .zip(other.0.iter())
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f32::max)
    }
}

impl Add for Rgb {
    type Output = Rgb;

    fn add(self, rhs: Rgb) -> Rgb {
        Rgb([
            self.0[0] + rhs.0[0],
            self.0[1] + rhs.0[1],
            self.0[2] + rhs.0[2],
        ])
    }
}

impl Mul<f32> for Rgb {
    type Output = Rgb;

    fn mul(self, rhs: f32) -> Rgb {
        Rgb([self.0[0] * rhs, self.0[1] * rhs, self.0[2] * rhs])
    }
}

/// Rectangular buffer of RGB samples in row-major order.
///
/// `pixels.len() == width * height` holds for every constructed buffer and
/// both dimensions are at least 1.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Rgb>,
}

impl RasterBuffer {
    /// Wraps `pixels` as a `width x height` raster.
    ///
    /// Fails with `InvalidDimensions` when either dimension is zero and with
    /// `PixelCountMismatch` when the pixel vector has the wrong length.
    pub fn new(width: u32, height: u32, pixels: Vec<Rgb>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(MipmapError::InvalidDimensions(width, height));
        }

        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(MipmapError::PixelCountMismatch {
                expected,
                actual: pixels.len(),
            });
        }

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Creates a raster with every pixel set to `color`.
    pub fn filled(width: u32, height: u32, color: Rgb) -> Result<Self> {
        let count = width as usize * height as usize;
        Self::new(width, height, vec![color; count])
    }

    /// Builds a raster from interleaved `[r, g, b, r, g, b, ...]` samples.
    pub fn from_interleaved(width: u32, height: u32, samples: &[f32]) -> Result<Self> {
        if samples.len() % 3 != 0 {
            return Err(MipmapError::PixelCountMismatch {
                expected: width as usize * height as usize * 3,
                actual: samples.len(),
            });
        }

        let pixels = samples
            .chunks_exact(3)
            .map(|c| Rgb([c[0], c[1], c[2]]))
            .collect();
        Self::new(width, height, pixels)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    #[inline]
    pub fn index(&self, x: usize, y: usize) -> usize {
        y * self.width as usize + x
    }

    /// Pixel at column `x`, row `y`. Panics when out of bounds.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Rgb {
        self.pixels[self.index(x, y)]
    }

    pub fn row(&self, y: usize) -> &[Rgb] {
        let w = self.width as usize;
        &self.pixels[y * w..(y + 1) * w]
    }

    /// Arithmetic mean over all pixels.
    pub fn mean(&self) -> Rgb {
        let mut sum = [0.0f64; 3];
        for p in &self.pixels {
            for (acc, v) in sum.iter_mut().zip(p.0.iter()) {
                *acc += f64::from(*v);
            }
        }
        let n = self.pixels.len() as f64;
        Rgb([
            (sum[0] / n) as f32,
            (sum[1] / n) as f32,
            (sum[2] / n) as f32,
        ])
    }
}
