//! Power-of-two mipmap generation.
//!
//! The source is first resampled to the next power-of-two size on every axis
//! that is not one already, then each level is the exact 2x2 box average of
//! the level before it.

use tracing::{debug, info};

use crate::image_pipeline::common::error::{MipmapError, Result};
use crate::image_pipeline::mipmap::builder::PyramidBuilder;
use crate::image_pipeline::mipmap::level_count::level_count;
use crate::image_pipeline::mipmap::pyramid::Pyramid;
use crate::image_pipeline::mipmap::rows::fill_rows;
use crate::image_pipeline::raster::{RasterBuffer, Rgb};

pub struct PowerOfTwoBuilder {
    parallel: bool,
}

impl Default for PowerOfTwoBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PowerOfTwoBuilder {
    pub fn new() -> Self {
        Self { parallel: true }
    }

    pub fn with_parallel(parallel: bool) -> Self {
        Self { parallel }
    }
}

impl PyramidBuilder for PowerOfTwoBuilder {
    fn build(&self, source: RasterBuffer) -> Result<Pyramid> {
        let (width, height) = source.dimensions();
        info!("Image resolution {}x{}", width, height);

        let (pot_w, pot_h) = padded_dimensions(width, height)?;
        let base = if (pot_w, pot_h) == (width, height) {
            source
        } else {
            info!("Resampling to power-of-two resolution {}x{}", pot_w, pot_h);
            resample_to(&source, pot_w, pot_h, self.parallel)?
        };

        let levels = level_count(pot_w, pot_h)?;
        info!("Pyramid size {}", levels);

        let mut rasters = Vec::with_capacity(levels as usize);
        rasters.push(base);
        for i in 1..levels {
            let w = (pot_w >> i).max(1);
            let h = (pot_h >> i).max(1);
            debug!("Level {}: {}x{}", i, w, h);

            let next = halve(&rasters[i as usize - 1], w, h, self.parallel)?;
            rasters.push(next);
        }

        Ok(Pyramid::from_rasters(rasters))
    }
}

/// Smallest power-of-two size at or above each dimension, checked per axis.
pub fn padded_dimensions(width: u32, height: u32) -> Result<(u32, u32)> {
    if width == 0 || height == 0 {
        return Err(MipmapError::InvalidDimensions(width, height));
    }

    match (
        width.checked_next_power_of_two(),
        height.checked_next_power_of_two(),
    ) {
        (Some(w), Some(h)) => Ok((w, h)),
        _ => Err(MipmapError::InvalidDimensions(width, height)),
    }
}

/// Source indices averaged for destination position `j` along one axis.
///
/// An axis that keeps its size maps 1:1. Otherwise `j` is scaled back into
/// the source and the pair is clamped so the second tap stays in bounds; a
/// single-pixel axis replicates its only sample.
fn padding_taps(src_len: usize, dst_len: usize, j: usize) -> (usize, usize) {
    if src_len == dst_len {
        return (j, j);
    }

    let pos = (src_len as f64 / dst_len as f64 * j as f64).floor() as usize;
    let first = pos.min(src_len.saturating_sub(2));
    let second = (first + 1).min(src_len - 1);
    (first, second)
}

fn resample_to(
    src: &RasterBuffer,
    dst_w: u32,
    dst_h: u32,
    parallel: bool,
) -> Result<RasterBuffer> {
    let (src_w, src_h) = (src.width() as usize, src.height() as usize);
    let (dst_w_us, dst_h_us) = (dst_w as usize, dst_h as usize);

    let x_taps: Vec<(usize, usize)> = (0..dst_w_us)
        .map(|j| padding_taps(src_w, dst_w_us, j))
        .collect();
    let y_taps: Vec<(usize, usize)> = (0..dst_h_us)
        .map(|i| padding_taps(src_h, dst_h_us, i))
        .collect();

    let mut pixels = vec![Rgb::BLACK; dst_w_us * dst_h_us];
    fill_rows(&mut pixels, dst_w_us, parallel, |i, row| {
        let (y0, y1) = y_taps[i];
        for (out, &(x0, x1)) in row.iter_mut().zip(x_taps.iter()) {
            *out = box_average(src, x0, x1, y0, y1);
        }
    });

    RasterBuffer::new(dst_w, dst_h, pixels)
}

/// Exact 2x2 reduction of `prev` into a `w x h` level. A previous level that
/// is a single column or row replicates it instead of reading past the edge.
fn halve(prev: &RasterBuffer, w: u32, h: u32, parallel: bool) -> Result<RasterBuffer> {
    let (prev_w, prev_h) = (prev.width() as usize, prev.height() as usize);
    let w_us = w as usize;

    let mut pixels = vec![Rgb::BLACK; w_us * h as usize];
    fill_rows(&mut pixels, w_us, parallel, |j, row| {
        let (y0, y1) = if prev_h == 1 { (0, 0) } else { (2 * j, 2 * j + 1) };
        for (k, out) in row.iter_mut().enumerate() {
            let (x0, x1) = if prev_w == 1 { (0, 0) } else { (2 * k, 2 * k + 1) };
            *out = box_average(prev, x0, x1, y0, y1);
        }
    });

    RasterBuffer::new(w, h, pixels)
}

#[inline]
fn box_average(src: &RasterBuffer, x0: usize, x1: usize, y0: usize, y1: usize) -> Rgb {
    (src.get(x0, y0) + src.get(x1, y0) + src.get(x0, y1) + src.get(x1, y1)) * 0.25
}
