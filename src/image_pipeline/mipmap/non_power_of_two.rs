//! Non-power-of-two mipmap generation.
//!
//! Levels keep the source's aspect and are derived directly from the
//! previous level, including odd sizes. Each level is a separable resample:
//! a horizontal pass into a `w x prev_h` intermediate, then a vertical pass
//! into the final `w x h` level. Both passes share [`filter_taps`].
//!
//! For an odd extent `prev = 2n + 1` every destination sample `k` blends
//! three source samples `2k, 2k+1, 2k+2` with weights
//! `(n-k)/prev, n/prev, (k+1)/prev`, which is the area each source sample
//! covers under a destination footprint of width `prev/n`. An even extent is
//! an exact halving and uses the 2-tap box. Weights always sum to one.

use tracing::{debug, info};

use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::mipmap::builder::PyramidBuilder;
use crate::image_pipeline::mipmap::level_count::level_count;
use crate::image_pipeline::mipmap::pyramid::Pyramid;
use crate::image_pipeline::mipmap::rows::fill_rows;
use crate::image_pipeline::raster::{RasterBuffer, Rgb};

pub struct NonPowerOfTwoBuilder {
    parallel: bool,
}

impl Default for NonPowerOfTwoBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl NonPowerOfTwoBuilder {
    pub fn new() -> Self {
        Self { parallel: true }
    }

    pub fn with_parallel(parallel: bool) -> Self {
        Self { parallel }
    }
}

impl PyramidBuilder for NonPowerOfTwoBuilder {
    fn build(&self, source: RasterBuffer) -> Result<Pyramid> {
        let (width, height) = source.dimensions();
        let levels = level_count(width, height)?;
        info!("Image resolution {}x{}, pyramid size {}", width, height, levels);

        let mut rasters = Vec::with_capacity(levels as usize);
        rasters.push(source);
        for i in 1..levels as usize {
            let prev = &rasters[i - 1];
            let w = (prev.width() >> 1).max(1);
            let h = (prev.height() >> 1).max(1);
            debug!("Level {}: {}x{}", i, w, h);

            let next = downsample(prev, w, h, self.parallel)?;
            rasters.push(next);
        }

        Ok(Pyramid::from_rasters(rasters))
    }
}

/// Source samples and weights contributing to one destination sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct FilterTaps {
    pub index: [usize; 3],
    pub weight: [f32; 3],
}

impl FilterTaps {
    #[inline]
    fn apply(&self, sample: impl Fn(usize) -> Rgb) -> Rgb {
        sample(self.index[0]) * self.weight[0]
            + sample(self.index[1]) * self.weight[1]
            + sample(self.index[2]) * self.weight[2]
    }
}

/// Taps for destination sample `k` when reducing an axis of `prev` samples
/// to `dst` samples, where `dst == max(1, prev >> 1)`.
///
/// The third index is clamped to `2k + 1` when `2k + 2` falls past the last
/// source sample, which only happens for even extents where its weight is 0.
pub(crate) fn filter_taps(prev: usize, dst: usize, k: usize) -> FilterTaps {
    debug_assert_eq!(dst, (prev >> 1).max(1));
    debug_assert!(k < dst);

    if prev == 1 {
        return FilterTaps {
            index: [0; 3],
            weight: [1.0, 0.0, 0.0],
        };
    }

    let third = if 2 * k + 2 < prev { 2 * k + 2 } else { 2 * k + 1 };
    let index = [2 * k, 2 * k + 1, third];

    let weight = if prev % 2 == 0 {
        [0.5, 0.5, 0.0]
    } else {
        let prev = prev as f32;
        [
            (dst - k) as f32 / prev,
            dst as f32 / prev,
            (k + 1) as f32 / prev,
        ]
    };

    FilterTaps { index, weight }
}

fn downsample(prev: &RasterBuffer, w: u32, h: u32, parallel: bool) -> Result<RasterBuffer> {
    let (prev_w, prev_h) = (prev.width() as usize, prev.height() as usize);
    let (w_us, h_us) = (w as usize, h as usize);

    let column_taps: Vec<FilterTaps> = (0..w_us).map(|k| filter_taps(prev_w, w_us, k)).collect();
    let mut horizontal = vec![Rgb::BLACK; w_us * prev_h];
    fill_rows(&mut horizontal, w_us, parallel, |y, row| {
        let src = prev.row(y);
        for (out, taps) in row.iter_mut().zip(column_taps.iter()) {
            *out = taps.apply(|x| src[x]);
        }
    });
    let horizontal = RasterBuffer::new(w, prev.height(), horizontal)?;

    let row_taps: Vec<FilterTaps> = (0..h_us).map(|j| filter_taps(prev_h, h_us, j)).collect();
    let mut pixels = vec![Rgb::BLACK; w_us * h_us];
    fill_rows(&mut pixels, w_us, parallel, |y, row| {
        let taps = &row_taps[y];
        let rows = taps.index.map(|i| horizontal.row(i));
        for (x, out) in row.iter_mut().enumerate() {
            *out = rows[0][x] * taps.weight[0]
                + rows[1][x] * taps.weight[1]
                + rows[2][x] * taps.weight[2];
        }
    });

    RasterBuffer::new(w, h, pixels)
}
