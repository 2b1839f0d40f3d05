//! Pyramid data types

use crate::image_pipeline::raster::RasterBuffer;

/// One resolution of a pyramid. Level 0 is the full-resolution base.
#[derive(Debug, Clone, PartialEq)]
pub struct PyramidLevel {
    index: u32,
    raster: RasterBuffer,
}

impl PyramidLevel {
    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn raster(&self) -> &RasterBuffer {
        &self.raster
    }

    pub fn width(&self) -> u32 {
        self.raster.width()
    }

    pub fn height(&self) -> u32 {
        self.raster.height()
    }
}

/// Ordered mipmap levels, base first, ending at a 1x1 level.
///
/// Only the builders create pyramids; once built a pyramid is read-only.
#[derive(Debug, Clone, PartialEq)]
pub struct Pyramid {
    levels: Vec<PyramidLevel>,
}

impl Pyramid {
    /// Tags `rasters` with their level index.
    ///
    /// `rasters` must be non-empty with non-increasing dimensions and a 1x1
    /// last entry.
    pub(crate) fn from_rasters(rasters: Vec<RasterBuffer>) -> Self {
        debug_assert!(!rasters.is_empty());
        debug_assert!(
            rasters
                .windows(2)
                .all(|p| p[1].width() <= p[0].width() && p[1].height() <= p[0].height())
        );
        debug_assert!(rasters.last().is_some_and(|r| r.dimensions() == (1, 1)));

        let levels = rasters
            .into_iter()
            .enumerate()
            .map(|(index, raster)| PyramidLevel {
                index: index as u32,
                raster,
            })
            .collect();

        Self { levels }
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn levels(&self) -> &[PyramidLevel] {
        &self.levels
    }

    pub fn level(&self, index: usize) -> Option<&PyramidLevel> {
        self.levels.get(index)
    }

    /// Full-resolution level.
    pub fn base(&self) -> &PyramidLevel {
        &self.levels[0]
    }

    /// The 1x1 level.
    pub fn top(&self) -> &PyramidLevel {
        &self.levels[self.levels.len() - 1]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PyramidLevel> {
        self.levels.iter()
    }
}

impl<'a> IntoIterator for &'a Pyramid {
    type Item = &'a PyramidLevel;
    type IntoIter = std::slice::Iter<'a, PyramidLevel>;

    fn into_iter(self) -> Self::IntoIter {
        self.levels.iter()
    }
}
