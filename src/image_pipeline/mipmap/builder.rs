use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::mipmap::non_power_of_two::NonPowerOfTwoBuilder;
use crate::image_pipeline::mipmap::power_of_two::PowerOfTwoBuilder;
use crate::image_pipeline::mipmap::pyramid::Pyramid;
use crate::image_pipeline::raster::RasterBuffer;

pub trait PyramidBuilder {
    fn build(&self, source: RasterBuffer) -> Result<Pyramid>;
}

/// Selects how levels are derived from the source image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BuildStrategy {
    /// Resample to power-of-two dimensions, then halve with 2x2 box averages
    #[default]
    PowerOfTwo,
    /// Keep the source size and halve with a separable 3-tap filter
    NonPowerOfTwo,
}

impl BuildStrategy {
    pub fn builder(self, parallel: bool) -> Box<dyn PyramidBuilder + Send + Sync> {
        match self {
            BuildStrategy::PowerOfTwo => Box::new(PowerOfTwoBuilder::with_parallel(parallel)),
            BuildStrategy::NonPowerOfTwo => {
                Box::new(NonPowerOfTwoBuilder::with_parallel(parallel))
            }
        }
    }
}
