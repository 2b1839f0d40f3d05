use crate::image_pipeline::common::error::{MipmapError, Result};

/// Number of pyramid levels for a `width x height` base level.
///
/// `floor(log2(max(width, height))) + 1`, so halving the larger dimension
/// `levels - 1` times lands exactly on 1. Both builders size their cascade
/// with this function.
pub fn level_count(width: u32, height: u32) -> Result<u32> {
    if width == 0 || height == 0 {
        return Err(MipmapError::InvalidDimensions(width, height));
    }

    Ok(width.max(height).ilog2() + 1)
}
