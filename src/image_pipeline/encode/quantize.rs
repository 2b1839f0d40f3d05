use crate::image_pipeline::raster::RasterBuffer;

/// Maps a linear channel value to 8 bits: clamp to `[0, 1]`, scale to
/// `[0, 255]`, round to nearest.
#[inline]
pub fn quantize_channel(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Interleaved RGB8 bytes for `raster`, row-major.
pub fn to_rgb8(raster: &RasterBuffer) -> Vec<u8> {
    raster
        .pixels()
        .iter()
        .flat_map(|p| p.0.map(quantize_channel))
        .collect()
}
