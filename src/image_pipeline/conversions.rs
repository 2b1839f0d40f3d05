//! Pipeline conversions module
//!
//! Orchestrates decoding, pyramid construction and per-level encoding.

mod image_to_mipmap;
mod timing;

#[cfg(test)]
mod tests;

pub use image_to_mipmap::MipmapPipeline;
pub use timing::{PipelineTimings, StepTiming, Timer};
