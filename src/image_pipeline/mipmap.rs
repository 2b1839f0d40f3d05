//! Mipmap generation module
//!
//! Pyramid types, the shared level-count rule, and the two builders:
//! power-of-two padding with 2x2 box halving, and direct non-power-of-two
//! halving with a separable 3-tap filter.

mod builder;
mod level_count;
mod non_power_of_two;
mod power_of_two;
mod pyramid;
mod rows;

pub use builder::{BuildStrategy, PyramidBuilder};
pub use level_count::level_count;
pub use non_power_of_two::NonPowerOfTwoBuilder;
pub use power_of_two::{PowerOfTwoBuilder, padded_dimensions};
pub use pyramid::{Pyramid, PyramidLevel};
