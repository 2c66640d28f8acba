//! Video levels module
//!
//! Converts 16-bit grayscale frames to 8-bit grayscale through a
//! piecewise-linear lookup table built from four normalized levels.

pub mod lut;
pub mod params;
mod transform;


pub use lut::LevelLut;
pub use params::{LevelParams, LevelParamsBuilder};
pub use transform::{apply_levels, LevelTransform};
