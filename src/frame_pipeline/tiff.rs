//! TIFF writing module
//!
//! This module writes kernel output frames as grayscale TIFF files.

mod writer;
mod standard_tiff_writer;
pub mod types;

pub use writer::FrameWriter;
pub use standard_tiff_writer::StandardTiffWriter;
pub use types::{OutputConfig, SamplePredictor, TiffCompression, DEFAULT_MAX_DIMENSION};
