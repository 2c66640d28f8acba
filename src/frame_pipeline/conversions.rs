//! Pipeline conversions module
//!
//! This module wires kernels to frame files on disk.

mod frame_to_tiff;


pub use frame_to_tiff::FramePipeline;
