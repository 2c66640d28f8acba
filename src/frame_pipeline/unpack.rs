//! Packed video unpacking module
//!
//! Expands v210 or UYVY frames that carry IR data in their chroma and luma
//! channels into 16-bit grayscale.

pub mod layout;
pub mod params;
mod unpacker;

#[cfg(test)]
mod tests;

pub use layout::SourceLayout;
pub use params::{UnpackParams, UnpackParamsBuilder, MAX_SHIFT};
pub use unpacker::{unpack_frame, PackedUnpacker};
