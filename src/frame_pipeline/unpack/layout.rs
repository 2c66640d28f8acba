//! Packed source layouts understood by the unpacker

use std::fmt;
use std::str::FromStr;

use crate::frame_pipeline::common::{round_up_4, Endianness, FrameGeometry, KernelError};

/// Source pixel layout negotiated for the unpacker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceLayout {
    /// v210: three 10-bit chroma/luma pairs in every two 32-bit little-endian words
    TenBitPacked,
    /// UYVY: one byte of chroma followed by one byte of luma
    InterleavedByte,
}

impl SourceLayout {
    /// Format tag used by the negotiation layer.
    pub fn tag(self) -> &'static str {
        match self {
            SourceLayout::TenBitPacked => "v210",
            SourceLayout::InterleavedByte => "UYVY",
        }
    }

    /// Source bytes needed to cover `width` output samples, or `None` on overflow.
    pub fn min_row_bytes(self, width: usize) -> Option<usize> {
        match self {
            SourceLayout::TenBitPacked => width.div_ceil(3).checked_mul(8),
            SourceLayout::InterleavedByte => width.checked_mul(2),
        }
    }

    /// Conventional row stride; v210 rows are padded to 48-pixel blocks of 128 bytes.
    pub fn default_stride(self, width: usize) -> usize {
        match self {
            SourceLayout::TenBitPacked => width.div_ceil(48).saturating_mul(128),
            SourceLayout::InterleavedByte => round_up_4(width.saturating_mul(2)),
        }
    }

    /// Geometry of this layout unpacked to 16-bit little-endian gray.
    pub fn geometry(self, width: usize, height: usize) -> FrameGeometry {
        FrameGeometry {
            width,
            height,
            stride_in: self.default_stride(width),
            stride_out: round_up_4(width.saturating_mul(2)),
            endianness: Endianness::Little,
            signed: false,
        }
    }
}

impl fmt::Display for SourceLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

impl FromStr for SourceLayout {
    type Err = KernelError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag.to_ascii_lowercase().as_str() {
            "v210" => Ok(SourceLayout::TenBitPacked),
            "uyvy" => Ok(SourceLayout::InterleavedByte),
            _ => Err(KernelError::UnknownLayout(tag.to_string())),
        }
    }
}
