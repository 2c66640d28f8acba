//! Frame geometry shared by both kernels

use crate::frame_pipeline::common::error::{BufferRole, KernelError, Result};

/// Byte order of 16-bit input samples
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endianness {
    Little,
    Big,
}

impl Endianness {
    /// Byte order of the platform we are running on
    #[cfg(target_endian = "little")]
    pub const NATIVE: Endianness = Endianness::Little;
    #[cfg(target_endian = "big")]
    pub const NATIVE: Endianness = Endianness::Big;

    pub fn opposite(self) -> Self {
        match self {
            Endianness::Little => Endianness::Big,
            Endianness::Big => Endianness::Little,
        }
    }

    pub fn is_native(self) -> bool {
        self == Self::NATIVE
    }
}

/// Round a row size up to the next 4-byte boundary.
///
/// Saturates near `usize::MAX`; such sizes never pass validation anyway.
pub const fn round_up_4(n: usize) -> usize {
    n.saturating_add(3) & !3
}

/// Negotiated layout of one frame.
///
/// Strides are byte distances between the starts of consecutive rows. The
/// endianness and signedness flags only matter to the levels transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameGeometry {
    /// Width of the frame in pixels
    pub width: usize,
    /// Height of the frame in pixels
    pub height: usize,
    /// Bytes per input row, padding included
    pub stride_in: usize,
    /// Bytes per output row, padding included
    pub stride_out: usize,
    /// Byte order of 16-bit input samples
    pub endianness: Endianness,
    /// Whether 16-bit input samples are two's complement
    pub signed: bool,
}

impl FrameGeometry {
    /// Geometry of a 16-bit gray to 8-bit gray conversion with 4-byte aligned rows.
    pub fn for_levels(width: usize, height: usize, endianness: Endianness, signed: bool) -> Self {
        Self {
            width,
            height,
            stride_in: round_up_4(width.saturating_mul(2)),
            stride_out: round_up_4(width),
            endianness,
            signed,
        }
    }

    pub fn with_strides(mut self, stride_in: usize, stride_out: usize) -> Self {
        self.stride_in = stride_in;
        self.stride_out = stride_out;
        self
    }

    /// Bytes a source buffer must hold.
    ///
    /// Saturates for geometry whose size does not fit in `usize`, which
    /// `validate` rejects before any kernel indexes a buffer.
    pub fn input_len(&self) -> usize {
        self.height.saturating_mul(self.stride_in)
    }

    /// Bytes a destination buffer must hold; no kernel writes past this.
    pub fn output_len(&self) -> usize {
        self.height.saturating_mul(self.stride_out)
    }

    /// Reject geometry a kernel cannot interpret.
    ///
    /// Row sizes are `None` when computing them overflowed, which is treated
    /// the same as a frame whose total size overflows.
    pub(crate) fn validate(
        &self,
        input_row_bytes: Option<usize>,
        output_row_bytes: Option<usize>,
    ) -> Result<()> {
        let invalid = || KernelError::InvalidDimensions(self.width, self.height);
        if self.width == 0 || self.height == 0 {
            return Err(invalid());
        }
        let (Some(input_row_bytes), Some(output_row_bytes)) = (input_row_bytes, output_row_bytes)
        else {
            return Err(invalid());
        };
        if self.height.checked_mul(self.stride_in).is_none()
            || self.height.checked_mul(self.stride_out).is_none()
        {
            return Err(invalid());
        }
        if self.stride_in < input_row_bytes {
            return Err(KernelError::StrideTooSmall {
                stride: self.stride_in,
                required: input_row_bytes,
            });
        }
        if self.stride_out < output_row_bytes {
            return Err(KernelError::StrideTooSmall {
                stride: self.stride_out,
                required: output_row_bytes,
            });
        }
        Ok(())
    }

    /// Fail fast when either buffer is shorter than the geometry implies.
    pub(crate) fn check_buffers(&self, input: &[u8], output: &[u8]) -> Result<()> {
        if input.len() < self.input_len() {
            return Err(KernelError::BufferTooSmall {
                role: BufferRole::Input,
                len: input.len(),
                required: self.input_len(),
            });
        }
        if output.len() < self.output_len() {
            return Err(KernelError::BufferTooSmall {
                role: BufferRole::Output,
                len: output.len(),
                required: self.output_len(),
            });
        }
        Ok(())
    }
}
