//! Grayscale frame produced by a kernel

/// Sample depth of a kernel's output frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleDepth {
    /// One byte per sample
    Gray8,
    /// Two little-endian bytes per sample
    Gray16Le,
}

impl SampleDepth {
    pub fn bytes_per_sample(self) -> usize {
        match self {
            SampleDepth::Gray8 => 1,
            SampleDepth::Gray16Le => 2,
        }
    }
}

/// Represents one output frame, row padding included
#[derive(Debug, Clone)]
pub struct GrayFrame {
    /// Width of the frame in pixels
    pub width: usize,
    /// Height of the frame in pixels
    pub height: usize,
    /// Bytes between the starts of consecutive rows
    pub stride: usize,
    /// Output sample depth
    pub depth: SampleDepth,
    /// Raw bytes, `height * stride` long
    pub data: Vec<u8>,
}

impl GrayFrame {
    /// Pixel bytes of row `y` without padding.
    pub fn row(&self, y: usize) -> &[u8] {
        let start = y * self.stride;
        &self.data[start..start + self.width * self.depth.bytes_per_sample()]
    }

    /// Densely packed 8-bit samples; `None` for 16-bit frames.
    pub fn to_gray8(&self) -> Option<Vec<u8>> {
        if self.depth != SampleDepth::Gray8 {
            return None;
        }
        Some((0..self.height).flat_map(|y| self.row(y).iter().copied()).collect())
    }

    /// Densely packed 16-bit samples; `None` for 8-bit frames.
    pub fn to_gray16(&self) -> Option<Vec<u16>> {
        if self.depth != SampleDepth::Gray16Le {
            return None;
        }
        Some(
            (0..self.height)
                .flat_map(|y| {
                    self.row(y)
                        .chunks_exact(2)
                        .map(|b| u16::from_le_bytes([b[0], b[1]]))
                })
                .collect(),
        )
    }
}
