//! Encoding settings for kernel output frames

use tracing::warn;

use crate::frame_pipeline::common::{KernelError, Result};

/// Largest width or height accepted unless the limit is lifted
pub const DEFAULT_MAX_DIMENSION: usize = 16384;

/// Strip compression for written frames
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TiffCompression {
    #[default]
    Uncompressed,
    Lzw,
    /// Deflate at its balanced level
    Deflate,
}

/// Sample prediction applied before compression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SamplePredictor {
    #[default]
    None,
    /// Store each sample as the difference from its left neighbour
    Horizontal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    pub compression: TiffCompression,
    pub predictor: SamplePredictor,
    /// Frames wider or taller than this are refused; `None` lifts the limit
    pub max_dimension: Option<usize>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            compression: TiffCompression::Uncompressed,
            predictor: SamplePredictor::None,
            max_dimension: Some(DEFAULT_MAX_DIMENSION),
        }
    }
}

impl OutputConfig {
    pub fn with_compression(mut self, compression: TiffCompression) -> Self {
        self.compression = compression;
        self
    }

    pub fn with_predictor(mut self, predictor: SamplePredictor) -> Self {
        self.predictor = predictor;
        self
    }

    pub fn with_max_dimension(mut self, max: Option<usize>) -> Self {
        self.max_dimension = max;
        self
    }

    /// Refuse empty frames and frames beyond `max_dimension`.
    pub fn check_dimensions(&self, width: usize, height: usize) -> Result<()> {
        if width == 0 || height == 0 {
            return Err(KernelError::InvalidDimensions(width, height));
        }
        match self.max_dimension {
            Some(max) if width > max || height > max => {
                warn!(width, height, max, "Frame dimensions exceed maximum");
                Err(KernelError::InvalidDimensions(width, height))
            }
            _ => Ok(()),
        }
    }
}
