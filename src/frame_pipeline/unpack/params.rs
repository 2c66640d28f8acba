//! Unpacking parameters

/// Largest accepted luma shift
pub const MAX_SHIFT: u32 = 15;

/// Per-sample arithmetic applied while unpacking.
///
/// Each output sample is
/// `((chroma + offset) & chroma_mask) | (((luma + offset) & luma_mask) << shift)`
/// with luma and chroma exchanged first when `swap` is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnpackParams {
    /// Added to both components before masking
    pub offset: i16,
    /// Bits to left shift the masked luma, 0 to 15
    pub shift: u32,
    /// Whether to swap luma and chroma
    pub swap: bool,
    pub luma_mask: u16,
    pub chroma_mask: u16,
}

impl Default for UnpackParams {
    fn default() -> Self {
        Self {
            offset: -64,
            shift: 8,
            swap: false,
            luma_mask: 0xff,
            chroma_mask: 0xff,
        }
    }
}

impl UnpackParams {
    pub fn builder() -> UnpackParamsBuilder {
        UnpackParamsBuilder::default()
    }
}

/// Builder for UnpackParams
#[derive(Default)]
pub struct UnpackParamsBuilder {
    offset: Option<i16>,
    shift: Option<u32>,
    swap: Option<bool>,
    luma_mask: Option<u16>,
    chroma_mask: Option<u16>,
}

impl UnpackParamsBuilder {
    pub fn offset(mut self, offset: i16) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Values above 15 are clamped.
    pub fn shift(mut self, shift: u32) -> Self {
        self.shift = Some(shift.min(MAX_SHIFT));
        self
    }

    pub fn swap(mut self, swap: bool) -> Self {
        self.swap = Some(swap);
        self
    }

    pub fn luma_mask(mut self, mask: u16) -> Self {
        self.luma_mask = Some(mask);
        self
    }

    pub fn chroma_mask(mut self, mask: u16) -> Self {
        self.chroma_mask = Some(mask);
        self
    }

    pub fn build(self) -> UnpackParams {
        let default = UnpackParams::default();
        UnpackParams {
            offset: self.offset.unwrap_or(default.offset),
            shift: self.shift.unwrap_or(default.shift),
            swap: self.swap.unwrap_or(default.swap),
            luma_mask: self.luma_mask.unwrap_or(default.luma_mask),
            chroma_mask: self.chroma_mask.unwrap_or(default.chroma_mask),
        }
    }
}
