//! Packed chroma/luma to 16-bit grayscale expansion

use tracing::{debug, Span};

use crate::frame_pipeline::common::property::out_of_range;
use crate::frame_pipeline::common::{
    FrameGeometry, KernelError, PropertyAccess, PropertyValue, Result, SampleDepth,
};
use crate::frame_pipeline::kernel::FrameKernel;
use crate::frame_pipeline::unpack::layout::SourceLayout;
use crate::frame_pipeline::unpack::params::{UnpackParams, MAX_SHIFT};

const PROPERTY_NAMES: &[&str] = &["offset", "shift", "swap", "luma-mask", "chroma-mask"];

const TEN_BIT_MASK: u32 = 0x3ff;

/// Bytes holding one v210 group of three samples
const V210_GROUP_BYTES: usize = 8;

/// UnpackParams widened once per frame for 32-bit sample arithmetic.
struct Combiner {
    offset: i32,
    shift: u32,
    swap: bool,
    luma_mask: u32,
    chroma_mask: u32,
}

impl Combiner {
    fn new(params: &UnpackParams) -> Self {
        Self {
            offset: params.offset as i32,
            shift: params.shift.min(MAX_SHIFT),
            swap: params.swap,
            luma_mask: params.luma_mask as u32,
            chroma_mask: params.chroma_mask as u32,
        }
    }

    #[inline]
    fn sample(&self, luma: u16, chroma: u16) -> u16 {
        let (luma, chroma) = if self.swap { (chroma, luma) } else { (luma, chroma) };
        // Negative sums keep their two's complement bits under the mask.
        let chroma = (chroma as i32 + self.offset) as u32 & self.chroma_mask;
        let luma = (luma as i32 + self.offset) as u32 & self.luma_mask;
        (chroma | (luma << self.shift)) as u16
    }
}

/// Split two v210 words into three `(luma, chroma)` pairs.
#[inline]
fn decode_v210_group(word0: u32, word1: u32) -> [(u16, u16); 3] {
    let field = |word: u32, bit: u32| ((word >> bit) & TEN_BIT_MASK) as u16;
    [
        (field(word0, 10), field(word0, 0)),
        (field(word1, 0), field(word0, 20)),
        (field(word1, 20), field(word1, 10)),
    ]
}

/// Unpack one frame of `layout` into 16-bit little-endian grayscale.
///
/// For v210 sources whose width is not a multiple of three the final group
/// is still decoded, but only the columns inside the frame are written.
pub fn unpack_frame(
    layout: SourceLayout,
    geometry: &FrameGeometry,
    params: &UnpackParams,
    input: &[u8],
    output: &mut [u8],
) -> Result<()> {
    geometry.validate(layout.min_row_bytes(geometry.width), geometry.width.checked_mul(2))?;
    geometry.check_buffers(input, output)?;

    let combiner = Combiner::new(params);
    match layout {
        SourceLayout::TenBitPacked => unpack_v210_rows(geometry, &combiner, input, output),
        SourceLayout::InterleavedByte => unpack_uyvy_rows(geometry, &combiner, input, output),
    }
    Ok(())
}

// Row helpers run on validated geometry, so row sizes cannot overflow.
fn unpack_v210_rows(geometry: &FrameGeometry, combiner: &Combiner, input: &[u8], output: &mut [u8]) {
    let width = geometry.width;
    let row_bytes = width.div_ceil(3) * V210_GROUP_BYTES;
    let rows = input
        .chunks(geometry.stride_in)
        .zip(output.chunks_mut(geometry.stride_out))
        .take(geometry.height);

    for (src_row, dst_row) in rows {
        let groups = src_row[..row_bytes].chunks_exact(V210_GROUP_BYTES);
        for (group, dst) in groups.zip(dst_row[..width * 2].chunks_mut(6)) {
            let word0 = u32::from_le_bytes([group[0], group[1], group[2], group[3]]);
            let word1 = u32::from_le_bytes([group[4], group[5], group[6], group[7]]);
            for ((luma, chroma), out) in decode_v210_group(word0, word1)
                .into_iter()
                .zip(dst.chunks_exact_mut(2))
            {
                out.copy_from_slice(&combiner.sample(luma, chroma).to_le_bytes());
            }
        }
    }
}

fn unpack_uyvy_rows(geometry: &FrameGeometry, combiner: &Combiner, input: &[u8], output: &mut [u8]) {
    let width = geometry.width;
    let rows = input
        .chunks(geometry.stride_in)
        .zip(output.chunks_mut(geometry.stride_out))
        .take(geometry.height);

    for (src_row, dst_row) in rows {
        for (pair, out) in src_row[..width * 2]
            .chunks_exact(2)
            .zip(dst_row[..width * 2].chunks_exact_mut(2))
        {
            let (chroma, luma) = (pair[0] as u16, pair[1] as u16);
            out.copy_from_slice(&combiner.sample(luma, chroma).to_le_bytes());
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct NegotiatedFormat {
    layout: SourceLayout,
    geometry: FrameGeometry,
}

/// Unpacks MISB IR style packed video into 16-bit grayscale.
#[derive(Debug)]
pub struct PackedUnpacker {
    params: UnpackParams,
    format: Option<NegotiatedFormat>,
    span: Span,
}

impl Default for PackedUnpacker {
    fn default() -> Self {
        Self::new()
    }
}

impl PackedUnpacker {
    pub fn new() -> Self {
        Self::with_params(UnpackParams::default())
    }

    pub fn with_params(params: UnpackParams) -> Self {
        Self {
            params,
            format: None,
            span: tracing::debug_span!("packed_unpack"),
        }
    }

    /// Attach the span this kernel logs under.
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Accept the source layout and geometry chosen by the negotiation layer.
    pub fn set_format(&mut self, layout: SourceLayout, geometry: FrameGeometry) -> Result<()> {
        let _guard = self.span.enter();
        geometry.validate(layout.min_row_bytes(geometry.width), geometry.width.checked_mul(2))?;
        if layout == SourceLayout::TenBitPacked && geometry.width % 3 != 0 {
            debug!(
                width = geometry.width,
                "v210 width is not a multiple of 3, trailing group will be truncated"
            );
        }
        debug!(
            layout = %layout,
            width = geometry.width,
            height = geometry.height,
            stride_in = geometry.stride_in,
            stride_out = geometry.stride_out,
            "Format set"
        );
        self.format = Some(NegotiatedFormat { layout, geometry });
        Ok(())
    }

    /// Negotiate from a format tag such as `"v210"` or `"UYVY"`.
    pub fn set_format_tag(&mut self, tag: &str, geometry: FrameGeometry) -> Result<()> {
        let layout = tag.parse::<SourceLayout>()?;
        self.set_format(layout, geometry)
    }

    pub fn layout(&self) -> Option<SourceLayout> {
        self.format.map(|format| format.layout)
    }
}

impl FrameKernel for PackedUnpacker {
    type Params = UnpackParams;

    fn configure(&mut self, params: UnpackParams) {
        let _guard = self.span.enter();
        debug!(?params, "Parameters updated");
        self.params = params;
    }

    fn params(&self) -> &UnpackParams {
        &self.params
    }

    fn geometry(&self) -> Option<&FrameGeometry> {
        self.format.as_ref().map(|format| &format.geometry)
    }

    fn output_depth(&self) -> SampleDepth {
        SampleDepth::Gray16Le
    }

    fn transform(&self, input: &[u8], output: &mut [u8]) -> Result<()> {
        let _guard = self.span.enter();
        let format = self.format.as_ref().ok_or(KernelError::NotNegotiated)?;
        debug!(layout = %format.layout, "Performing non-inplace unpack");
        unpack_frame(format.layout, &format.geometry, &self.params, input, output)
    }

    fn reset(&mut self) {
        self.params = UnpackParams::default();
        self.format = None;
    }
}

impl PropertyAccess for PackedUnpacker {
    fn property_names(&self) -> &'static [&'static str] {
        PROPERTY_NAMES
    }

    fn set_property(&mut self, name: &str, value: PropertyValue) -> Result<()> {
        let _guard = self.span.enter();
        debug!("Setting property {}", name);
        match name {
            "offset" => {
                let offset = value.as_i64(name)?;
                self.params.offset = i16::try_from(offset).map_err(|_| out_of_range(name, offset))?;
            }
            "shift" => {
                let shift = value.as_u64(name)?;
                if shift > MAX_SHIFT as u64 {
                    return Err(out_of_range(name, shift));
                }
                self.params.shift = shift as u32;
            }
            "swap" => self.params.swap = value.as_bool(name)?,
            "luma-mask" => {
                let mask = value.as_u64(name)?;
                self.params.luma_mask = u16::try_from(mask).map_err(|_| out_of_range(name, mask))?;
            }
            "chroma-mask" => {
                let mask = value.as_u64(name)?;
                self.params.chroma_mask =
                    u16::try_from(mask).map_err(|_| out_of_range(name, mask))?;
            }
            _ => return Err(KernelError::UnknownProperty(name.to_string())),
        }
        Ok(())
    }

    fn property(&self, name: &str) -> Result<PropertyValue> {
        let value = match name {
            "offset" => PropertyValue::Int(self.params.offset as i64),
            "shift" => PropertyValue::UInt(self.params.shift as u64),
            "swap" => PropertyValue::Bool(self.params.swap),
            "luma-mask" => PropertyValue::UInt(self.params.luma_mask as u64),
            "chroma-mask" => PropertyValue::UInt(self.params.chroma_mask as u64),
            _ => return Err(KernelError::UnknownProperty(name.to_string())),
        };
        Ok(value)
    }
}
