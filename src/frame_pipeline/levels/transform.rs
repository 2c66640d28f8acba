//! 16-bit to 8-bit grayscale level remapping

use tracing::{debug, Span};

use crate::frame_pipeline::common::property::out_of_range;
use crate::frame_pipeline::common::{
    Endianness, FrameGeometry, KernelError, PropertyAccess, PropertyValue, Result, SampleDepth,
};
use crate::frame_pipeline::kernel::FrameKernel;
use crate::frame_pipeline::levels::lut::LevelLut;
use crate::frame_pipeline::levels::params::LevelParams;

const LOW_IN: &str = "low_in";
const UPPER_IN: &str = "upper_in";
const LOW_OUT: &str = "low_out";
const UPPER_OUT: &str = "upper_out";

const PROPERTY_NAMES: &[&str] = &[LOW_IN, UPPER_IN, LOW_OUT, UPPER_OUT];

/// Bias that moves a signed 16-bit sample into the unsigned index domain.
const SIGNED_BIAS: i32 = 32767;

#[inline]
fn unsigned_index(sample: u16) -> u8 {
    (sample >> 8) as u8
}

#[inline]
fn signed_index(sample: u16) -> u8 {
    ((sample as i16 as i32 + SIGNED_BIAS).max(0) >> 8) as u8
}

/// Remap one 16-bit gray frame to 8-bit gray through `lut`.
///
/// Samples are read at byte offset `row * stride_in + 2 * col` and written
/// at `row * stride_out + col`. Row padding in `output` is left untouched.
pub fn apply_levels(
    geometry: &FrameGeometry,
    lut: &LevelLut,
    input: &[u8],
    output: &mut [u8],
) -> Result<()> {
    geometry.validate(geometry.width.checked_mul(2), Some(geometry.width))?;
    geometry.check_buffers(input, output)?;

    // Byte order and signedness are fixed for the whole frame, so pick a
    // specialised loop once instead of branching per pixel.
    match (geometry.endianness, geometry.signed) {
        (Endianness::Little, false) => {
            remap_rows(geometry, lut, input, output, u16::from_le_bytes, unsigned_index)
        }
        (Endianness::Big, false) => {
            remap_rows(geometry, lut, input, output, u16::from_be_bytes, unsigned_index)
        }
        (Endianness::Little, true) => {
            remap_rows(geometry, lut, input, output, u16::from_le_bytes, signed_index)
        }
        (Endianness::Big, true) => {
            remap_rows(geometry, lut, input, output, u16::from_be_bytes, signed_index)
        }
    }

    Ok(())
}

fn remap_rows<R, I>(
    geometry: &FrameGeometry,
    lut: &LevelLut,
    input: &[u8],
    output: &mut [u8],
    read: R,
    index: I,
) where
    R: Fn([u8; 2]) -> u16,
    I: Fn(u16) -> u8,
{
    let width = geometry.width;
    let rows = input
        .chunks(geometry.stride_in)
        .zip(output.chunks_mut(geometry.stride_out))
        .take(geometry.height);

    for (src_row, dst_row) in rows {
        for (src, dst) in src_row[..width * 2]
            .chunks_exact(2)
            .zip(dst_row[..width].iter_mut())
        {
            *dst = lut.lookup(index(read([src[0], src[1]])));
        }
    }
}

/// Level adjustment kernel: parameters, derived LUT and negotiated geometry.
#[derive(Debug)]
pub struct LevelTransform {
    params: LevelParams,
    lut: LevelLut,
    geometry: Option<FrameGeometry>,
    span: Span,
}

impl Default for LevelTransform {
    fn default() -> Self {
        Self::new()
    }
}

impl LevelTransform {
    pub fn new() -> Self {
        Self::with_params(LevelParams::default())
    }

    pub fn with_params(params: LevelParams) -> Self {
        Self {
            lut: LevelLut::new(&params),
            params,
            geometry: None,
            span: tracing::debug_span!("video_levels"),
        }
    }

    /// Attach the span this kernel logs under.
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Accept the format chosen by the negotiation layer.
    pub fn set_format(&mut self, geometry: FrameGeometry) -> Result<()> {
        let _guard = self.span.enter();
        geometry.validate(geometry.width.checked_mul(2), Some(geometry.width))?;
        debug!(
            width = geometry.width,
            height = geometry.height,
            stride_in = geometry.stride_in,
            stride_out = geometry.stride_out,
            endianness = ?geometry.endianness,
            signed = geometry.signed,
            "Format set"
        );
        self.geometry = Some(geometry);
        self.lut.rebuild(&self.params);
        Ok(())
    }

    pub fn lut(&self) -> &LevelLut {
        &self.lut
    }

    fn update_level(&mut self, name: &str, value: f64) -> Result<()> {
        if !(0.0..=1.0).contains(&value) {
            return Err(out_of_range(name, value));
        }
        match name {
            LOW_IN => self.params.low_in = value,
            UPPER_IN => self.params.high_in = value,
            LOW_OUT => self.params.low_out = value,
            UPPER_OUT => self.params.high_out = value,
            _ => return Err(KernelError::UnknownProperty(name.to_string())),
        }
        self.lut.rebuild(&self.params);
        Ok(())
    }
}

impl FrameKernel for LevelTransform {
    type Params = LevelParams;

    fn configure(&mut self, params: LevelParams) {
        let _guard = self.span.enter();
        debug!(?params, "Parameters updated");
        self.params = params;
        self.lut.rebuild(&self.params);
    }

    fn params(&self) -> &LevelParams {
        &self.params
    }

    fn geometry(&self) -> Option<&FrameGeometry> {
        self.geometry.as_ref()
    }

    fn output_depth(&self) -> SampleDepth {
        SampleDepth::Gray8
    }

    fn transform(&self, input: &[u8], output: &mut [u8]) -> Result<()> {
        let _guard = self.span.enter();
        let geometry = self.geometry.as_ref().ok_or(KernelError::NotNegotiated)?;
        debug!("Converting frame using LUT");
        apply_levels(geometry, &self.lut, input, output)?;
        debug!("Done converting frame using LUT");
        Ok(())
    }

    fn reset(&mut self) {
        self.params = LevelParams::default();
        self.lut.rebuild(&self.params);
        self.geometry = None;
    }
}

impl PropertyAccess for LevelTransform {
    fn property_names(&self) -> &'static [&'static str] {
        PROPERTY_NAMES
    }

    fn set_property(&mut self, name: &str, value: PropertyValue) -> Result<()> {
        let span = self.span.clone();
        let _guard = span.enter();
        debug!("Setting property {}", name);
        if !PROPERTY_NAMES.contains(&name) {
            return Err(KernelError::UnknownProperty(name.to_string()));
        }
        let level = value.as_f64(name)?;
        self.update_level(name, level)
    }

    fn property(&self, name: &str) -> Result<PropertyValue> {
        let level = match name {
            LOW_IN => self.params.low_in,
            UPPER_IN => self.params.high_in,
            LOW_OUT => self.params.low_out,
            UPPER_OUT => self.params.high_out,
            _ => return Err(KernelError::UnknownProperty(name.to_string())),
        };
        Ok(PropertyValue::Double(level))
    }
}
