//! Capability interface shared by the frame kernels
//!
//! A kernel owns its parameters and the geometry it was negotiated with.
//! `SharedKernel` serializes configuration updates against frame transforms so
//! that a frame is always produced with one consistent set of parameters.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::trace;

use crate::frame_pipeline::common::{
    FrameGeometry, GrayFrame, KernelError, PropertyAccess, PropertyValue, Result, SampleDepth,
};

pub trait FrameKernel {
    type Params: Clone;

    /// Replace the whole parameter set.
    fn configure(&mut self, params: Self::Params);

    fn params(&self) -> &Self::Params;

    /// Geometry fixed by the last successful negotiation.
    fn geometry(&self) -> Option<&FrameGeometry>;

    fn output_depth(&self) -> SampleDepth;

    /// Transform one frame into a caller-owned destination buffer.
    fn transform(&self, input: &[u8], output: &mut [u8]) -> Result<()>;

    /// Restore default parameters and forget the negotiated format.
    fn reset(&mut self);

    /// Transform one frame into a freshly allocated `GrayFrame`.
    fn transform_frame(&self, input: &[u8]) -> Result<GrayFrame> {
        let geometry = *self.geometry().ok_or(KernelError::NotNegotiated)?;
        let mut data = vec![0u8; geometry.output_len()];
        self.transform(input, &mut data)?;
        Ok(GrayFrame {
            width: geometry.width,
            height: geometry.height,
            stride: geometry.stride_out,
            depth: self.output_depth(),
            data,
        })
    }
}

/// A kernel shared between a configuration thread and a streaming thread.
///
/// The lock is held for the entire frame; a parameter update either lands
/// before a transform starts or waits until it has finished.
pub struct SharedKernel<K> {
    inner: Arc<Mutex<K>>,
}

impl<K> Clone for SharedKernel<K> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K: FrameKernel> SharedKernel<K> {
    pub fn new(kernel: K) -> Self {
        Self {
            inner: Arc::new(Mutex::new(kernel)),
        }
    }

    pub fn configure(&self, params: K::Params) {
        self.inner.lock().configure(params);
    }

    pub fn params(&self) -> K::Params {
        self.inner.lock().params().clone()
    }

    /// Run `f` with exclusive access, e.g. to renegotiate the format.
    pub fn update<T>(&self, f: impl FnOnce(&mut K) -> T) -> T {
        let mut kernel = self.inner.lock();
        f(&mut kernel)
    }

    pub fn transform(&self, input: &[u8], output: &mut [u8]) -> Result<()> {
        let kernel = self.inner.lock();
        trace!("Holding kernel lock for one frame");
        kernel.transform(input, output)
    }

    pub fn transform_frame(&self, input: &[u8]) -> Result<GrayFrame> {
        self.inner.lock().transform_frame(input)
    }
}

impl<K: FrameKernel + PropertyAccess> SharedKernel<K> {
    pub fn set_property(&self, name: &str, value: PropertyValue) -> Result<()> {
        self.inner.lock().set_property(name, value)
    }

    pub fn property(&self, name: &str) -> Result<PropertyValue> {
        self.inner.lock().property(name)
    }
}
