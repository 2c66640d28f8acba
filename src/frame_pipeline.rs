//! Frame processing pipeline module
//!
//! This module provides the two per-frame kernels (video levels and packed
//! unpacking), the interface the negotiation layer drives them through, and
//! TIFF output for running them over frame files.

pub mod common;
pub mod conversions;
pub mod kernel;
pub mod levels;
pub mod tiff;
pub mod unpack;

pub use common::{
    BufferRole,
    Endianness,
    FrameGeometry,
    GrayFrame,
    KernelError,
    PropertyAccess,
    PropertyValue,
    Result,
    SampleDepth,
};

pub use kernel::{
    FrameKernel,
    SharedKernel,
};

pub use levels::{
    LevelLut,
    LevelParams,
    LevelTransform,
};

pub use unpack::{
    PackedUnpacker,
    SourceLayout,
    UnpackParams,
};

pub use tiff::{
    TiffCompression,
    SamplePredictor,
    OutputConfig,
    FrameWriter,
    StandardTiffWriter,
};

pub use conversions::FramePipeline;
