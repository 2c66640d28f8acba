//! Common utilities module
//!
//! This module contains the error type, frame geometry and property plumbing
//! shared by both kernels.

pub mod error;
pub mod frame;
pub mod geometry;
pub mod property;

pub use error::{BufferRole, KernelError, Result};
pub use frame::{GrayFrame, SampleDepth};
pub use geometry::{round_up_4, Endianness, FrameGeometry};
pub use property::{PropertyAccess, PropertyValue};
