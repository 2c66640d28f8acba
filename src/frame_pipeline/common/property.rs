//! Named, independently settable kernel properties

use crate::frame_pipeline::common::error::{KernelError, Result};

/// A property value as exchanged with the negotiation layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PropertyValue {
    Double(f64),
    Int(i64),
    UInt(u64),
    Bool(bool),
}

impl PropertyValue {
    pub(crate) fn as_f64(self, name: &str) -> Result<f64> {
        match self {
            PropertyValue::Double(v) => Ok(v),
            other => Err(type_mismatch(name, "double", other)),
        }
    }

    pub(crate) fn as_i64(self, name: &str) -> Result<i64> {
        match self {
            PropertyValue::Int(v) => Ok(v),
            PropertyValue::UInt(v) => i64::try_from(v).map_err(|_| out_of_range(name, v)),
            other => Err(type_mismatch(name, "integer", other)),
        }
    }

    pub(crate) fn as_u64(self, name: &str) -> Result<u64> {
        match self {
            PropertyValue::UInt(v) => Ok(v),
            PropertyValue::Int(v) => u64::try_from(v).map_err(|_| out_of_range(name, v)),
            other => Err(type_mismatch(name, "unsigned integer", other)),
        }
    }

    pub(crate) fn as_bool(self, name: &str) -> Result<bool> {
        match self {
            PropertyValue::Bool(v) => Ok(v),
            other => Err(type_mismatch(name, "boolean", other)),
        }
    }
}

fn type_mismatch(name: &str, expected: &str, got: PropertyValue) -> KernelError {
    KernelError::InvalidProperty {
        name: name.to_string(),
        reason: format!("expected {}, got {:?}", expected, got),
    }
}

pub(crate) fn out_of_range(name: &str, value: impl std::fmt::Display) -> KernelError {
    KernelError::InvalidProperty {
        name: name.to_string(),
        reason: format!("{} is out of range", value),
    }
}

/// Get/set access to a kernel's configuration by property name.
pub trait PropertyAccess {
    /// Names accepted by `set_property` and `property`.
    fn property_names(&self) -> &'static [&'static str];

    fn set_property(&mut self, name: &str, value: PropertyValue) -> Result<()>;

    fn property(&self, name: &str) -> Result<PropertyValue>;
}
