use thiserror::Error;

/// Which side of a kernel call a buffer belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferRole {
    Input,
    Output,
}

impl std::fmt::Display for BufferRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BufferRole::Input => write!(f, "input"),
            BufferRole::Output => write!(f, "output"),
        }
    }
}

#[derive(Error, Debug)]
pub enum KernelError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Unknown source layout: {0}")]
    UnknownLayout(String),

    #[error("Kernel invoked before a frame format was negotiated")]
    NotNegotiated,

    #[error("Stride of {stride} bytes is smaller than the {required} bytes a row needs")]
    StrideTooSmall { stride: usize, required: usize },

    #[error("Invalid frame dimensions: width={0}, height={1}")]
    InvalidDimensions(usize, usize),

    #[error("{role} buffer holds {len} bytes, geometry requires {required}")]
    BufferTooSmall {
        role: BufferRole,
        len: usize,
        required: usize,
    },

    #[error("Unknown property: {0}")]
    UnknownProperty(String),

    #[error("Invalid value for property {name}: {reason}")]
    InvalidProperty { name: String, reason: String },

    #[error("Failed to read input file: {0}")]
    InputReadError(String),

    #[error("Failed to write output file: {0}")]
    OutputWriteError(String),

    #[error("Failed to encode TIFF image: {0}")]
    EncodeError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl KernelError {
    /// True for the errors a negotiation layer treats as a failed format setup.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            KernelError::Configuration(_)
                | KernelError::UnknownLayout(_)
                | KernelError::NotNegotiated
                | KernelError::StrideTooSmall { .. }
                | KernelError::InvalidDimensions(..)
        )
    }
}

pub type Result<T> = std::result::Result<T, KernelError>;
