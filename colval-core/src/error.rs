// Error types for colval

use crate::data::ValueKind;
use thiserror::Error;

/// Result type used across the value layer
pub type Result<T> = std::result::Result<T, ValueError>;

/// Errors raised while building or writing values
#[derive(Debug, Error)]
pub enum ValueError {
    /// Absence has to be signalled through definition levels, not written.
    #[error("Unsupported operation: cannot write a {kind} value")]
    UnsupportedOperation { kind: ValueKind },
    #[error("Decimal error: {0}")]
    Decimal(#[from] DecimalError),
    #[error("Malformed input: {0}")]
    MalformedUtf8(#[from] bstr::Utf8Error),
}

/// Fixed-width decimal encoding errors
#[derive(Debug, Error)]
pub enum DecimalError {
    #[error("Decimal overflow: {value} needs {required} bytes, but only {width} are available")]
    Overflow {
        value: String,
        width: usize,
        required: usize,
    },
    #[error("Invalid decimal format: {0}")]
    InvalidFormat(String),
}
