use thiserror::Error;

use crate::fx::FxError;

/// Custom error type for value conversion
#[derive(Debug, Error)]
pub enum ConversionError {
    #[error("Cannot convert between units {from} and {to}")]
    IncompatibleUnits { from: String, to: String },
    #[error("Value out of range: {0}")]
    OutOfRange(String),
    #[error(transparent)]
    Fx(#[from] FxError),
}

/// Result type for conversion operations
pub type Result<T> = std::result::Result<T, ConversionError>;
