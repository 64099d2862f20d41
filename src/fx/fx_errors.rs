use diesel::result::Error as DieselError;
use thiserror::Error;

/// Custom error type for FX operations
#[derive(Debug, Error)]
pub enum FxError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("No usable exchange rate for {0}")]
    RateUnavailable(String),
    #[error("Invalid currency code: {0}")]
    InvalidCurrencyCode(String),
    #[error("Invalid exchange rate: {0}")]
    InvalidRate(String),
    #[error("Rate provider error: {0}")]
    ProviderError(String),
}

impl From<DieselError> for FxError {
    fn from(err: DieselError) -> Self {
        FxError::DatabaseError(err.to_string())
    }
}

impl From<reqwest::Error> for FxError {
    fn from(err: reqwest::Error) -> Self {
        FxError::ProviderError(err.to_string())
    }
}

/// Result type for FX operations
pub type Result<T> = std::result::Result<T, FxError>;
