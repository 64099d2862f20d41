use diesel::result::Error as DieselError;
use thiserror::Error;

/// Custom error type for investment-position operations
#[derive(Debug, Error)]
pub enum InvestmentError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
    #[error(
        "Insufficient quantity in investment {investment_id}: held {held}, requested {requested}"
    )]
    InsufficientQuantity {
        investment_id: String,
        held: i64,
        requested: i64,
    },
    #[error("Lot {0} has already been partially consumed")]
    LotInUse(String),
}

impl From<DieselError> for InvestmentError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::NotFound => InvestmentError::NotFound("Record not found".to_string()),
            _ => InvestmentError::DatabaseError(err.to_string()),
        }
    }
}

/// Result type for investment operations
pub type Result<T> = std::result::Result<T, InvestmentError>;
