use thiserror::Error;

use crate::investments::InvestmentError;
use crate::transactions::LedgerError;
use crate::wallets::WalletError;

/// Custom error type for coordinated multi-step operations
#[derive(Debug, Error)]
pub enum CoordinatorError {
    #[error(transparent)]
    Wallet(#[from] WalletError),
    #[error(transparent)]
    Investment(#[from] InvestmentError),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
    /// A rollback step itself errored, leaving state only the reconciliation
    /// job can repair. Callers still receive the original error; this
    /// condition is logged with the step context.
    #[error("Compensation '{step}' failed during rollback of {operation}: {detail}")]
    CompensationFailed {
        operation: String,
        step: String,
        detail: String,
    },
}

/// Result type for coordinator operations
pub type Result<T> = std::result::Result<T, CoordinatorError>;
