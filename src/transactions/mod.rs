pub(crate) mod transactions_constants;
pub(crate) mod transactions_errors;
pub(crate) mod transactions_model;
pub(crate) mod transactions_repository;

pub use transactions_constants::*;
pub use transactions_model::{
    NewTransaction, Transaction, TransactionDB, TransactionKind, TransactionSearch,
};
pub use transactions_repository::TransactionRepository;

// Re-export error types for convenience
pub use transactions_errors::{LedgerError, Result};
