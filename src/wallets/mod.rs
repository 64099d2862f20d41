pub(crate) mod wallets_constants;
pub(crate) mod wallets_errors;
pub(crate) mod wallets_model;
pub(crate) mod wallets_repository;
pub(crate) mod wallets_service;

pub use wallets_constants::*;
pub use wallets_model::{DeltaReason, NewWallet, Wallet, WalletDB, WalletKind, WalletUpdate};
pub use wallets_repository::WalletRepository;
pub use wallets_service::WalletService;

// Re-export error types for convenience
pub use wallets_errors::{Result, WalletError};
