pub mod conversion;
pub mod coordinator;
pub mod db;
pub mod errors;
pub mod fx;
pub mod investments;
pub mod reconciliation;
pub mod schema;
pub mod transactions;
pub mod utils;
pub mod wallets;

pub use errors::{Error, Result};
