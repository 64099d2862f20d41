pub(crate) mod coordinator_errors;
pub(crate) mod coordinator_model;
pub(crate) mod coordinator_service;
pub(crate) mod saga;

pub use coordinator_errors::{CoordinatorError, Result};
pub use coordinator_model::{CashOperation, CreateInvestment, InvestmentOperation};
pub use coordinator_service::LedgerCoordinator;
