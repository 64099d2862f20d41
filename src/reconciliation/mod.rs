pub(crate) mod reconciliation_model;
pub(crate) mod reconciliation_service;

pub use reconciliation_model::{DividendDrift, ReconciliationReport, WalletDrift};
pub use reconciliation_service::ReconciliationService;
