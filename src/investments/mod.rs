pub(crate) mod investments_constants;
pub(crate) mod investments_errors;
pub(crate) mod investments_model;
pub(crate) mod investments_repository;
pub(crate) mod investments_service;
pub(crate) mod position_engine;

pub use investments_constants::*;
pub use investments_model::{
    Investment, InvestmentDB, Lot, LotConsumption, LotConsumptionDB, LotDB, NewInvestment, NewLot,
};
pub use investments_repository::InvestmentRepository;
pub use investments_service::InvestmentService;
pub use position_engine::{
    basis_of_consumptions, plan_fifo_sale, PlannedConsumption, PositionTotals, SalePlan,
};

// Re-export error types for convenience
pub use investments_errors::{InvestmentError, Result};
