use log::debug;
use std::sync::Arc;

use super::investments_errors::{InvestmentError, Result};
use super::investments_model::{Investment, Lot, NewInvestment};
use super::investments_repository::InvestmentRepository;

/// Read-mostly service over investment positions. All mutations to
/// aggregates and lots go through the coordinator; this service covers the
/// query surface and explicit position removal.
pub struct InvestmentService {
    repository: Arc<InvestmentRepository>,
}

impl InvestmentService {
    /// Creates a new InvestmentService instance
    pub fn new(repository: Arc<InvestmentRepository>) -> Self {
        Self { repository }
    }

    /// Registers a new, empty investment position
    pub fn create_investment(&self, new_investment: NewInvestment) -> Result<Investment> {
        debug!(
            "Creating investment {} in wallet {}",
            new_investment.symbol, new_investment.wallet_id
        );
        self.repository.create(new_investment)
    }

    /// Retrieves an investment by its ID
    pub fn get_investment(&self, investment_id: &str) -> Result<Investment> {
        self.repository.get_by_id(investment_id)
    }

    /// Lists a wallet's investments
    pub fn get_investments_for_wallet(&self, wallet_id: &str) -> Result<Vec<Investment>> {
        self.repository.list_by_wallet(wallet_id)
    }

    /// Lists an investment's lots, oldest acquisition first
    pub fn get_lots(&self, investment_id: &str) -> Result<Vec<Lot>> {
        self.repository.list_lots(investment_id)
    }

    /// Removes an investment the user explicitly asked to delete. Refused
    /// while any quantity remains.
    pub fn delete_investment(&self, investment_id: &str) -> Result<()> {
        self.repository.delete(investment_id)
    }

    /// Verifies the lot conservation invariant for one investment:
    /// `Σ(lot.remaining) == investment.quantity`.
    pub fn verify_lot_conservation(&self, investment_id: &str) -> Result<()> {
        let investment = self.repository.get_by_id(investment_id)?;
        let lot_sum = self.repository.sum_lot_remaining(investment_id)?;

        if lot_sum != investment.quantity {
            return Err(InvestmentError::InvalidData(format!(
                "Lot conservation violated for investment {}: lots sum to {}, position holds {}",
                investment_id, lot_sum, investment.quantity
            )));
        }

        Ok(())
    }
}
