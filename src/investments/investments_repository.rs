use diesel::prelude::*;
use std::sync::Arc;

use crate::db::{get_connection, DbPool};
use crate::schema::{investments, lot_consumptions, lots};

use super::investments_errors::{InvestmentError, Result};
use super::investments_model::{
    Investment, InvestmentDB, Lot, LotConsumption, LotConsumptionDB, LotDB, NewInvestment, NewLot,
};
use super::position_engine::{PlannedConsumption, PositionTotals};

/// Repository for investments, their cost-basis lots and the per-sell
/// consumption traces
pub struct InvestmentRepository {
    pool: Arc<DbPool>,
}

impl InvestmentRepository {
    /// Creates a new InvestmentRepository instance
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }

    fn conn(&self) -> Result<crate::db::DbConnection> {
        get_connection(&self.pool).map_err(|e| InvestmentError::DatabaseError(e.to_string()))
    }

    /// Creates a new investment position with zero aggregates
    pub fn create(&self, new_investment: NewInvestment) -> Result<Investment> {
        new_investment.validate()?;

        let mut investment_db: InvestmentDB = new_investment.into();
        if investment_db.id.is_empty() {
            investment_db.id = uuid::Uuid::new_v4().to_string();
        }

        let mut conn = self.conn()?;
        diesel::insert_into(investments::table)
            .values(&investment_db)
            .execute(&mut conn)
            .map_err(|e| InvestmentError::DatabaseError(e.to_string()))?;

        Ok(investment_db.into())
    }

    /// Retrieves an investment by its ID
    pub fn get_by_id(&self, investment_id: &str) -> Result<Investment> {
        let mut conn = self.conn()?;

        let investment = investments::table
            .find(investment_id)
            .first::<InvestmentDB>(&mut conn)
            .map_err(|e| match e {
                diesel::result::Error::NotFound => InvestmentError::NotFound(format!(
                    "Investment with id {} not found",
                    investment_id
                )),
                _ => InvestmentError::DatabaseError(e.to_string()),
            })?;

        Ok(investment.into())
    }

    /// Lists a wallet's investments
    pub fn list_by_wallet(&self, wallet_id: &str) -> Result<Vec<Investment>> {
        let mut conn = self.conn()?;

        investments::table
            .filter(investments::wallet_id.eq(wallet_id))
            .order(investments::symbol.asc())
            .load::<InvestmentDB>(&mut conn)
            .map_err(|e| InvestmentError::DatabaseError(e.to_string()))
            .map(|results| results.into_iter().map(Investment::from).collect())
    }

    /// Writes a position's integer aggregates and the derived average cost
    pub fn update_totals(&self, investment_id: &str, totals: &PositionTotals) -> Result<Investment> {
        let mut conn = self.conn()?;

        let now = chrono::Utc::now().naive_utc();
        let affected = diesel::update(investments::table.find(investment_id))
            .set((
                investments::quantity.eq(totals.quantity),
                investments::total_cost.eq(totals.total_cost),
                investments::average_cost.eq(totals.average_cost()),
                investments::realized_pnl.eq(totals.realized_pnl),
                investments::total_dividends.eq(totals.total_dividends),
                investments::updated_at.eq(now),
            ))
            .execute(&mut conn)
            .map_err(|e| InvestmentError::DatabaseError(e.to_string()))?;

        if affected == 0 {
            return Err(InvestmentError::NotFound(format!(
                "Investment with id {} not found",
                investment_id
            )));
        }

        self.get_by_id(investment_id)
    }

    /// Deletes an investment. Only legal once its quantity has reached zero;
    /// its transactions remain in the ledger for audit.
    pub fn delete(&self, investment_id: &str) -> Result<()> {
        let investment = self.get_by_id(investment_id)?;
        if investment.quantity != 0 {
            return Err(InvestmentError::InvalidData(format!(
                "Investment {} still holds quantity {}",
                investment_id, investment.quantity
            )));
        }

        let mut conn = self.conn()?;
        diesel::delete(lots::table.filter(lots::investment_id.eq(investment_id)))
            .execute(&mut conn)
            .map_err(|e| InvestmentError::DatabaseError(e.to_string()))?;
        diesel::delete(investments::table.find(investment_id))
            .execute(&mut conn)
            .map_err(|e| InvestmentError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    /// Inserts a new lot for a buy event
    pub fn insert_lot(&self, new_lot: NewLot) -> Result<Lot> {
        if new_lot.quantity <= 0 {
            return Err(InvestmentError::InvalidData(
                "Lot quantity must be positive".to_string(),
            ));
        }

        let mut lot_db: LotDB = new_lot.into();
        lot_db.id = uuid::Uuid::new_v4().to_string();

        let mut conn = self.conn()?;
        diesel::insert_into(lots::table)
            .values(&lot_db)
            .execute(&mut conn)
            .map_err(|e| InvestmentError::DatabaseError(e.to_string()))?;

        Ok(lot_db.into())
    }

    /// Retrieves a lot by its ID
    pub fn get_lot(&self, lot_id: &str) -> Result<Lot> {
        let mut conn = self.conn()?;

        let lot = lots::table
            .find(lot_id)
            .first::<LotDB>(&mut conn)
            .map_err(|e| match e {
                diesel::result::Error::NotFound => {
                    InvestmentError::NotFound(format!("Lot with id {} not found", lot_id))
                }
                _ => InvestmentError::DatabaseError(e.to_string()),
            })?;

        Ok(lot.into())
    }

    /// Lists an investment's lots in FIFO order (earliest acquisition first)
    pub fn list_lots(&self, investment_id: &str) -> Result<Vec<Lot>> {
        let mut conn = self.conn()?;

        lots::table
            .filter(lots::investment_id.eq(investment_id))
            .order((lots::acquired_at.asc(), lots::created_at.asc(), lots::id.asc()))
            .load::<LotDB>(&mut conn)
            .map_err(|e| InvestmentError::DatabaseError(e.to_string()))
            .map(|results| results.into_iter().map(Lot::from).collect())
    }

    /// Sum of remaining lot quantity, for invariant verification
    pub fn sum_lot_remaining(&self, investment_id: &str) -> Result<i64> {
        Ok(self
            .list_lots(investment_id)?
            .iter()
            .map(|l| l.remaining_quantity)
            .sum())
    }

    /// Sets a lot's remaining quantity. Fields only move through the engine's
    /// planned consumptions and their reversals.
    pub fn set_lot_remaining(&self, lot_id: &str, remaining: i64) -> Result<()> {
        if remaining < 0 {
            return Err(InvestmentError::InvalidData(
                "Lot remaining quantity cannot be negative".to_string(),
            ));
        }

        let mut conn = self.conn()?;
        let affected = diesel::update(lots::table.find(lot_id))
            .set(lots::remaining_quantity.eq(remaining))
            .execute(&mut conn)
            .map_err(|e| InvestmentError::DatabaseError(e.to_string()))?;

        if affected == 0 {
            return Err(InvestmentError::NotFound(format!(
                "Lot with id {} not found",
                lot_id
            )));
        }

        Ok(())
    }

    /// Deletes a lot (buy reversal only)
    pub fn delete_lot(&self, lot_id: &str) -> Result<()> {
        let mut conn = self.conn()?;

        let affected = diesel::delete(lots::table.find(lot_id))
            .execute(&mut conn)
            .map_err(|e| InvestmentError::DatabaseError(e.to_string()))?;

        if affected == 0 {
            return Err(InvestmentError::NotFound(format!(
                "Lot with id {} not found",
                lot_id
            )));
        }

        Ok(())
    }

    /// Records one draw against a lot for a sell transaction
    pub fn insert_consumption(
        &self,
        transaction_id: &str,
        planned: &PlannedConsumption,
    ) -> Result<LotConsumption> {
        let consumption_db = LotConsumptionDB {
            id: uuid::Uuid::new_v4().to_string(),
            transaction_id: transaction_id.to_string(),
            lot_id: planned.lot_id.clone(),
            quantity: planned.quantity,
            unit_cost: planned.unit_cost,
            created_at: chrono::Utc::now().naive_utc(),
        };

        let mut conn = self.conn()?;
        diesel::insert_into(lot_consumptions::table)
            .values(&consumption_db)
            .execute(&mut conn)
            .map_err(|e| InvestmentError::DatabaseError(e.to_string()))?;

        Ok(consumption_db.into())
    }

    /// Lists the consumption trace of a sell transaction
    pub fn list_consumptions_by_transaction(
        &self,
        transaction_id: &str,
    ) -> Result<Vec<LotConsumption>> {
        let mut conn = self.conn()?;

        lot_consumptions::table
            .filter(lot_consumptions::transaction_id.eq(transaction_id))
            .order(lot_consumptions::created_at.asc())
            .load::<LotConsumptionDB>(&mut conn)
            .map_err(|e| InvestmentError::DatabaseError(e.to_string()))
            .map(|results| results.into_iter().map(LotConsumption::from).collect())
    }

    /// Drops the consumption trace of a transaction (compensation or
    /// completed reversal)
    pub fn delete_consumptions_by_transaction(&self, transaction_id: &str) -> Result<usize> {
        let mut conn = self.conn()?;

        diesel::delete(
            lot_consumptions::table
                .filter(lot_consumptions::transaction_id.eq(transaction_id)),
        )
        .execute(&mut conn)
        .map_err(|e| InvestmentError::DatabaseError(e.to_string()))
    }
}
