use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::utils::fixed_point::QUANTITY_SCALE;

use super::investments_errors::{InvestmentError, Result};

/// Domain model for an investment position. Quantity is held in 1/10,000 of
/// a physical unit and must never go negative; `Σ(lot.remaining)` equals
/// `quantity` after every operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Investment {
    pub id: String,
    pub wallet_id: String,
    pub symbol: String,
    pub asset_kind: String,
    /// 1/10,000 of a physical unit
    pub quantity: i64,
    /// Minor currency units, fees included
    pub total_cost: i64,
    /// Derived: minor units per whole unit, recomputed from the integers
    pub average_cost: f64,
    pub realized_pnl: i64,
    pub total_dividends: i64,
    pub currency: String,
    pub unit: String,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Investment {
    /// Average cost in minor units per whole physical unit, derived from the
    /// integer aggregates so reversals stay exact.
    pub fn derive_average_cost(quantity: i64, total_cost: i64) -> f64 {
        if quantity == 0 {
            0.0
        } else {
            total_cost as f64 * QUANTITY_SCALE as f64 / quantity as f64
        }
    }
}

/// Input model for creating a new investment position
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewInvestment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub wallet_id: String,
    pub symbol: String,
    pub asset_kind: String,
    pub currency: String,
    pub unit: String,
}

impl NewInvestment {
    /// Validates the new investment data
    pub fn validate(&self) -> Result<()> {
        if self.wallet_id.trim().is_empty() {
            return Err(InvestmentError::InvalidData(
                "Wallet ID cannot be empty".to_string(),
            ));
        }
        if self.symbol.trim().is_empty() {
            return Err(InvestmentError::InvalidData(
                "Symbol cannot be empty".to_string(),
            ));
        }
        if self.currency.trim().is_empty() {
            return Err(InvestmentError::InvalidData(
                "Currency cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// A cost-basis lot created by one buy event. Remaining quantity only ever
/// decreases outside of sell reversal; a drained lot stays around for audit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lot {
    pub id: String,
    pub investment_id: String,
    /// Original quantity at acquisition, 1/10,000 unit
    pub quantity: i64,
    pub remaining_quantity: i64,
    /// Minor currency units per whole physical unit at acquisition
    pub unit_cost: i64,
    pub acquired_at: NaiveDateTime,
    pub created_at: NaiveDateTime,
}

/// Input model for creating a lot on a buy
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLot {
    pub investment_id: String,
    pub quantity: i64,
    pub unit_cost: i64,
    pub acquired_at: NaiveDateTime,
}

/// Per-sell trace of how much was taken from which lot at what unit cost.
/// This is what lets a sell reversal restore each lot's exact prior
/// remaining quantity instead of inferring it after the fact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LotConsumption {
    pub id: String,
    pub transaction_id: String,
    pub lot_id: String,
    pub quantity: i64,
    pub unit_cost: i64,
    pub created_at: NaiveDateTime,
}

/// Database model for investments
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::investments)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct InvestmentDB {
    pub id: String,
    pub wallet_id: String,
    pub symbol: String,
    pub asset_kind: String,
    pub quantity: i64,
    pub total_cost: i64,
    pub average_cost: f64,
    pub realized_pnl: i64,
    pub total_dividends: i64,
    pub currency: String,
    pub unit: String,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Database model for lots
#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::lots)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct LotDB {
    pub id: String,
    pub investment_id: String,
    pub quantity: i64,
    pub remaining_quantity: i64,
    pub unit_cost: i64,
    pub acquired_at: NaiveDateTime,
    pub created_at: NaiveDateTime,
}

/// Database model for lot consumptions
#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::lot_consumptions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct LotConsumptionDB {
    pub id: String,
    pub transaction_id: String,
    pub lot_id: String,
    pub quantity: i64,
    pub unit_cost: i64,
    pub created_at: NaiveDateTime,
}

// Conversion implementations
impl From<InvestmentDB> for Investment {
    fn from(db: InvestmentDB) -> Self {
        Self {
            id: db.id,
            wallet_id: db.wallet_id,
            symbol: db.symbol,
            asset_kind: db.asset_kind,
            quantity: db.quantity,
            total_cost: db.total_cost,
            average_cost: db.average_cost,
            realized_pnl: db.realized_pnl,
            total_dividends: db.total_dividends,
            currency: db.currency,
            unit: db.unit,
            is_active: db.is_active,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

impl From<NewInvestment> for InvestmentDB {
    fn from(domain: NewInvestment) -> Self {
        let now = chrono::Utc::now().naive_utc();
        Self {
            id: domain.id.unwrap_or_default(),
            wallet_id: domain.wallet_id,
            symbol: domain.symbol,
            asset_kind: domain.asset_kind,
            quantity: 0,
            total_cost: 0,
            average_cost: 0.0,
            realized_pnl: 0,
            total_dividends: 0,
            currency: domain.currency,
            unit: domain.unit,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }
}

impl From<LotDB> for Lot {
    fn from(db: LotDB) -> Self {
        Self {
            id: db.id,
            investment_id: db.investment_id,
            quantity: db.quantity,
            remaining_quantity: db.remaining_quantity,
            unit_cost: db.unit_cost,
            acquired_at: db.acquired_at,
            created_at: db.created_at,
        }
    }
}

impl From<NewLot> for LotDB {
    fn from(domain: NewLot) -> Self {
        let now = chrono::Utc::now().naive_utc();
        Self {
            id: String::new(),
            investment_id: domain.investment_id,
            quantity: domain.quantity,
            remaining_quantity: domain.quantity,
            unit_cost: domain.unit_cost,
            acquired_at: domain.acquired_at,
            created_at: now,
        }
    }
}

impl From<LotConsumptionDB> for LotConsumption {
    fn from(db: LotConsumptionDB) -> Self {
        Self {
            id: db.id,
            transaction_id: db.transaction_id,
            lot_id: db.lot_id,
            quantity: db.quantity,
            unit_cost: db.unit_cost,
            created_at: db.created_at,
        }
    }
}
