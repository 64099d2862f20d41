use diesel::prelude::*;
use std::sync::Arc;

use crate::db::{get_connection, DbPool};
use crate::schema::exchange_rates;

use super::fx_errors::{FxError, Result};
use super::fx_model::{ExchangeRate, ExchangeRateDB};

/// Repository for the persisted exchange-rate cache
pub struct FxRepository {
    pool: Arc<DbPool>,
}

impl FxRepository {
    /// Creates a new FxRepository instance
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }

    fn conn(&self) -> Result<crate::db::DbConnection> {
        get_connection(&self.pool).map_err(|e| FxError::DatabaseError(e.to_string()))
    }

    /// Inserts or replaces the rate for a pair (one row per pair)
    pub fn save(&self, rate: ExchangeRate) -> Result<ExchangeRate> {
        let rate_db: ExchangeRateDB = rate.into();

        let mut conn = self.conn()?;
        diesel::replace_into(exchange_rates::table)
            .values(&rate_db)
            .execute(&mut conn)
            .map_err(|e| FxError::DatabaseError(e.to_string()))?;

        Ok(rate_db.into())
    }

    /// Latest persisted rate for a pair, if any
    pub fn get_by_pair(&self, from: &str, to: &str) -> Result<Option<ExchangeRate>> {
        let symbol = ExchangeRate::make_fx_symbol(from, to);
        self.get_by_id(&symbol)
    }

    pub fn get_by_id(&self, rate_id: &str) -> Result<Option<ExchangeRate>> {
        let mut conn = self.conn()?;

        exchange_rates::table
            .find(rate_id)
            .first::<ExchangeRateDB>(&mut conn)
            .optional()
            .map_err(|e| FxError::DatabaseError(e.to_string()))
            .map(|record| record.map(ExchangeRate::from))
    }

    /// Lists all persisted rates
    pub fn list(&self) -> Result<Vec<ExchangeRate>> {
        let mut conn = self.conn()?;

        exchange_rates::table
            .order(exchange_rates::id.asc())
            .load::<ExchangeRateDB>(&mut conn)
            .map_err(|e| FxError::DatabaseError(e.to_string()))
            .map(|results| results.into_iter().map(ExchangeRate::from).collect())
    }

    pub fn delete(&self, rate_id: &str) -> Result<()> {
        let mut conn = self.conn()?;

        diesel::delete(exchange_rates::table.find(rate_id))
            .execute(&mut conn)
            .map_err(|e| FxError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}
