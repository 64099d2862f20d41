use chrono::{DateTime, NaiveDateTime, Utc};
use diesel::prelude::*;
use num_traits::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A currency pair rate with its provenance. One row per pair; each refresh
/// replaces the previous observation, bounding staleness together with the
/// cache TTL.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeRate {
    pub id: String,
    pub from_currency: String,
    pub to_currency: String,
    pub rate: Decimal,
    pub source: String,
    pub timestamp: NaiveDateTime,
}

impl ExchangeRate {
    pub fn make_fx_symbol(from: &str, to: &str) -> String {
        format!("{}{}=X", from, to)
    }
}

/// Input model for recording a rate (manual override or provider refresh)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewExchangeRate {
    pub from_currency: String,
    pub to_currency: String,
    pub rate: Decimal,
    pub source: String,
}

/// Cache entry for the in-memory TTL layer
#[derive(Debug, Clone)]
pub struct CachedRate {
    pub rate: Decimal,
    pub source: String,
    pub fetched_at: DateTime<Utc>,
}

/// Database model for exchange rates
#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::exchange_rates)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ExchangeRateDB {
    pub id: String,
    pub from_currency: String,
    pub to_currency: String,
    pub rate: f64,
    pub source: String,
    pub timestamp: NaiveDateTime,
    pub created_at: NaiveDateTime,
}

impl From<ExchangeRateDB> for ExchangeRate {
    fn from(db: ExchangeRateDB) -> Self {
        Self {
            id: db.id,
            from_currency: db.from_currency,
            to_currency: db.to_currency,
            rate: Decimal::from_f64_retain(db.rate).unwrap_or_default(),
            source: db.source,
            timestamp: db.timestamp,
        }
    }
}

impl From<ExchangeRate> for ExchangeRateDB {
    fn from(domain: ExchangeRate) -> Self {
        Self {
            id: domain.id,
            from_currency: domain.from_currency,
            to_currency: domain.to_currency,
            rate: domain.rate.to_f64().unwrap_or_default(),
            source: domain.source,
            timestamp: domain.timestamp,
            created_at: chrono::Utc::now().naive_utc(),
        }
    }
}
