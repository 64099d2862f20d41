use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::transactions::TransactionKind;

/// Input for creating an investment position together with its opening buy
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateInvestment {
    pub wallet_id: String,
    pub symbol: String,
    pub asset_kind: String,
    pub unit: String,
    /// Opening quantity, 1/10,000 of a physical unit
    pub quantity: i64,
    /// Minor currency units per whole physical unit
    pub unit_price: i64,
    pub fees: i64,
    pub date: NaiveDateTime,
    pub note: Option<String>,
}

/// Input for a buy/sell/dividend against an existing investment. For
/// dividends, `unit_price` is the per-unit dividend and `quantity` is
/// ignored; the position's held quantity at execution time is used.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentOperation {
    pub investment_id: String,
    pub kind: TransactionKind,
    pub quantity: i64,
    pub unit_price: i64,
    pub fees: i64,
    pub date: NaiveDateTime,
    pub note: Option<String>,
}

/// Input for a plain cash ledger event. `amount` is a positive magnitude
/// for income/expense/transfer kinds (the sign comes from the kind) and a
/// signed value for manual adjustments, which must carry a justification
/// note and are the only deltas allowed to drive a balance negative.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashOperation {
    pub wallet_id: String,
    pub kind: TransactionKind,
    pub amount: i64,
    pub category_id: Option<String>,
    pub date: NaiveDateTime,
    pub note: Option<String>,
}
