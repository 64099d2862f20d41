use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::transactions_constants::*;
use super::transactions_errors::{LedgerError, Result};

/// Closed set of balance-affecting event kinds. Dispatch on this enum, never
/// on raw strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionKind {
    Income,
    Expense,
    TransferIn,
    TransferOut,
    Buy,
    Sell,
    Dividend,
    Adjustment,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => TRANSACTION_KIND_INCOME,
            TransactionKind::Expense => TRANSACTION_KIND_EXPENSE,
            TransactionKind::TransferIn => TRANSACTION_KIND_TRANSFER_IN,
            TransactionKind::TransferOut => TRANSACTION_KIND_TRANSFER_OUT,
            TransactionKind::Buy => TRANSACTION_KIND_BUY,
            TransactionKind::Sell => TRANSACTION_KIND_SELL,
            TransactionKind::Dividend => TRANSACTION_KIND_DIVIDEND,
            TransactionKind::Adjustment => TRANSACTION_KIND_ADJUSTMENT,
        }
    }

    /// True for the kinds that touch an investment position
    pub fn is_investment(&self) -> bool {
        matches!(
            self,
            TransactionKind::Buy | TransactionKind::Sell | TransactionKind::Dividend
        )
    }
}

impl FromStr for TransactionKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            TRANSACTION_KIND_INCOME => Ok(TransactionKind::Income),
            TRANSACTION_KIND_EXPENSE => Ok(TransactionKind::Expense),
            TRANSACTION_KIND_TRANSFER_IN => Ok(TransactionKind::TransferIn),
            TRANSACTION_KIND_TRANSFER_OUT => Ok(TransactionKind::TransferOut),
            TRANSACTION_KIND_BUY => Ok(TransactionKind::Buy),
            TRANSACTION_KIND_SELL => Ok(TransactionKind::Sell),
            TRANSACTION_KIND_DIVIDEND => Ok(TransactionKind::Dividend),
            TRANSACTION_KIND_ADJUSTMENT => Ok(TransactionKind::Adjustment),
            other => Err(format!("Unknown transaction kind: {}", other)),
        }
    }
}

/// Domain model for a ledger transaction. Immutable once created; the only
/// mutation is deletion, which is itself a coordinator compensation or
/// reversal step, never a silent edit.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub wallet_id: String,
    pub kind: TransactionKind,
    /// Signed wallet delta in minor currency units
    pub amount: i64,
    pub currency: String,
    pub category_id: Option<String>,
    pub investment_id: Option<String>,
    pub lot_id: Option<String>,
    /// Physical quantity in 1/10,000 of a unit, for investment kinds
    pub quantity: Option<i64>,
    /// Minor currency units per whole physical unit, for investment kinds
    pub unit_price: Option<i64>,
    pub fees: Option<i64>,
    pub transaction_date: NaiveDateTime,
    pub note: Option<String>,
    pub created_at: NaiveDateTime,
}

/// Input model for appending a new transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub wallet_id: String,
    pub kind: TransactionKind,
    pub amount: i64,
    pub currency: String,
    pub category_id: Option<String>,
    pub investment_id: Option<String>,
    pub lot_id: Option<String>,
    pub quantity: Option<i64>,
    pub unit_price: Option<i64>,
    pub fees: Option<i64>,
    pub transaction_date: NaiveDateTime,
    pub note: Option<String>,
}

impl NewTransaction {
    /// Validates the new transaction data
    pub fn validate(&self) -> Result<()> {
        if self.wallet_id.trim().is_empty() {
            return Err(LedgerError::InvalidData(
                "Wallet ID cannot be empty".to_string(),
            ));
        }
        if self.currency.trim().is_empty() {
            return Err(LedgerError::InvalidData(
                "Currency cannot be empty".to_string(),
            ));
        }
        if self.kind.is_investment() && self.investment_id.is_none() {
            return Err(LedgerError::InvalidData(format!(
                "{} transactions require an investment id",
                self.kind.as_str()
            )));
        }
        if self.kind == TransactionKind::Adjustment
            && self.note.as_deref().map_or(true, |n| n.trim().is_empty())
        {
            return Err(LedgerError::InvalidData(
                "Manual adjustments require a justification note".to_string(),
            ));
        }
        Ok(())
    }
}

/// Search filter for the thin request layer
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionSearch {
    pub wallet_id: Option<String>,
    pub kind: Option<TransactionKind>,
    pub from_date: Option<NaiveDateTime>,
    pub to_date: Option<NaiveDateTime>,
}

/// Database model for transactions
#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::transactions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TransactionDB {
    pub id: String,
    pub wallet_id: String,
    pub kind: String,
    pub amount: i64,
    pub currency: String,
    pub category_id: Option<String>,
    pub investment_id: Option<String>,
    pub lot_id: Option<String>,
    pub quantity: Option<i64>,
    pub unit_price: Option<i64>,
    pub fees: Option<i64>,
    pub transaction_date: NaiveDateTime,
    pub note: Option<String>,
    pub created_at: NaiveDateTime,
}

impl TryFrom<TransactionDB> for Transaction {
    type Error = LedgerError;

    fn try_from(db: TransactionDB) -> Result<Transaction> {
        let kind = TransactionKind::from_str(&db.kind).map_err(LedgerError::InvalidData)?;
        Ok(Transaction {
            id: db.id,
            wallet_id: db.wallet_id,
            kind,
            amount: db.amount,
            currency: db.currency,
            category_id: db.category_id,
            investment_id: db.investment_id,
            lot_id: db.lot_id,
            quantity: db.quantity,
            unit_price: db.unit_price,
            fees: db.fees,
            transaction_date: db.transaction_date,
            note: db.note,
            created_at: db.created_at,
        })
    }
}

// Used by compensations that must recreate a deleted record byte-for-byte
// (the original id included).
impl From<Transaction> for NewTransaction {
    fn from(t: Transaction) -> Self {
        Self {
            id: Some(t.id),
            wallet_id: t.wallet_id,
            kind: t.kind,
            amount: t.amount,
            currency: t.currency,
            category_id: t.category_id,
            investment_id: t.investment_id,
            lot_id: t.lot_id,
            quantity: t.quantity,
            unit_price: t.unit_price,
            fees: t.fees,
            transaction_date: t.transaction_date,
            note: t.note,
        }
    }
}

impl From<NewTransaction> for TransactionDB {
    fn from(domain: NewTransaction) -> Self {
        let now = chrono::Utc::now().naive_utc();
        Self {
            id: domain.id.unwrap_or_default(),
            wallet_id: domain.wallet_id,
            kind: domain.kind.as_str().to_string(),
            amount: domain.amount,
            currency: domain.currency,
            category_id: domain.category_id,
            investment_id: domain.investment_id,
            lot_id: domain.lot_id,
            quantity: domain.quantity,
            unit_price: domain.unit_price,
            fees: domain.fees,
            transaction_date: domain.transaction_date,
            note: domain.note,
            created_at: now,
        }
    }
}
