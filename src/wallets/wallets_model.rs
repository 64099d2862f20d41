use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::wallets_constants::{WALLET_KIND_GENERAL, WALLET_KIND_INVESTMENT};
use super::wallets_errors::{Result, WalletError};

/// Domain model representing a wallet in the system.
/// The balance is the authoritative current value, held in the smallest
/// currency unit; it is only ever mutated through the balance-delta
/// operation and verified by the reconciliation job.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Wallet {
    pub id: String,
    pub name: String,
    pub owner: String,
    pub currency: String,
    pub kind: String,
    pub balance: i64,
    pub is_active: bool,
    pub version: i64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WalletKind {
    General,
    Investment,
}

impl WalletKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            WalletKind::General => WALLET_KIND_GENERAL,
            WalletKind::Investment => WALLET_KIND_INVESTMENT,
        }
    }
}

impl FromStr for WalletKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            WALLET_KIND_GENERAL => Ok(WalletKind::General),
            WALLET_KIND_INVESTMENT => Ok(WalletKind::Investment),
            other => Err(format!("Unknown wallet kind: {}", other)),
        }
    }
}

/// Why a balance delta is being applied. A manual adjustment is the only
/// reason allowed to drive a balance negative; it always carries a
/// justification note on its paired transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeltaReason {
    Income,
    Expense,
    TransferIn,
    TransferOut,
    Trade,
    Dividend,
    Adjustment,
    Reconciliation,
}

impl DeltaReason {
    pub fn allows_negative_balance(&self) -> bool {
        matches!(self, DeltaReason::Adjustment | DeltaReason::Reconciliation)
    }
}

/// Input model for creating a new wallet
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewWallet {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub owner: String,
    pub currency: String,
    pub kind: WalletKind,
}

impl NewWallet {
    /// Validates the new wallet data
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(WalletError::InvalidData(
                "Wallet name cannot be empty".to_string(),
            ));
        }
        if self.currency.trim().is_empty() {
            return Err(WalletError::InvalidData(
                "Currency cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Input model for updating an existing wallet. Currency and balance are
/// deliberately absent: currency is immutable, balance only moves through
/// the delta operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletUpdate {
    pub id: String,
    pub name: String,
    pub owner: String,
}

impl WalletUpdate {
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(WalletError::InvalidData(
                "Wallet ID is required for updates".to_string(),
            ));
        }
        if self.name.trim().is_empty() {
            return Err(WalletError::InvalidData(
                "Wallet name cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Database model for wallets
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
#[diesel(table_name = crate::schema::wallets)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct WalletDB {
    pub id: String,
    pub name: String,
    pub owner: String,
    pub currency: String,
    pub kind: String,
    pub balance: i64,
    pub is_active: bool,
    pub version: i64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

// Conversion implementations
impl From<WalletDB> for Wallet {
    fn from(db: WalletDB) -> Self {
        Self {
            id: db.id,
            name: db.name,
            owner: db.owner,
            currency: db.currency,
            kind: db.kind,
            balance: db.balance,
            is_active: db.is_active,
            version: db.version,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

impl From<NewWallet> for WalletDB {
    fn from(domain: NewWallet) -> Self {
        let now = chrono::Utc::now().naive_utc();
        Self {
            id: domain.id.unwrap_or_default(),
            name: domain.name,
            owner: domain.owner,
            currency: domain.currency,
            kind: domain.kind.as_str().to_string(),
            balance: 0,
            is_active: true,
            version: 0,
            created_at: now,
            updated_at: now,
        }
    }
}
