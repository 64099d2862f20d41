use diesel::prelude::*;
use std::sync::Arc;

use crate::db::{get_connection, DbPool};
use crate::schema::wallets;
use crate::schema::wallets::dsl::*;

use super::wallets_constants::BALANCE_UPDATE_MAX_RETRIES;
use super::wallets_errors::{Result, WalletError};
use super::wallets_model::{NewWallet, Wallet, WalletDB, WalletUpdate};

/// Repository for managing wallet data in the database
pub struct WalletRepository {
    pool: Arc<DbPool>,
}

impl WalletRepository {
    /// Creates a new WalletRepository instance
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }

    /// Creates a new wallet in the database with a zero balance
    pub fn create(&self, new_wallet: NewWallet) -> Result<Wallet> {
        new_wallet.validate()?;

        let mut wallet_db: WalletDB = new_wallet.into();
        if wallet_db.id.is_empty() {
            wallet_db.id = uuid::Uuid::new_v4().to_string();
        }

        let mut conn =
            get_connection(&self.pool).map_err(|e| WalletError::DatabaseError(e.to_string()))?;

        diesel::insert_into(wallets::table)
            .values(&wallet_db)
            .execute(&mut conn)
            .map_err(|e| WalletError::DatabaseError(e.to_string()))?;

        Ok(wallet_db.into())
    }

    /// Updates wallet metadata. Balance and currency are never touched here.
    pub fn update(&self, wallet_update: WalletUpdate) -> Result<Wallet> {
        wallet_update.validate()?;

        let mut conn =
            get_connection(&self.pool).map_err(|e| WalletError::DatabaseError(e.to_string()))?;

        let now = chrono::Utc::now().naive_utc();
        diesel::update(wallets.filter(id.eq(&wallet_update.id)))
            .set((
                name.eq(&wallet_update.name),
                owner.eq(&wallet_update.owner),
                updated_at.eq(now),
            ))
            .execute(&mut conn)
            .map_err(|e| WalletError::DatabaseError(e.to_string()))?;

        self.get_by_id(&wallet_update.id)
    }

    /// Retrieves a wallet by its ID
    pub fn get_by_id(&self, wallet_id: &str) -> Result<Wallet> {
        let mut conn =
            get_connection(&self.pool).map_err(|e| WalletError::DatabaseError(e.to_string()))?;

        let wallet = wallets
            .find(wallet_id)
            .first::<WalletDB>(&mut conn)
            .map_err(|e| match e {
                diesel::result::Error::NotFound => {
                    WalletError::NotFound(format!("Wallet with id {} not found", wallet_id))
                }
                _ => WalletError::DatabaseError(e.to_string()),
            })?;

        Ok(wallet.into())
    }

    /// Lists wallets, optionally filtering by active status
    pub fn list(&self, is_active_filter: Option<bool>) -> Result<Vec<Wallet>> {
        let mut conn =
            get_connection(&self.pool).map_err(|e| WalletError::DatabaseError(e.to_string()))?;

        let mut query = wallets::table.into_boxed();

        if let Some(active) = is_active_filter {
            query = query.filter(is_active.eq(active));
        }

        query
            .order((is_active.desc(), name.asc()))
            .load::<WalletDB>(&mut conn)
            .map_err(|e| WalletError::DatabaseError(e.to_string()))
            .map(|results| results.into_iter().map(Wallet::from).collect())
    }

    /// Soft-deletes a wallet. Transactions referencing it remain for audit.
    pub fn soft_delete(&self, wallet_id: &str) -> Result<()> {
        let mut conn =
            get_connection(&self.pool).map_err(|e| WalletError::DatabaseError(e.to_string()))?;

        let now = chrono::Utc::now().naive_utc();
        let affected = diesel::update(wallets.filter(id.eq(wallet_id)))
            .set((is_active.eq(false), updated_at.eq(now)))
            .execute(&mut conn)
            .map_err(|e| WalletError::DatabaseError(e.to_string()))?;

        if affected == 0 {
            return Err(WalletError::NotFound(format!(
                "Wallet with id {} not found",
                wallet_id
            )));
        }

        Ok(())
    }

    /// Applies a signed balance delta with a compare-and-apply version check.
    /// Rejects updates that would drive the balance negative unless
    /// `allow_negative` is set. Retries a bounded number of times when the
    /// version check loses a race.
    pub fn apply_delta(&self, wallet_id: &str, delta: i64, allow_negative: bool) -> Result<Wallet> {
        let mut conn =
            get_connection(&self.pool).map_err(|e| WalletError::DatabaseError(e.to_string()))?;

        let mut attempts: u32 = 0;
        loop {
            let current = wallets
                .find(wallet_id)
                .first::<WalletDB>(&mut conn)
                .map_err(|e| match e {
                    diesel::result::Error::NotFound => {
                        WalletError::NotFound(format!("Wallet with id {} not found", wallet_id))
                    }
                    _ => WalletError::DatabaseError(e.to_string()),
                })?;

            if !current.is_active {
                return Err(WalletError::InvalidData(format!(
                    "Wallet {} is inactive",
                    wallet_id
                )));
            }

            let new_balance = current.balance.checked_add(delta).ok_or_else(|| {
                WalletError::InvalidData(format!("Balance overflow on wallet {}", wallet_id))
            })?;

            if new_balance < 0 && !allow_negative {
                return Err(WalletError::InsufficientFunds {
                    wallet_id: wallet_id.to_string(),
                    balance: current.balance,
                    requested: delta,
                });
            }

            let now = chrono::Utc::now().naive_utc();
            let affected = diesel::update(
                wallets
                    .filter(id.eq(wallet_id))
                    .filter(version.eq(current.version)),
            )
            .set((
                balance.eq(new_balance),
                version.eq(current.version + 1),
                updated_at.eq(now),
            ))
            .execute(&mut conn)
            .map_err(|e| WalletError::DatabaseError(e.to_string()))?;

            if affected == 1 {
                let mut updated = current;
                updated.balance = new_balance;
                updated.version += 1;
                updated.updated_at = now;
                return Ok(updated.into());
            }

            // Lost the version race; reload and retry.
            attempts += 1;
            if attempts >= BALANCE_UPDATE_MAX_RETRIES {
                return Err(WalletError::Conflict(format!(
                    "Balance update on wallet {} kept losing the version race",
                    wallet_id
                )));
            }
        }
    }

    /// Overwrites the stored balance. Reserved for the reconciliation job;
    /// every other caller must go through `apply_delta`.
    pub fn set_balance(&self, wallet_id: &str, new_balance: i64) -> Result<Wallet> {
        let mut conn =
            get_connection(&self.pool).map_err(|e| WalletError::DatabaseError(e.to_string()))?;

        let current = wallets
            .find(wallet_id)
            .first::<WalletDB>(&mut conn)
            .map_err(|e| match e {
                diesel::result::Error::NotFound => {
                    WalletError::NotFound(format!("Wallet with id {} not found", wallet_id))
                }
                _ => WalletError::DatabaseError(e.to_string()),
            })?;

        let now = chrono::Utc::now().naive_utc();
        diesel::update(wallets.filter(id.eq(wallet_id)))
            .set((
                balance.eq(new_balance),
                version.eq(current.version + 1),
                updated_at.eq(now),
            ))
            .execute(&mut conn)
            .map_err(|e| WalletError::DatabaseError(e.to_string()))?;

        let mut updated = current;
        updated.balance = new_balance;
        updated.version += 1;
        updated.updated_at = now;
        Ok(updated.into())
    }
}
