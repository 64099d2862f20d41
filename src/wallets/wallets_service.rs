use dashmap::DashMap;
use log::debug;
use std::sync::{Arc, Mutex};

use super::wallets_model::{DeltaReason, NewWallet, Wallet, WalletUpdate};
use super::wallets_repository::WalletRepository;
use super::wallets_errors::{Result, WalletError};

/// Service for managing wallets. Serializes balance mutations per wallet:
/// concurrent operations against the same wallet queue on its lock, while
/// operations against different wallets proceed in parallel. The repository's
/// version check backs this up against writers that bypass the service.
pub struct WalletService {
    repository: Arc<WalletRepository>,
    locks: DashMap<String, Arc<Mutex<()>>>,
}

impl WalletService {
    /// Creates a new WalletService instance
    pub fn new(repository: Arc<WalletRepository>) -> Self {
        Self {
            repository,
            locks: DashMap::new(),
        }
    }

    /// Creates a new wallet
    pub fn create_wallet(&self, new_wallet: NewWallet) -> Result<Wallet> {
        self.repository.create(new_wallet)
    }

    /// Updates wallet metadata
    pub fn update_wallet(&self, wallet_update: WalletUpdate) -> Result<Wallet> {
        self.repository.update(wallet_update)
    }

    /// Retrieves a wallet by its ID
    pub fn get_wallet(&self, wallet_id: &str) -> Result<Wallet> {
        self.repository.get_by_id(wallet_id)
    }

    /// Lists all wallets
    pub fn get_all_wallets(&self) -> Result<Vec<Wallet>> {
        self.repository.list(None)
    }

    /// Lists only active wallets
    pub fn get_active_wallets(&self) -> Result<Vec<Wallet>> {
        self.repository.list(Some(true))
    }

    /// Soft-deletes a wallet
    pub fn delete_wallet(&self, wallet_id: &str) -> Result<()> {
        self.repository.soft_delete(wallet_id)
    }

    /// Applies a signed balance delta under the wallet's lock. Does not
    /// create any transaction record; callers pair every delta with a
    /// transaction store write.
    pub fn apply_wallet_delta(
        &self,
        wallet_id: &str,
        amount: i64,
        reason: DeltaReason,
    ) -> Result<Wallet> {
        let lock = self.lock_for(wallet_id);
        let _guard = lock
            .lock()
            .map_err(|_| WalletError::Conflict(format!("Wallet lock poisoned: {}", wallet_id)))?;

        debug!(
            "Applying delta {} to wallet {} ({:?})",
            amount, wallet_id, reason
        );
        self.repository
            .apply_delta(wallet_id, amount, reason.allows_negative_balance())
    }

    /// Overwrites a wallet balance with a reconciliation result, under the
    /// same lock as live deltas.
    pub fn reconcile_balance(&self, wallet_id: &str, computed_balance: i64) -> Result<Wallet> {
        let lock = self.lock_for(wallet_id);
        let _guard = lock
            .lock()
            .map_err(|_| WalletError::Conflict(format!("Wallet lock poisoned: {}", wallet_id)))?;

        self.repository.set_balance(wallet_id, computed_balance)
    }

    fn lock_for(&self, wallet_id: &str) -> Arc<Mutex<()>> {
        self.locks
            .entry(wallet_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}
