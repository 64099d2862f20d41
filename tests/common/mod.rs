use std::path::PathBuf;
use std::sync::Arc;

use walletfolio_core::coordinator::LedgerCoordinator;
use walletfolio_core::db::{self, DbPool};
use walletfolio_core::investments::InvestmentRepository;
use walletfolio_core::reconciliation::ReconciliationService;
use walletfolio_core::transactions::TransactionRepository;
use walletfolio_core::wallets::{NewWallet, Wallet, WalletKind, WalletRepository, WalletService};

/// A fully wired ledger over a throwaway SQLite file. The file is removed
/// when the harness drops.
pub struct TestLedger {
    pub pool: Arc<DbPool>,
    pub wallets: Arc<WalletService>,
    pub transactions: Arc<TransactionRepository>,
    pub investments: Arc<InvestmentRepository>,
    pub coordinator: LedgerCoordinator,
    pub reconciliation: ReconciliationService,
    db_path: PathBuf,
}

impl TestLedger {
    pub fn new() -> Self {
        let db_path = std::env::temp_dir().join(format!(
            "walletfolio_test_{}.db",
            uuid::Uuid::new_v4()
        ));
        let db_path_str = db_path.to_str().unwrap().to_string();

        let pool = db::create_pool(&db_path_str).unwrap();
        db::run_migrations(&pool).unwrap();

        let wallet_repository = Arc::new(WalletRepository::new(pool.clone()));
        let wallets = Arc::new(WalletService::new(wallet_repository));
        let transactions = Arc::new(TransactionRepository::new(pool.clone()));
        let investments = Arc::new(InvestmentRepository::new(pool.clone()));

        let coordinator = LedgerCoordinator::new(
            wallets.clone(),
            transactions.clone(),
            investments.clone(),
        );
        let reconciliation = ReconciliationService::new(
            wallets.clone(),
            transactions.clone(),
            investments.clone(),
        );

        Self {
            pool,
            wallets,
            transactions,
            investments,
            coordinator,
            reconciliation,
            db_path,
        }
    }

    pub fn create_wallet(&self, name: &str, kind: WalletKind) -> Wallet {
        self.wallets
            .create_wallet(NewWallet {
                id: None,
                name: name.to_string(),
                owner: "test-owner".to_string(),
                currency: "VND".to_string(),
                kind,
            })
            .unwrap()
    }
}

impl Drop for TestLedger {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_path);
    }
}
