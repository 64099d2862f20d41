use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One wallet whose stored balance was compared against a replay of its
/// transactions
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletDrift {
    pub wallet_id: String,
    pub wallet_name: String,
    pub currency: String,
    /// Balance currently stored on the wallet row, minor units
    pub stored_balance: i64,
    /// Balance recomputed from the transaction components, minor units
    pub computed_balance: i64,
    /// `computed_balance - stored_balance`; zero means the wallet is clean
    pub delta: i64,
}

impl WalletDrift {
    pub fn is_clean(&self) -> bool {
        self.delta == 0
    }
}

/// One investment whose dividend aggregate was compared against its
/// dividend transactions
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DividendDrift {
    pub investment_id: String,
    pub symbol: String,
    pub stored_dividends: i64,
    pub computed_dividends: i64,
    pub delta: i64,
}

impl DividendDrift {
    pub fn is_clean(&self) -> bool {
        self.delta == 0
    }
}

/// The outcome of one reconciliation run. In dry-run mode the report is the
/// whole output; in apply mode every non-zero drift listed here has already
/// been repaired.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconciliationReport {
    pub generated_at: NaiveDateTime,
    pub dry_run: bool,
    pub wallets_checked: usize,
    pub wallet_drifts: Vec<WalletDrift>,
    pub dividend_drifts: Vec<DividendDrift>,
    /// Investments whose lots no longer sum to the position quantity. These
    /// are reported, never auto-repaired.
    pub lot_conservation_violations: Vec<String>,
}

impl ReconciliationReport {
    pub fn is_clean(&self) -> bool {
        self.wallet_drifts.is_empty()
            && self.dividend_drifts.is_empty()
            && self.lot_conservation_violations.is_empty()
    }
}
