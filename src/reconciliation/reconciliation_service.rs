use log::{info, warn};
use std::sync::Arc;

use crate::errors::Result;
use crate::investments::{InvestmentRepository, PositionTotals};
use crate::transactions::{Transaction, TransactionKind, TransactionRepository};
use crate::utils::fixed_point::cost_of;
use crate::wallets::WalletService;

use super::reconciliation_model::{DividendDrift, ReconciliationReport, WalletDrift};

/// Periodic consistency job. Replays every wallet's transactions, recomputing
/// each delta from its recorded components instead of trusting the stored
/// signed amount, and compares the result against the live balance. This is
/// the repair path for drift left behind by a failed compensation.
pub struct ReconciliationService {
    wallets: Arc<WalletService>,
    transactions: Arc<TransactionRepository>,
    investments: Arc<InvestmentRepository>,
}

impl ReconciliationService {
    /// Creates a new ReconciliationService instance
    pub fn new(
        wallets: Arc<WalletService>,
        transactions: Arc<TransactionRepository>,
        investments: Arc<InvestmentRepository>,
    ) -> Self {
        Self {
            wallets,
            transactions,
            investments,
        }
    }

    /// Checks every wallet and every investment dividend aggregate. In
    /// dry-run mode only the report is produced; otherwise each drifted
    /// balance is overwritten under the wallet's lock and each drifted
    /// dividend aggregate is rewritten from the transactions.
    pub fn reconcile_wallets(&self, dry_run: bool) -> Result<ReconciliationReport> {
        let wallets = self.wallets.get_all_wallets()?;
        let wallets_checked = wallets.len();

        let mut wallet_drifts = Vec::new();
        let mut dividend_drifts = Vec::new();
        let mut lot_conservation_violations = Vec::new();

        for wallet in wallets {
            let transactions = self.transactions.list_by_wallet(&wallet.id)?;
            let computed_balance: i64 = transactions.iter().map(replayed_delta).sum();

            if computed_balance != wallet.balance {
                let drift = WalletDrift {
                    wallet_id: wallet.id.clone(),
                    wallet_name: wallet.name.clone(),
                    currency: wallet.currency.clone(),
                    stored_balance: wallet.balance,
                    computed_balance,
                    delta: computed_balance - wallet.balance,
                };
                warn!(
                    "Wallet {} drifted: stored {}, computed {} (delta {})",
                    drift.wallet_id, drift.stored_balance, drift.computed_balance, drift.delta
                );

                if !dry_run {
                    self.wallets.reconcile_balance(&wallet.id, computed_balance)?;
                    info!(
                        "Wallet {} balance repaired to {}",
                        drift.wallet_id, computed_balance
                    );
                }
                wallet_drifts.push(drift);
            }

            for investment in self.investments.list_by_wallet(&wallet.id)? {
                if let Some(drift) = self.check_dividends(&investment.id, dry_run)? {
                    dividend_drifts.push(drift);
                }

                let lot_sum = self.investments.sum_lot_remaining(&investment.id)?;
                if lot_sum != investment.quantity {
                    warn!(
                        "Lot conservation violated for investment {}: lots sum to {}, position holds {}",
                        investment.id, lot_sum, investment.quantity
                    );
                    lot_conservation_violations.push(investment.id.clone());
                }
            }
        }

        let report = ReconciliationReport {
            generated_at: chrono::Utc::now().naive_utc(),
            dry_run,
            wallets_checked,
            wallet_drifts,
            dividend_drifts,
            lot_conservation_violations,
        };

        info!(
            "Reconciliation finished: {} wallet(s) checked, {} balance drift(s), {} dividend drift(s), {} conservation violation(s){}",
            report.wallets_checked,
            report.wallet_drifts.len(),
            report.dividend_drifts.len(),
            report.lot_conservation_violations.len(),
            if dry_run { " (dry run)" } else { "" }
        );

        Ok(report)
    }

    fn check_dividends(&self, investment_id: &str, dry_run: bool) -> Result<Option<DividendDrift>> {
        let investment = self.investments.get_by_id(investment_id)?;

        let computed_dividends: i64 = self
            .transactions
            .list_by_investment(investment_id)?
            .iter()
            .filter(|t| t.kind == TransactionKind::Dividend)
            .map(|t| cost_of(t.quantity.unwrap_or(0), t.unit_price.unwrap_or(0)))
            .sum();

        if computed_dividends == investment.total_dividends {
            return Ok(None);
        }

        let drift = DividendDrift {
            investment_id: investment.id.clone(),
            symbol: investment.symbol.clone(),
            stored_dividends: investment.total_dividends,
            computed_dividends,
            delta: computed_dividends - investment.total_dividends,
        };
        warn!(
            "Investment {} dividend aggregate drifted: stored {}, computed {}",
            drift.investment_id, drift.stored_dividends, drift.computed_dividends
        );

        if !dry_run {
            let totals = PositionTotals {
                quantity: investment.quantity,
                total_cost: investment.total_cost,
                realized_pnl: investment.realized_pnl,
                total_dividends: computed_dividends,
            };
            self.investments.update_totals(&investment.id, &totals)?;
        }

        Ok(Some(drift))
    }
}

/// Recomputes a transaction's wallet delta from its components. The stored
/// signed amount is deliberately not trusted here; agreement between the two
/// is exactly what the job verifies.
fn replayed_delta(txn: &Transaction) -> i64 {
    match txn.kind {
        TransactionKind::Income | TransactionKind::TransferIn => txn.amount.abs(),
        TransactionKind::Expense | TransactionKind::TransferOut => -txn.amount.abs(),
        TransactionKind::Adjustment => txn.amount,
        TransactionKind::Buy => {
            -(cost_of(txn.quantity.unwrap_or(0), txn.unit_price.unwrap_or(0))
                + txn.fees.unwrap_or(0))
        }
        TransactionKind::Sell | TransactionKind::Dividend => {
            cost_of(txn.quantity.unwrap_or(0), txn.unit_price.unwrap_or(0))
                - txn.fees.unwrap_or(0)
        }
    }
}
