use log::debug;
use std::sync::Arc;

use crate::investments::{
    basis_of_consumptions, plan_fifo_sale, Investment, InvestmentError, InvestmentRepository,
    NewInvestment, NewLot, PlannedConsumption, PositionTotals,
};
use crate::transactions::{
    NewTransaction, Transaction, TransactionKind, TransactionRepository,
};
use crate::utils::fixed_point::cost_of;
use crate::wallets::{DeltaReason, Wallet, WalletError, WalletService};

use super::coordinator_errors::{CoordinatorError, Result};
use super::coordinator_model::{CashOperation, CreateInvestment, InvestmentOperation};
use super::saga::Saga;

/// A step outcome carrying the name of the step that failed, so the saga
/// can report where the rollback started.
type StepResult<T> = std::result::Result<T, (&'static str, CoordinatorError)>;

fn step<T, E: Into<CoordinatorError>>(
    name: &'static str,
    result: std::result::Result<T, E>,
) -> StepResult<T> {
    result.map_err(|e| (name, e.into()))
}

fn finish<T>(saga: Saga, outcome: StepResult<T>) -> Result<T> {
    match outcome {
        Ok(value) => {
            saga.commit();
            Ok(value)
        }
        Err((failed_step, err)) => {
            saga.rollback(failed_step);
            Err(err)
        }
    }
}

/// Sequences wallet, transaction-store and investment writes for every
/// multi-entity operation, and undoes completed steps in reverse order when
/// a later step fails. The individual stores have no shared atomic
/// transaction; this coordinator is what makes an operation appear atomic
/// to the caller.
pub struct LedgerCoordinator {
    wallets: Arc<WalletService>,
    transactions: Arc<TransactionRepository>,
    investments: Arc<InvestmentRepository>,
}

impl LedgerCoordinator {
    /// Creates a new LedgerCoordinator instance
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

    /// Creates an investment position together with its opening buy: the
    /// position row, the opening lot, the buy transaction and the wallet
    /// debit, or none of them.
    pub fn create_investment(&self, input: CreateInvestment) -> Result<(Investment, Transaction)> {
        let mut saga = Saga::new("create investment");
        let outcome = self.try_create_investment(&mut saga, input);
        let (investment_id, txn) = finish(saga, outcome)?;

        // The operation is committed; this read only freshens the returned
        // snapshot and can no longer trigger a rollback.
        let investment = self.investments.get_by_id(&investment_id)?;
        Ok((investment, txn))
    }

    /// Runs a buy/sell/dividend against an existing investment
    pub fn create_investment_transaction(
        &self,
        op: InvestmentOperation,
    ) -> Result<(Investment, Transaction)> {
        let (investment_id, txn) = match op.kind {
            TransactionKind::Buy => {
                let mut saga = Saga::new("investment buy");
                let outcome = self.try_buy(&mut saga, op);
                finish(saga, outcome)?
            }
            TransactionKind::Sell => {
                let mut saga = Saga::new("investment sell");
                let outcome = self.try_sell(&mut saga, op);
                finish(saga, outcome)?
            }
            TransactionKind::Dividend => {
                let mut saga = Saga::new("investment dividend");
                let outcome = self.try_dividend(&mut saga, op);
                finish(saga, outcome)?
            }
            other => {
                return Err(CoordinatorError::InvalidOperation(format!(
                    "{} is not an investment operation",
                    other.as_str()
                )))
            }
        };

        let investment = self.investments.get_by_id(&investment_id)?;
        Ok((investment, txn))
    }

    /// Reverses a recorded buy/sell/dividend: the exact structural inverse
    /// of the original operation, applied as its own saga.
    pub fn reverse_investment_transaction(&self, transaction_id: &str) -> Result<Investment> {
        let txn = self.transactions.get_by_id(transaction_id)?;

        let investment_id = match txn.kind {
            TransactionKind::Buy => {
                let mut saga = Saga::new("reverse buy");
                let outcome = self.try_reverse_buy(&mut saga, txn);
                finish(saga, outcome)?
            }
            TransactionKind::Sell => {
                let mut saga = Saga::new("reverse sell");
                let outcome = self.try_reverse_sell(&mut saga, txn);
                finish(saga, outcome)?
            }
            TransactionKind::Dividend => {
                let mut saga = Saga::new("reverse dividend");
                let outcome = self.try_reverse_dividend(&mut saga, txn);
                finish(saga, outcome)?
            }
            other => {
                return Err(CoordinatorError::InvalidOperation(format!(
                    "{} transactions cannot be reversed through the investment path",
                    other.as_str()
                )))
            }
        };

        Ok(self.investments.get_by_id(&investment_id)?)
    }

    /// Records a plain cash event (income, expense, transfer leg, manual
    /// adjustment): one transaction paired with one balance delta.
    pub fn record_cash_transaction(&self, op: CashOperation) -> Result<(Wallet, Transaction)> {
        let mut saga = Saga::new("cash transaction");
        let outcome = self.try_cash(&mut saga, op);
        finish(saga, outcome)
    }

    fn try_create_investment(
        &self,
        saga: &mut Saga,
        input: CreateInvestment,
    ) -> StepResult<(String, Transaction)> {
        validate_trade_inputs(input.quantity, input.unit_price, input.fees)?;

        let wallet = step("load wallet", self.wallets.get_wallet(&input.wallet_id))?;

        let investment = step(
            "create investment",
            self.investments.create(NewInvestment {
                id: None,
                wallet_id: input.wallet_id.clone(),
                symbol: input.symbol,
                asset_kind: input.asset_kind,
                currency: wallet.currency.clone(),
                unit: input.unit,
            }),
        )?;
        {
            let repo = Arc::clone(&self.investments);
            let investment_id = investment.id.clone();
            saga.register("create investment", move || {
                repo.delete(&investment_id).map_err(Into::into)
            });
        }

        let txn = self.execute_buy(
            saga,
            &wallet,
            &investment,
            input.quantity,
            input.unit_price,
            input.fees,
            input.date,
            input.note,
        )?;

        Ok((investment.id, txn))
    }

    fn try_buy(
        &self,
        saga: &mut Saga,
        op: InvestmentOperation,
    ) -> StepResult<(String, Transaction)> {
        validate_trade_inputs(op.quantity, op.unit_price, op.fees)?;

        let investment = step(
            "load investment",
            self.investments.get_by_id(&op.investment_id),
        )?;
        let wallet = step("load wallet", self.wallets.get_wallet(&investment.wallet_id))?;

        let txn = self.execute_buy(
            saga,
            &wallet,
            &investment,
            op.quantity,
            op.unit_price,
            op.fees,
            op.date,
            op.note,
        )?;

        Ok((investment.id, txn))
    }

    /// Shared persistence steps of an opening or follow-up buy:
    /// lot -> transaction -> aggregates -> wallet debit.
    #[allow(clippy::too_many_arguments)]
    fn execute_buy(
        &self,
        saga: &mut Saga,
        wallet: &Wallet,
        investment: &Investment,
        quantity: i64,
        unit_price: i64,
        fees: i64,
        date: chrono::NaiveDateTime,
        note: Option<String>,
    ) -> StepResult<Transaction> {
        let cost = cost_of(quantity, unit_price);
        let total_spend = cost + fees;

        // Sufficiency pre-check before anything is persisted; the delta
        // apply re-checks under the wallet lock.
        if wallet.balance < total_spend {
            return Err((
                "check balance",
                WalletError::InsufficientFunds {
                    wallet_id: wallet.id.clone(),
                    balance: wallet.balance,
                    requested: -total_spend,
                }
                .into(),
            ));
        }

        let lot = step(
            "create lot",
            self.investments.insert_lot(NewLot {
                investment_id: investment.id.clone(),
                quantity,
                unit_cost: unit_price,
                acquired_at: date,
            }),
        )?;
        {
            let repo = Arc::clone(&self.investments);
            let lot_id = lot.id.clone();
            saga.register("create lot", move || {
                repo.delete_lot(&lot_id).map_err(Into::into)
            });
        }

        let txn = step(
            "create transaction",
            self.transactions.create(NewTransaction {
                id: None,
                wallet_id: wallet.id.clone(),
                kind: TransactionKind::Buy,
                amount: -total_spend,
                currency: investment.currency.clone(),
                category_id: None,
                investment_id: Some(investment.id.clone()),
                lot_id: Some(lot.id.clone()),
                quantity: Some(quantity),
                unit_price: Some(unit_price),
                fees: Some(fees),
                transaction_date: date,
                note,
            }),
        )?;
        {
            let repo = Arc::clone(&self.transactions);
            let txn_id = txn.id.clone();
            saga.register("create transaction", move || {
                repo.delete(&txn_id).map_err(Into::into)
            });
        }

        let before = PositionTotals::of(investment);
        let after = before.after_buy(quantity, total_spend);
        step(
            "update aggregates",
            self.investments.update_totals(&investment.id, &after),
        )?;
        {
            let repo = Arc::clone(&self.investments);
            let investment_id = investment.id.clone();
            saga.register("update aggregates", move || {
                repo.update_totals(&investment_id, &before)
                    .map(|_| ())
                    .map_err(Into::into)
            });
        }

        step(
            "apply wallet delta",
            self.wallets
                .apply_wallet_delta(&wallet.id, -total_spend, DeltaReason::Trade),
        )?;

        debug!(
            "Buy committed: investment {} quantity {} at {} (spend {})",
            investment.id, quantity, unit_price, total_spend
        );
        Ok(txn)
    }

    fn try_sell(
        &self,
        saga: &mut Saga,
        op: InvestmentOperation,
    ) -> StepResult<(String, Transaction)> {
        validate_trade_inputs(op.quantity, op.unit_price, op.fees)?;

        let investment = step(
            "load investment",
            self.investments.get_by_id(&op.investment_id),
        )?;
        let wallet = step("load wallet", self.wallets.get_wallet(&investment.wallet_id))?;

        let lots = step("load lots", self.investments.list_lots(&investment.id))?;
        let plan = step(
            "plan sale",
            plan_fifo_sale(&investment.id, &lots, op.quantity),
        )?;

        let proceeds = cost_of(op.quantity, op.unit_price);
        let net = proceeds - op.fees;
        let realized_delta = net - plan.cost_basis;

        let txn = step(
            "create transaction",
            self.transactions.create(NewTransaction {
                id: None,
                wallet_id: wallet.id.clone(),
                kind: TransactionKind::Sell,
                amount: net,
                currency: investment.currency.clone(),
                category_id: None,
                investment_id: Some(investment.id.clone()),
                lot_id: None,
                quantity: Some(op.quantity),
                unit_price: Some(op.unit_price),
                fees: Some(op.fees),
                transaction_date: op.date,
                note: op.note,
            }),
        )?;
        {
            let repo = Arc::clone(&self.transactions);
            let txn_id = txn.id.clone();
            saga.register("create transaction", move || {
                repo.delete(&txn_id).map_err(Into::into)
            });
        }

        // Registered before the inserts so a mid-trace failure still clears
        // whatever rows landed.
        {
            let repo = Arc::clone(&self.investments);
            let txn_id = txn.id.clone();
            saga.register("record consumption trace", move || {
                repo.delete_consumptions_by_transaction(&txn_id)
                    .map(|_| ())
                    .map_err(Into::into)
            });
        }
        for planned in &plan.consumptions {
            step(
                "record consumption trace",
                self.investments.insert_consumption(&txn.id, planned),
            )?;
        }

        for planned in &plan.consumptions {
            let lot = step("drain lot", self.investments.get_lot(&planned.lot_id))?;
            step(
                "drain lot",
                self.investments
                    .set_lot_remaining(&planned.lot_id, lot.remaining_quantity - planned.quantity),
            )?;
            {
                let repo = Arc::clone(&self.investments);
                let lot_id = planned.lot_id.clone();
                let prior_remaining = lot.remaining_quantity;
                saga.register("drain lot", move || {
                    repo.set_lot_remaining(&lot_id, prior_remaining)
                        .map_err(Into::into)
                });
            }
        }

        let before = PositionTotals::of(&investment);
        let after = step(
            "update aggregates",
            before.after_sell(op.quantity, plan.cost_basis, realized_delta),
        )?;
        step(
            "update aggregates",
            self.investments.update_totals(&investment.id, &after),
        )?;
        {
            let repo = Arc::clone(&self.investments);
            let investment_id = investment.id.clone();
            saga.register("update aggregates", move || {
                repo.update_totals(&investment_id, &before)
                    .map(|_| ())
                    .map_err(Into::into)
            });
        }

        step(
            "apply wallet delta",
            self.wallets
                .apply_wallet_delta(&wallet.id, net, DeltaReason::Trade),
        )?;

        debug!(
            "Sell committed: investment {} quantity {} at {} (net {}, realized {})",
            investment.id, op.quantity, op.unit_price, net, realized_delta
        );

        Ok((investment.id, txn))
    }

    fn try_dividend(
        &self,
        saga: &mut Saga,
        op: InvestmentOperation,
    ) -> StepResult<(String, Transaction)> {
        if op.unit_price <= 0 || op.fees < 0 {
            return Err((
                "validate input",
                CoordinatorError::InvalidOperation(
                    "Dividend per unit must be positive and fees non-negative".to_string(),
                ),
            ));
        }

        let investment = step(
            "load investment",
            self.investments.get_by_id(&op.investment_id),
        )?;
        if investment.quantity == 0 {
            return Err((
                "validate input",
                CoordinatorError::InvalidOperation(format!(
                    "Investment {} holds no quantity to pay a dividend on",
                    investment.id
                )),
            ));
        }
        let wallet = step("load wallet", self.wallets.get_wallet(&investment.wallet_id))?;

        let gross = cost_of(investment.quantity, op.unit_price);
        let net = gross - op.fees;

        let txn = step(
            "create transaction",
            self.transactions.create(NewTransaction {
                id: None,
                wallet_id: wallet.id.clone(),
                kind: TransactionKind::Dividend,
                amount: net,
                currency: investment.currency.clone(),
                category_id: None,
                investment_id: Some(investment.id.clone()),
                lot_id: None,
                quantity: Some(investment.quantity),
                unit_price: Some(op.unit_price),
                fees: Some(op.fees),
                transaction_date: op.date,
                note: op.note,
            }),
        )?;
        {
            let repo = Arc::clone(&self.transactions);
            let txn_id = txn.id.clone();
            saga.register("create transaction", move || {
                repo.delete(&txn_id).map_err(Into::into)
            });
        }

        let before = PositionTotals::of(&investment);
        let after = before.after_dividend(gross);
        step(
            "update dividend aggregate",
            self.investments.update_totals(&investment.id, &after),
        )?;
        {
            let repo = Arc::clone(&self.investments);
            let investment_id = investment.id.clone();
            saga.register("update dividend aggregate", move || {
                repo.update_totals(&investment_id, &before)
                    .map(|_| ())
                    .map_err(Into::into)
            });
        }

        step(
            "credit wallet",
            self.wallets
                .apply_wallet_delta(&wallet.id, net, DeltaReason::Dividend),
        )?;

        Ok((investment.id, txn))
    }

    fn try_reverse_buy(&self, saga: &mut Saga, txn: Transaction) -> StepResult<String> {
        let investment_id = step(
            "validate transaction",
            txn.investment_id.clone().ok_or_else(|| {
                CoordinatorError::InvalidOperation(format!(
                    "Buy transaction {} has no investment id",
                    txn.id
                ))
            }),
        )?;
        let lot_id = step(
            "validate transaction",
            txn.lot_id.clone().ok_or_else(|| {
                CoordinatorError::InvalidOperation(format!(
                    "Buy transaction {} has no lot id",
                    txn.id
                ))
            }),
        )?;

        let investment = step("load investment", self.investments.get_by_id(&investment_id))?;
        let lot = step("load lot", self.investments.get_lot(&lot_id))?;

        if lot.remaining_quantity != lot.quantity {
            return Err((
                "check lot",
                InvestmentError::LotInUse(lot.id.clone()).into(),
            ));
        }

        let cost_with_fees = cost_of(lot.quantity, lot.unit_cost) + txn.fees.unwrap_or(0);

        let before = PositionTotals::of(&investment);
        let after = step(
            "recompute aggregates",
            before.after_buy_reversal(lot.quantity, cost_with_fees),
        )?;
        step(
            "update aggregates",
            self.investments.update_totals(&investment.id, &after),
        )?;
        {
            let repo = Arc::clone(&self.investments);
            let inv_id = investment.id.clone();
            saga.register("update aggregates", move || {
                repo.update_totals(&inv_id, &before)
                    .map(|_| ())
                    .map_err(Into::into)
            });
        }

        step(
            "credit wallet",
            self.wallets
                .apply_wallet_delta(&txn.wallet_id, cost_with_fees, DeltaReason::Trade),
        )?;
        {
            let wallets = Arc::clone(&self.wallets);
            let wallet_id = txn.wallet_id.clone();
            saga.register("credit wallet", move || {
                wallets
                    .apply_wallet_delta(&wallet_id, -cost_with_fees, DeltaReason::Trade)
                    .map(|_| ())
                    .map_err(Into::into)
            });
        }

        let record = txn.clone();
        step("delete transaction", self.transactions.delete(&txn.id))?;
        {
            let repo = Arc::clone(&self.transactions);
            saga.register("delete transaction", move || {
                repo.create(NewTransaction::from(record))
                    .map(|_| ())
                    .map_err(Into::into)
            });
        }

        step("delete lot", self.investments.delete_lot(&lot.id))?;

        Ok(investment_id)
    }

    fn try_reverse_sell(&self, saga: &mut Saga, txn: Transaction) -> StepResult<String> {
        let investment_id = step(
            "validate transaction",
            txn.investment_id.clone().ok_or_else(|| {
                CoordinatorError::InvalidOperation(format!(
                    "Sell transaction {} has no investment id",
                    txn.id
                ))
            }),
        )?;
        let investment = step("load investment", self.investments.get_by_id(&investment_id))?;

        let consumptions = step(
            "load consumption trace",
            self.investments.list_consumptions_by_transaction(&txn.id),
        )?;
        if consumptions.is_empty() {
            return Err((
                "load consumption trace",
                CoordinatorError::InvalidOperation(format!(
                    "Sell transaction {} has no consumption trace",
                    txn.id
                )),
            ));
        }

        let planned: Vec<PlannedConsumption> = consumptions
            .iter()
            .map(|c| PlannedConsumption {
                lot_id: c.lot_id.clone(),
                quantity: c.quantity,
                unit_cost: c.unit_cost,
            })
            .collect();
        let cost_basis = basis_of_consumptions(&planned);
        let total_quantity: i64 = planned.iter().map(|c| c.quantity).sum();
        // The realized delta the sale added: net proceeds minus the basis it
        // consumed, recomputed from the recorded trace.
        let realized_delta = txn.amount - cost_basis;

        for consumption in &planned {
            let lot = step("restore lot", self.investments.get_lot(&consumption.lot_id))?;
            step(
                "restore lot",
                self.investments.set_lot_remaining(
                    &consumption.lot_id,
                    lot.remaining_quantity + consumption.quantity,
                ),
            )?;
            {
                let repo = Arc::clone(&self.investments);
                let lot_id = consumption.lot_id.clone();
                let prior_remaining = lot.remaining_quantity;
                saga.register("restore lot", move || {
                    repo.set_lot_remaining(&lot_id, prior_remaining)
                        .map_err(Into::into)
                });
            }
        }

        let before = PositionTotals::of(&investment);
        let after = before.after_sell_reversal(total_quantity, cost_basis, realized_delta);
        step(
            "update aggregates",
            self.investments.update_totals(&investment.id, &after),
        )?;
        {
            let repo = Arc::clone(&self.investments);
            let inv_id = investment.id.clone();
            saga.register("update aggregates", move || {
                repo.update_totals(&inv_id, &before)
                    .map(|_| ())
                    .map_err(Into::into)
            });
        }

        step(
            "debit wallet",
            self.wallets
                .apply_wallet_delta(&txn.wallet_id, -txn.amount, DeltaReason::Trade),
        )?;
        {
            let wallets = Arc::clone(&self.wallets);
            let wallet_id = txn.wallet_id.clone();
            let amount = txn.amount;
            saga.register("debit wallet", move || {
                wallets
                    .apply_wallet_delta(&wallet_id, amount, DeltaReason::Trade)
                    .map(|_| ())
                    .map_err(Into::into)
            });
        }

        step(
            "delete consumption trace",
            self.investments.delete_consumptions_by_transaction(&txn.id),
        )?;
        {
            let repo = Arc::clone(&self.investments);
            let txn_id = txn.id.clone();
            let trace = planned.clone();
            saga.register("delete consumption trace", move || {
                for item in &trace {
                    repo.insert_consumption(&txn_id, item).map_err(CoordinatorError::from)?;
                }
                Ok(())
            });
        }

        step("delete transaction", self.transactions.delete(&txn.id))?;

        Ok(investment_id)
    }

    fn try_reverse_dividend(&self, saga: &mut Saga, txn: Transaction) -> StepResult<String> {
        let investment_id = step(
            "validate transaction",
            txn.investment_id.clone().ok_or_else(|| {
                CoordinatorError::InvalidOperation(format!(
                    "Dividend transaction {} has no investment id",
                    txn.id
                ))
            }),
        )?;
        let investment = step("load investment", self.investments.get_by_id(&investment_id))?;

        let gross = cost_of(txn.quantity.unwrap_or(0), txn.unit_price.unwrap_or(0));

        let before = PositionTotals::of(&investment);
        let after = before.after_dividend_reversal(gross);
        step(
            "update dividend aggregate",
            self.investments.update_totals(&investment.id, &after),
        )?;
        {
            let repo = Arc::clone(&self.investments);
            let inv_id = investment.id.clone();
            saga.register("update dividend aggregate", move || {
                repo.update_totals(&inv_id, &before)
                    .map(|_| ())
                    .map_err(Into::into)
            });
        }

        step(
            "debit wallet",
            self.wallets
                .apply_wallet_delta(&txn.wallet_id, -txn.amount, DeltaReason::Dividend),
        )?;
        {
            let wallets = Arc::clone(&self.wallets);
            let wallet_id = txn.wallet_id.clone();
            let amount = txn.amount;
            saga.register("debit wallet", move || {
                wallets
                    .apply_wallet_delta(&wallet_id, amount, DeltaReason::Dividend)
                    .map(|_| ())
                    .map_err(Into::into)
            });
        }

        step("delete transaction", self.transactions.delete(&txn.id))?;

        Ok(investment_id)
    }

    fn try_cash(&self, saga: &mut Saga, op: CashOperation) -> StepResult<(Wallet, Transaction)> {
        let (signed_amount, reason) = match op.kind {
            TransactionKind::Income => (op.amount.abs(), DeltaReason::Income),
            TransactionKind::TransferIn => (op.amount.abs(), DeltaReason::TransferIn),
            TransactionKind::Expense => (-op.amount.abs(), DeltaReason::Expense),
            TransactionKind::TransferOut => (-op.amount.abs(), DeltaReason::TransferOut),
            TransactionKind::Adjustment => (op.amount, DeltaReason::Adjustment),
            other => {
                return Err((
                    "validate input",
                    CoordinatorError::InvalidOperation(format!(
                        "{} is not a cash operation",
                        other.as_str()
                    )),
                ))
            }
        };

        if signed_amount == 0 {
            return Err((
                "validate input",
                CoordinatorError::InvalidOperation("Amount must be non-zero".to_string()),
            ));
        }

        let wallet = step("load wallet", self.wallets.get_wallet(&op.wallet_id))?;

        let txn = step(
            "create transaction",
            self.transactions.create(NewTransaction {
                id: None,
                wallet_id: wallet.id.clone(),
                kind: op.kind,
                amount: signed_amount,
                currency: wallet.currency.clone(),
                category_id: op.category_id,
                investment_id: None,
                lot_id: None,
                quantity: None,
                unit_price: None,
                fees: None,
                transaction_date: op.date,
                note: op.note,
            }),
        )?;
        {
            let repo = Arc::clone(&self.transactions);
            let txn_id = txn.id.clone();
            saga.register("create transaction", move || {
                repo.delete(&txn_id).map_err(Into::into)
            });
        }

        let wallet = step(
            "apply wallet delta",
            self.wallets
                .apply_wallet_delta(&op.wallet_id, signed_amount, reason),
        )?;

        Ok((wallet, txn))
    }
}

fn validate_trade_inputs(
    quantity: i64,
    unit_price: i64,
    fees: i64,
) -> StepResult<()> {
    if quantity <= 0 {
        return Err((
            "validate input",
            CoordinatorError::InvalidOperation("Quantity must be positive".to_string()),
        ));
    }
    if unit_price < 0 || fees < 0 {
        return Err((
            "validate input",
            CoordinatorError::InvalidOperation(
                "Unit price and fees must be non-negative".to_string(),
            ),
        ));
    }
    Ok(())
}
