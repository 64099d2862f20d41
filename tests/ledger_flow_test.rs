mod common;

use common::TestLedger;
use walletfolio_core::coordinator::{
    CashOperation, CoordinatorError, CreateInvestment, InvestmentOperation,
};
use walletfolio_core::transactions::TransactionKind;
use walletfolio_core::utils::fixed_point::QUANTITY_SCALE;
use walletfolio_core::wallets::{WalletError, WalletKind};

fn now() -> chrono::NaiveDateTime {
    chrono::Utc::now().naive_utc()
}

#[test]
fn full_investment_lifecycle_keeps_the_wallet_balance_consistent() {
    let ledger = TestLedger::new();
    let wallet = ledger.create_wallet("Gold savings", WalletKind::Investment);

    // Seed the wallet with income of 1,000,000 minor units.
    let (wallet_after, _) = ledger
        .coordinator
        .record_cash_transaction(CashOperation {
            wallet_id: wallet.id.clone(),
            kind: TransactionKind::Income,
            amount: 1_000_000,
            category_id: None,
            date: now(),
            note: Some("Salary".to_string()),
        })
        .unwrap();
    assert_eq!(wallet_after.balance, 1_000_000);

    // Opening buy: 3 units at 100,000 each, no fees -> spend 300,000.
    let (investment, buy_txn) = ledger
        .coordinator
        .create_investment(CreateInvestment {
            wallet_id: wallet.id.clone(),
            symbol: "SJC".to_string(),
            asset_kind: "GOLD".to_string(),
            unit: "TAEL".to_string(),
            quantity: 3 * QUANTITY_SCALE,
            unit_price: 100_000,
            fees: 0,
            date: now(),
            note: None,
        })
        .unwrap();
    assert_eq!(buy_txn.amount, -300_000);
    assert_eq!(investment.quantity, 3 * QUANTITY_SCALE);
    assert_eq!(investment.total_cost, 300_000);
    assert_eq!(ledger.wallets.get_wallet(&wallet.id).unwrap().balance, 700_000);

    // Follow-up buy: 2 units at 125,000 -> spend 250,000.
    let (investment, _) = ledger
        .coordinator
        .create_investment_transaction(InvestmentOperation {
            investment_id: investment.id.clone(),
            kind: TransactionKind::Buy,
            quantity: 2 * QUANTITY_SCALE,
            unit_price: 125_000,
            fees: 0,
            date: now(),
            note: None,
        })
        .unwrap();
    assert_eq!(investment.quantity, 5 * QUANTITY_SCALE);
    assert_eq!(investment.total_cost, 550_000);
    assert_eq!(investment.average_cost, 110_000.0);
    assert_eq!(ledger.wallets.get_wallet(&wallet.id).unwrap().balance, 450_000);

    // Sell 1 unit at 120,500 with 500 fees -> net +120,000. FIFO consumes
    // the oldest lot, so the basis is 100,000 and realized P&L is 20,000.
    let (investment, sell_txn) = ledger
        .coordinator
        .create_investment_transaction(InvestmentOperation {
            investment_id: investment.id.clone(),
            kind: TransactionKind::Sell,
            quantity: QUANTITY_SCALE,
            unit_price: 120_500,
            fees: 500,
            date: now(),
            note: None,
        })
        .unwrap();
    assert_eq!(sell_txn.amount, 120_000);
    assert_eq!(investment.quantity, 4 * QUANTITY_SCALE);
    assert_eq!(investment.total_cost, 450_000);
    assert_eq!(investment.realized_pnl, 20_000);
    assert_eq!(investment.average_cost, 112_500.0);
    assert_eq!(ledger.wallets.get_wallet(&wallet.id).unwrap().balance, 570_000);

    // Dividend of 2,500 per unit on the 4 held units -> +10,000.
    let (investment, dividend_txn) = ledger
        .coordinator
        .create_investment_transaction(InvestmentOperation {
            investment_id: investment.id.clone(),
            kind: TransactionKind::Dividend,
            quantity: 0,
            unit_price: 2_500,
            fees: 0,
            date: now(),
            note: None,
        })
        .unwrap();
    assert_eq!(dividend_txn.amount, 10_000);
    assert_eq!(dividend_txn.quantity, Some(4 * QUANTITY_SCALE));
    assert_eq!(investment.total_dividends, 10_000);
    assert_eq!(ledger.wallets.get_wallet(&wallet.id).unwrap().balance, 580_000);

    // An expense larger than the balance is refused and leaves no trace.
    let txn_count_before = ledger.transactions.list_by_wallet(&wallet.id).unwrap().len();
    let err = ledger
        .coordinator
        .record_cash_transaction(CashOperation {
            wallet_id: wallet.id.clone(),
            kind: TransactionKind::Expense,
            amount: 600_000,
            category_id: None,
            date: now(),
            note: None,
        })
        .unwrap_err();
    match err {
        CoordinatorError::Wallet(WalletError::InsufficientFunds {
            balance, requested, ..
        }) => {
            assert_eq!(balance, 580_000);
            assert_eq!(requested, -600_000);
        }
        other => panic!("expected InsufficientFunds, got {other:?}"),
    }
    assert_eq!(ledger.wallets.get_wallet(&wallet.id).unwrap().balance, 580_000);
    assert_eq!(
        ledger.transactions.list_by_wallet(&wallet.id).unwrap().len(),
        txn_count_before
    );
}

#[test]
fn buy_exceeding_the_balance_is_rejected_before_any_write() {
    let ledger = TestLedger::new();
    let wallet = ledger.create_wallet("Small wallet", WalletKind::Investment);

    ledger
        .coordinator
        .record_cash_transaction(CashOperation {
            wallet_id: wallet.id.clone(),
            kind: TransactionKind::Income,
            amount: 100_000,
            category_id: None,
            date: now(),
            note: None,
        })
        .unwrap();

    let err = ledger
        .coordinator
        .create_investment(CreateInvestment {
            wallet_id: wallet.id.clone(),
            symbol: "SJC".to_string(),
            asset_kind: "GOLD".to_string(),
            unit: "TAEL".to_string(),
            quantity: 2 * QUANTITY_SCALE,
            unit_price: 100_000,
            fees: 0,
            date: now(),
            note: None,
        })
        .unwrap_err();
    assert!(matches!(
        err,
        CoordinatorError::Wallet(WalletError::InsufficientFunds { .. })
    ));

    assert_eq!(ledger.wallets.get_wallet(&wallet.id).unwrap().balance, 100_000);
    assert!(ledger.investments.list_by_wallet(&wallet.id).unwrap().is_empty());
    // The income transaction is the only one on record.
    assert_eq!(ledger.transactions.list_by_wallet(&wallet.id).unwrap().len(), 1);
}

#[test]
fn selling_more_than_held_fails_without_state_change() {
    let ledger = TestLedger::new();
    let wallet = ledger.create_wallet("Oversell wallet", WalletKind::Investment);

    ledger
        .coordinator
        .record_cash_transaction(CashOperation {
            wallet_id: wallet.id.clone(),
            kind: TransactionKind::Income,
            amount: 500_000,
            category_id: None,
            date: now(),
            note: None,
        })
        .unwrap();

    let (investment, _) = ledger
        .coordinator
        .create_investment(CreateInvestment {
            wallet_id: wallet.id.clone(),
            symbol: "VNM".to_string(),
            asset_kind: "STOCK".to_string(),
            unit: "COUNT".to_string(),
            quantity: 3 * QUANTITY_SCALE,
            unit_price: 100_000,
            fees: 0,
            date: now(),
            note: None,
        })
        .unwrap();

    let err = ledger
        .coordinator
        .create_investment_transaction(InvestmentOperation {
            investment_id: investment.id.clone(),
            kind: TransactionKind::Sell,
            quantity: 5 * QUANTITY_SCALE,
            unit_price: 120_000,
            fees: 0,
            date: now(),
            note: None,
        })
        .unwrap_err();
    assert!(matches!(
        err,
        CoordinatorError::Investment(
            walletfolio_core::investments::InvestmentError::InsufficientQuantity { .. }
        )
    ));

    let investment = ledger.investments.get_by_id(&investment.id).unwrap();
    assert_eq!(investment.quantity, 3 * QUANTITY_SCALE);
    assert_eq!(
        ledger.investments.sum_lot_remaining(&investment.id).unwrap(),
        3 * QUANTITY_SCALE
    );
    assert_eq!(ledger.wallets.get_wallet(&wallet.id).unwrap().balance, 200_000);
}

#[test]
fn adjustments_may_go_negative_but_require_a_note() {
    let ledger = TestLedger::new();
    let wallet = ledger.create_wallet("Cash", WalletKind::General);

    // Without a justification note the adjustment is refused.
    let err = ledger
        .coordinator
        .record_cash_transaction(CashOperation {
            wallet_id: wallet.id.clone(),
            kind: TransactionKind::Adjustment,
            amount: -50_000,
            category_id: None,
            date: now(),
            note: None,
        })
        .unwrap_err();
    assert!(matches!(err, CoordinatorError::Ledger(_)));
    assert_eq!(ledger.wallets.get_wallet(&wallet.id).unwrap().balance, 0);

    // With a note, the balance may legitimately go negative.
    let (wallet_after, txn) = ledger
        .coordinator
        .record_cash_transaction(CashOperation {
            wallet_id: wallet.id.clone(),
            kind: TransactionKind::Adjustment,
            amount: -50_000,
            category_id: None,
            date: now(),
            note: Some("Bank statement correction".to_string()),
        })
        .unwrap();
    assert_eq!(wallet_after.balance, -50_000);
    assert_eq!(txn.amount, -50_000);

    // A plain expense can never take the balance below zero.
    let err = ledger
        .coordinator
        .record_cash_transaction(CashOperation {
            wallet_id: wallet.id.clone(),
            kind: TransactionKind::Expense,
            amount: 1,
            category_id: None,
            date: now(),
            note: None,
        })
        .unwrap_err();
    assert!(matches!(
        err,
        CoordinatorError::Wallet(WalletError::InsufficientFunds { .. })
    ));
}

#[test]
fn a_failure_at_the_wallet_step_unwinds_every_persisted_step() {
    let ledger = TestLedger::new();
    let wallet = ledger.create_wallet("Soft deleted", WalletKind::Investment);

    ledger
        .coordinator
        .record_cash_transaction(CashOperation {
            wallet_id: wallet.id.clone(),
            kind: TransactionKind::Income,
            amount: 500_000,
            category_id: None,
            date: now(),
            note: None,
        })
        .unwrap();

    let (investment, _) = ledger
        .coordinator
        .create_investment(CreateInvestment {
            wallet_id: wallet.id.clone(),
            symbol: "SJC".to_string(),
            asset_kind: "GOLD".to_string(),
            unit: "TAEL".to_string(),
            quantity: 2 * QUANTITY_SCALE,
            unit_price: 100_000,
            fees: 0,
            date: now(),
            note: None,
        })
        .unwrap();

    // Soft-deleting the wallet makes the final "credit wallet" step the
    // first one to fail; everything persisted before it must be undone.
    ledger.wallets.delete_wallet(&wallet.id).unwrap();

    let txn_count_before = ledger.transactions.list_by_wallet(&wallet.id).unwrap().len();
    let err = ledger
        .coordinator
        .create_investment_transaction(InvestmentOperation {
            investment_id: investment.id.clone(),
            kind: TransactionKind::Dividend,
            quantity: 0,
            unit_price: 1_000,
            fees: 0,
            date: now(),
            note: None,
        })
        .unwrap_err();
    assert!(matches!(err, CoordinatorError::Wallet(_)));

    let investment = ledger.investments.get_by_id(&investment.id).unwrap();
    assert_eq!(investment.total_dividends, 0);
    assert_eq!(
        ledger.transactions.list_by_wallet(&wallet.id).unwrap().len(),
        txn_count_before
    );
    assert_eq!(ledger.wallets.get_wallet(&wallet.id).unwrap().balance, 300_000);
}

#[test]
fn dividend_on_an_empty_position_is_rejected() {
    let ledger = TestLedger::new();
    let wallet = ledger.create_wallet("Empty position", WalletKind::Investment);

    ledger
        .coordinator
        .record_cash_transaction(CashOperation {
            wallet_id: wallet.id.clone(),
            kind: TransactionKind::Income,
            amount: 500_000,
            category_id: None,
            date: now(),
            note: None,
        })
        .unwrap();

    let (investment, _) = ledger
        .coordinator
        .create_investment(CreateInvestment {
            wallet_id: wallet.id.clone(),
            symbol: "VNM".to_string(),
            asset_kind: "STOCK".to_string(),
            unit: "COUNT".to_string(),
            quantity: QUANTITY_SCALE,
            unit_price: 100_000,
            fees: 0,
            date: now(),
            note: None,
        })
        .unwrap();

    // Sell everything, then the position holds nothing to pay on.
    ledger
        .coordinator
        .create_investment_transaction(InvestmentOperation {
            investment_id: investment.id.clone(),
            kind: TransactionKind::Sell,
            quantity: QUANTITY_SCALE,
            unit_price: 100_000,
            fees: 0,
            date: now(),
            note: None,
        })
        .unwrap();

    let err = ledger
        .coordinator
        .create_investment_transaction(InvestmentOperation {
            investment_id: investment.id.clone(),
            kind: TransactionKind::Dividend,
            quantity: 0,
            unit_price: 1_000,
            fees: 0,
            date: now(),
            note: None,
        })
        .unwrap_err();
    assert!(matches!(err, CoordinatorError::InvalidOperation(_)));

    // An income kind routed through the investment path is refused too.
    let err = ledger
        .coordinator
        .create_investment_transaction(InvestmentOperation {
            investment_id: investment.id.clone(),
            kind: TransactionKind::Income,
            quantity: 0,
            unit_price: 0,
            fees: 0,
            date: now(),
            note: None,
        })
        .unwrap_err();
    assert!(matches!(err, CoordinatorError::InvalidOperation(_)));
}
