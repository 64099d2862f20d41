mod common;

use common::TestLedger;
use walletfolio_core::coordinator::{
    CashOperation, CoordinatorError, CreateInvestment, InvestmentOperation,
};
use walletfolio_core::investments::{Investment, InvestmentError};
use walletfolio_core::transactions::TransactionKind;
use walletfolio_core::utils::fixed_point::QUANTITY_SCALE;
use walletfolio_core::wallets::WalletKind;

fn now() -> chrono::NaiveDateTime {
    chrono::Utc::now().naive_utc()
}

/// Seeds a funded wallet holding 3 units at 100,000 plus 2 units at 125,000.
fn seeded_position(ledger: &TestLedger) -> (String, Investment) {
    let wallet = ledger.create_wallet("Reversals", WalletKind::Investment);
    ledger
        .coordinator
        .record_cash_transaction(CashOperation {
            wallet_id: wallet.id.clone(),
            kind: TransactionKind::Income,
            amount: 1_000_000,
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
            quantity: 3 * QUANTITY_SCALE,
            unit_price: 100_000,
            fees: 0,
            date: now(),
            note: None,
        })
        .unwrap();
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

    (wallet.id, investment)
}

fn assert_totals_match(a: &Investment, b: &Investment) {
    assert_eq!(a.quantity, b.quantity);
    assert_eq!(a.total_cost, b.total_cost);
    assert_eq!(a.realized_pnl, b.realized_pnl);
    assert_eq!(a.total_dividends, b.total_dividends);
    // Bit-for-bit, since the average is always re-derived from the integers.
    assert_eq!(a.average_cost.to_bits(), b.average_cost.to_bits());
}

#[test]
fn reversing_a_buy_restores_wallet_and_position_exactly() {
    let ledger = TestLedger::new();
    let (wallet_id, investment) = seeded_position(&ledger);

    let balance_before = ledger.wallets.get_wallet(&wallet_id).unwrap().balance;
    let lots_before = ledger.investments.list_lots(&investment.id).unwrap().len();

    let (after_buy, buy_txn) = ledger
        .coordinator
        .create_investment_transaction(InvestmentOperation {
            investment_id: investment.id.clone(),
            kind: TransactionKind::Buy,
            quantity: QUANTITY_SCALE,
            unit_price: 130_000,
            fees: 1_000,
            date: now(),
            note: None,
        })
        .unwrap();
    assert_eq!(after_buy.quantity, investment.quantity + QUANTITY_SCALE);

    let restored = ledger
        .coordinator
        .reverse_investment_transaction(&buy_txn.id)
        .unwrap();

    assert_totals_match(&restored, &investment);
    assert_eq!(
        ledger.wallets.get_wallet(&wallet_id).unwrap().balance,
        balance_before
    );
    assert_eq!(
        ledger.investments.list_lots(&investment.id).unwrap().len(),
        lots_before
    );
    assert!(ledger.transactions.get_by_id(&buy_txn.id).is_err());
}

#[test]
fn reversing_a_sell_restores_lots_totals_and_balance() {
    let ledger = TestLedger::new();
    let (wallet_id, investment) = seeded_position(&ledger);

    let balance_before = ledger.wallets.get_wallet(&wallet_id).unwrap().balance;
    let lots_before = ledger.investments.list_lots(&investment.id).unwrap();

    // Sell 4 units: drains the first lot entirely and part of the second.
    let (_, sell_txn) = ledger
        .coordinator
        .create_investment_transaction(InvestmentOperation {
            investment_id: investment.id.clone(),
            kind: TransactionKind::Sell,
            quantity: 4 * QUANTITY_SCALE,
            unit_price: 150_000,
            fees: 2_000,
            date: now(),
            note: None,
        })
        .unwrap();
    assert_eq!(
        ledger
            .investments
            .list_consumptions_by_transaction(&sell_txn.id)
            .unwrap()
            .len(),
        2
    );

    let restored = ledger
        .coordinator
        .reverse_investment_transaction(&sell_txn.id)
        .unwrap();

    assert_totals_match(&restored, &investment);
    assert_eq!(
        ledger.wallets.get_wallet(&wallet_id).unwrap().balance,
        balance_before
    );

    let lots_after = ledger.investments.list_lots(&investment.id).unwrap();
    assert_eq!(lots_after.len(), lots_before.len());
    for (before, after) in lots_before.iter().zip(lots_after.iter()) {
        assert_eq!(before.id, after.id);
        assert_eq!(before.remaining_quantity, after.remaining_quantity);
    }

    assert!(ledger
        .investments
        .list_consumptions_by_transaction(&sell_txn.id)
        .unwrap()
        .is_empty());
    assert!(ledger.transactions.get_by_id(&sell_txn.id).is_err());
}

#[test]
fn reversing_a_dividend_restores_the_aggregate_and_balance() {
    let ledger = TestLedger::new();
    let (wallet_id, investment) = seeded_position(&ledger);

    let balance_before = ledger.wallets.get_wallet(&wallet_id).unwrap().balance;

    let (credited, dividend_txn) = ledger
        .coordinator
        .create_investment_transaction(InvestmentOperation {
            investment_id: investment.id.clone(),
            kind: TransactionKind::Dividend,
            quantity: 0,
            unit_price: 2_000,
            fees: 500,
            date: now(),
            note: None,
        })
        .unwrap();
    assert_eq!(credited.total_dividends, 10_000);
    assert_eq!(dividend_txn.amount, 9_500);

    let restored = ledger
        .coordinator
        .reverse_investment_transaction(&dividend_txn.id)
        .unwrap();

    assert_totals_match(&restored, &investment);
    assert_eq!(
        ledger.wallets.get_wallet(&wallet_id).unwrap().balance,
        balance_before
    );
    assert!(ledger.transactions.get_by_id(&dividend_txn.id).is_err());
}

#[test]
fn a_buy_whose_lot_was_partially_sold_cannot_be_reversed() {
    let ledger = TestLedger::new();
    let (_, investment) = seeded_position(&ledger);

    let opening_buy = ledger
        .transactions
        .list_by_investment(&investment.id)
        .unwrap()
        .into_iter()
        .find(|t| t.kind == TransactionKind::Buy && t.unit_price == Some(100_000))
        .unwrap();

    // Consume part of the opening lot.
    ledger
        .coordinator
        .create_investment_transaction(InvestmentOperation {
            investment_id: investment.id.clone(),
            kind: TransactionKind::Sell,
            quantity: QUANTITY_SCALE,
            unit_price: 110_000,
            fees: 0,
            date: now(),
            note: None,
        })
        .unwrap();

    let err = ledger
        .coordinator
        .reverse_investment_transaction(&opening_buy.id)
        .unwrap_err();
    assert!(matches!(
        err,
        CoordinatorError::Investment(InvestmentError::LotInUse(_))
    ));

    // The failed reversal left everything in place.
    assert!(ledger.transactions.get_by_id(&opening_buy.id).is_ok());
    let investment = ledger.investments.get_by_id(&investment.id).unwrap();
    assert_eq!(
        ledger.investments.sum_lot_remaining(&investment.id).unwrap(),
        investment.quantity
    );
}

#[test]
fn cash_transactions_do_not_reverse_through_the_investment_path() {
    let ledger = TestLedger::new();
    let wallet = ledger.create_wallet("Cash only", WalletKind::General);

    let (_, income) = ledger
        .coordinator
        .record_cash_transaction(CashOperation {
            wallet_id: wallet.id.clone(),
            kind: TransactionKind::Income,
            amount: 10_000,
            category_id: None,
            date: now(),
            note: None,
        })
        .unwrap();

    let err = ledger
        .coordinator
        .reverse_investment_transaction(&income.id)
        .unwrap_err();
    assert!(matches!(err, CoordinatorError::InvalidOperation(_)));
    assert_eq!(ledger.wallets.get_wallet(&wallet.id).unwrap().balance, 10_000);
}
