mod common;

use std::sync::Arc;
use std::thread;

use common::TestLedger;
use walletfolio_core::wallets::{DeltaReason, WalletKind};

const THREADS: i64 = 8;
const DELTAS_PER_THREAD: i64 = 25;

#[test]
fn concurrent_deltas_on_one_wallet_never_lose_an_update() {
    let ledger = TestLedger::new();
    let wallet = ledger.create_wallet("Contended", WalletKind::General);

    let mut handles = Vec::new();
    for _ in 0..THREADS {
        let wallets = Arc::clone(&ledger.wallets);
        let wallet_id = wallet.id.clone();
        handles.push(thread::spawn(move || {
            for _ in 0..DELTAS_PER_THREAD {
                wallets
                    .apply_wallet_delta(&wallet_id, 1_000, DeltaReason::Income)
                    .unwrap();
            }
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }

    let final_wallet = ledger.wallets.get_wallet(&wallet.id).unwrap();
    assert_eq!(final_wallet.balance, THREADS * DELTAS_PER_THREAD * 1_000);
    // Every delta bumped the version exactly once: no lost updates.
    assert_eq!(final_wallet.version, THREADS * DELTAS_PER_THREAD);
}

#[test]
fn independent_wallets_make_progress_under_mixed_contention() {
    let ledger = TestLedger::new();
    let first = ledger.create_wallet("First", WalletKind::General);
    let second = ledger.create_wallet("Second", WalletKind::General);

    // Seed the debited wallet far enough above zero that no interleaving of
    // the debits below can reject one.
    ledger
        .wallets
        .apply_wallet_delta(&second.id, 500_000, DeltaReason::Income)
        .unwrap();

    let mut handles = Vec::new();
    for i in 0..THREADS {
        let wallets = Arc::clone(&ledger.wallets);
        let first_id = first.id.clone();
        let second_id = second.id.clone();
        handles.push(thread::spawn(move || {
            for _ in 0..DELTAS_PER_THREAD {
                if i % 2 == 0 {
                    wallets
                        .apply_wallet_delta(&first_id, 700, DeltaReason::Income)
                        .unwrap();
                } else {
                    wallets
                        .apply_wallet_delta(&second_id, -300, DeltaReason::Expense)
                        .unwrap();
                }
            }
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }

    let crediting_threads = THREADS / 2;
    let debiting_threads = THREADS - crediting_threads;
    assert_eq!(
        ledger.wallets.get_wallet(&first.id).unwrap().balance,
        crediting_threads * DELTAS_PER_THREAD * 700
    );
    assert_eq!(
        ledger.wallets.get_wallet(&second.id).unwrap().balance,
        500_000 - debiting_threads * DELTAS_PER_THREAD * 300
    );
}
