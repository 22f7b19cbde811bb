// SharedLedger tests - concurrent submitters against one ledger

use cityledger::ledger::{Ledger, LedgerConfig, LedgerError, SharedLedger, Transaction};
use std::collections::HashSet;
use std::thread;

fn shared_city(config: LedgerConfig, accounts: &[&str]) -> SharedLedger {
    let mut ledger = Ledger::with_config("city", "s1", config).unwrap();
    for address in accounts {
        ledger.create_account(*address).unwrap();
    }
    SharedLedger::new(ledger)
}

#[test]
fn test_transaction_ids_are_unique_across_threads() {
    let shared = shared_city(LedgerConfig::default(), &[]);

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let shared = shared.clone();
            thread::spawn(move || (0..100).map(|_| shared.next_transaction_id()).collect::<Vec<_>>())
        })
        .collect();

    let mut ids = HashSet::new();
    for handle in handles {
        for id in handle.join().unwrap() {
            assert!(ids.insert(id));
        }
    }
    assert_eq!(ids.len(), 800);
    assert!(ids.contains("tx-1"));
    assert!(ids.contains("tx-800"));
}

#[test]
fn test_concurrent_transactions_commit_cleanly() {
    let shared = shared_city(LedgerConfig::default(), &["alice", "bob", "carol", "dave"]);
    let receivers = ["alice", "bob", "carol", "dave"];

    let handles: Vec<_> = receivers
        .iter()
        .map(|receiver| {
            let shared = shared.clone();
            let receiver = receiver.to_string();
            thread::spawn(move || {
                for _ in 0..25 {
                    let id = shared.next_transaction_id();
                    shared
                        .process_transaction(Transaction::new(id, "master", receiver.clone(), 20))
                        .unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    // one transaction per block: every transaction produced exactly one block
    let committed = shared.with_ledger(|ledger| ledger.committed_count());
    assert_eq!(committed, 100);

    let balances = shared.account_balances().unwrap();
    for receiver in receivers {
        assert_eq!(balances[receiver], 500);
    }
    let supply: i128 = balances.values().map(|b| i128::from(*b)).sum();
    assert_eq!(supply, i128::from(i64::MAX));

    assert!(shared.validate().is_ok());
}

#[test]
fn test_concurrent_duplicate_ids_accept_exactly_one() {
    let shared = shared_city(LedgerConfig::default(), &["alice"]);

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let shared = shared.clone();
            thread::spawn(move || {
                shared.process_transaction(Transaction::new("same", "master", "alice", 100))
            })
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    let accepted = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(accepted, 1);
    assert!(results
        .iter()
        .filter_map(|r| r.as_ref().err())
        .all(|e| matches!(e, LedgerError::DuplicateTransactionId { .. })));

    assert_eq!(shared.account_balance("alice").unwrap(), 100);
}

#[test]
fn test_handle_queries_return_copies() {
    let shared = shared_city(LedgerConfig::default(), &["alice"]);
    shared.create_account("bob").unwrap();
    shared
        .process_transaction(Transaction::new("t1", "master", "bob", 70))
        .unwrap();

    let tx = shared.transaction("t1").unwrap();
    assert_eq!(tx.receiver(), "bob");

    let block = shared.block(1).unwrap();
    assert_eq!(block.account_balance("bob").unwrap(), 70);
    assert!(shared.block(2).is_err());
    assert!(matches!(
        shared.create_account("bob"),
        Err(LedgerError::DuplicateAccount { .. })
    ));
}
