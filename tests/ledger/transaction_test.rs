// Transaction and TransactionBuilder tests

use cityledger::ledger::{Transaction, TransactionBuildError, TransactionBuilder, MINIMUM_FEE};

#[test]
fn test_new_transaction_defaults_to_minimum_fee() {
    let tx = Transaction::new("t1", "alice", "bob", 50);

    assert_eq!(tx.id(), "t1");
    assert_eq!(tx.payer(), "alice");
    assert_eq!(tx.receiver(), "bob");
    assert_eq!(tx.amount(), 50);
    assert_eq!(tx.fee(), MINIMUM_FEE);
    assert_eq!(tx.memo(), None);
}

#[test]
fn test_setters_override_fee_and_memo() {
    let tx = Transaction::new("t1", "alice", "bob", 50)
        .with_fee(25)
        .with_memo("parking");

    assert_eq!(tx.fee(), 25);
    assert_eq!(tx.memo(), Some("parking"));
}

#[test]
fn test_display_includes_fee_and_memo() {
    let tx = Transaction::new("t1", "alice", "bob", 50).with_memo("bus fare");
    assert_eq!(
        tx.to_string(),
        "transaction t1: 50 from alice to bob, fee 10, memo bus fare"
    );
}

#[test]
fn test_display_omits_zero_fee() {
    let tx = Transaction::new("t1", "alice", "bob", 50).with_fee(0);
    assert_eq!(tx.to_string(), "transaction t1: 50 from alice to bob");
}

#[test]
fn test_builder_with_all_fields() {
    let tx = TransactionBuilder::new()
        .id("t9")
        .payer("master")
        .receiver("kiosk")
        .amount(100)
        .fee(12)
        .memo("initial funding")
        .build()
        .unwrap();

    assert_eq!(tx.id(), "t9");
    assert_eq!(tx.fee(), 12);
    assert_eq!(tx.memo(), Some("initial funding"));
}

#[test]
fn test_builder_defaults_fee() {
    let tx = TransactionBuilder::new()
        .id("t1")
        .payer("a")
        .receiver("b")
        .amount(1)
        .build()
        .unwrap();

    assert_eq!(tx.fee(), MINIMUM_FEE);
}

#[test]
fn test_builder_missing_fields() {
    let result = TransactionBuilder::new().payer("a").receiver("b").amount(1).build();
    assert_eq!(result.unwrap_err(), TransactionBuildError::MissingId);

    let result = TransactionBuilder::new().id("t").receiver("b").amount(1).build();
    assert_eq!(result.unwrap_err(), TransactionBuildError::MissingPayer);

    let result = TransactionBuilder::new().id("t").payer("a").amount(1).build();
    assert_eq!(result.unwrap_err(), TransactionBuildError::MissingReceiver);

    let result = TransactionBuilder::new().id("t").payer("a").receiver("b").build();
    assert_eq!(result.unwrap_err(), TransactionBuildError::MissingAmount);
}
