// Account tests

use cityledger::ledger::Account;

#[test]
fn test_new_account_has_zero_balance() {
    let account = Account::new("alice");

    assert_eq!(account.address(), "alice");
    assert_eq!(account.balance(), 0);
}

#[test]
fn test_add_to_balance_accepts_signed_deltas() {
    let mut account = Account::new("alice").with_balance(100);

    account.add_to_balance(50);
    assert_eq!(account.balance(), 150);

    account.add_to_balance(-70);
    assert_eq!(account.balance(), 80);
}

#[test]
fn test_clone_is_independent() {
    let original = Account::new("alice").with_balance(100);
    let mut copy = original.clone();

    copy.add_to_balance(25);

    assert_eq!(original.balance(), 100);
    assert_eq!(copy.balance(), 125);
    assert_eq!(copy.address(), original.address());
}

#[test]
fn test_display_shows_address_and_balance() {
    let account = Account::new("bob").with_balance(42);
    assert_eq!(account.to_string(), "bob: 42");
}
