//! Guards shared by every mutating operation.
//!
//! All checks are pure: they read the store and never write to it, so a
//! failing guard leaves no trace.

use tsbank_core::{Amount, Decimal, DomainError, DomainResult, display_amount};

use crate::store::{Account, LedgerStore};

/// Fail with `NotFound` unless `name` is a known account.
pub fn require_known_account<'a>(store: &'a LedgerStore, name: &str) -> DomainResult<&'a Account> {
    store
        .account(name)
        .ok_or_else(|| DomainError::not_found(format!("account '{name}' not found")))
}

/// Fail with `InvalidArgument` unless `amount` is above zero.
pub fn require_positive_amount(amount: Amount) -> DomainResult<()> {
    if amount <= Decimal::ZERO {
        return Err(DomainError::invalid("amount must be positive"));
    }
    Ok(())
}

/// Fail with `InsufficientFunds` when `amount` exceeds the account balance.
pub fn require_funds(account: &Account, amount: Amount) -> DomainResult<()> {
    if amount > account.balance() {
        return Err(DomainError::insufficient_funds(format!(
            "insufficient balance: {} available, {} requested",
            display_amount(account.balance()),
            display_amount(amount)
        )));
    }
    Ok(())
}

/// Fail with `InvalidArgument` when crediting `amount` would overflow the
/// balance. Returns the balance after the credit.
pub fn require_credit_fits(account: &Account, amount: Amount) -> DomainResult<Amount> {
    account
        .balance()
        .checked_add(amount)
        .ok_or_else(|| DomainError::invalid("amount out of range"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use tsbank_core::ErrorKind;

    #[test]
    fn unknown_account_is_not_found() {
        let store = LedgerStore::seeded();
        let err = require_known_account(&store, "conta_inexistente").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(err.message().contains("not found"));
        assert!(require_known_account(&store, "principal").is_ok());
    }

    #[test]
    fn zero_and_negative_amounts_are_rejected() {
        for amount in [dec!(0), dec!(-50), dec!(-0.01)] {
            let err = require_positive_amount(amount).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidArgument);
            assert_eq!(err.message(), "amount must be positive");
        }
        assert!(require_positive_amount(dec!(0.01)).is_ok());
    }

    #[test]
    fn funds_check_allows_the_exact_balance() {
        let store = LedgerStore::seeded();
        let account = store.account("principal").unwrap();
        assert!(require_funds(account, dec!(1000)).is_ok());
        let err = require_funds(account, dec!(1000.01)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InsufficientFunds);
        assert!(err.message().starts_with("insufficient balance"));
    }

    #[test]
    fn credit_overflow_is_rejected() {
        let store = LedgerStore::seeded();
        let account = store.account("principal").unwrap();
        assert_eq!(require_credit_fits(account, dec!(0.5)), Ok(dec!(1000.5)));
        let err = require_credit_fits(account, Decimal::MAX).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }
}
