//! Account operations: deposit, withdraw, transfer, clear statement.
//!
//! Each operation validates everything it needs up front and only then
//! touches the store, so a rejected call leaves balances and statements as
//! they were.

use serde::Serialize;

use tsbank_core::{AccountName, Amount, DomainError, DomainResult, ValueObject};

use crate::service::LedgerService;
use crate::store::LedgerEntry;
use crate::validation::{require_credit_fits, require_funds, require_known_account, require_positive_amount};

pub(crate) const DEPOSIT_TAG: &str = "deposito";
pub(crate) const WITHDRAW_TAG: &str = "saque";

/// Outcome of a successful transfer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransferReceipt {
    pub amount: Amount,
    pub from: AccountName,
    pub to: AccountName,
    pub source_balance: Amount,
    pub destination_balance: Amount,
}

impl ValueObject for TransferReceipt {}

impl LedgerService {
    /// Credit `amount` to `account`; returns the new balance.
    pub fn deposit(&mut self, amount: Amount, account: &str) -> DomainResult<Amount> {
        let target = require_known_account(&self.store, account).inspect_err(log_rejection("deposit"))?;
        require_positive_amount(amount).inspect_err(log_rejection("deposit"))?;
        require_credit_fits(target, amount).inspect_err(log_rejection("deposit"))?;

        let balance = self.post(account, amount, LedgerEntry::new(DEPOSIT_TAG, amount))?;
        tracing::debug!(account, %amount, %balance, "deposit posted");
        Ok(balance)
    }

    /// Debit `amount` from `account`; returns the new balance.
    pub fn withdraw(&mut self, amount: Amount, account: &str) -> DomainResult<Amount> {
        let source = require_known_account(&self.store, account).inspect_err(log_rejection("withdraw"))?;
        require_positive_amount(amount).inspect_err(log_rejection("withdraw"))?;
        require_funds(source, amount).inspect_err(log_rejection("withdraw"))?;

        let balance = self.post(account, -amount, LedgerEntry::new(WITHDRAW_TAG, amount))?;
        tracing::debug!(account, %amount, %balance, "withdrawal posted");
        Ok(balance)
    }

    /// Move `amount` from `from` to `to` as one unit: both legs are posted or
    /// neither is.
    pub fn transfer(&mut self, amount: Amount, from: &str, to: &str) -> DomainResult<TransferReceipt> {
        let source = require_known_account(&self.store, from).inspect_err(log_rejection("transfer"))?;
        let destination = require_known_account(&self.store, to).inspect_err(log_rejection("transfer"))?;
        require_positive_amount(amount).inspect_err(log_rejection("transfer"))?;
        if from == to {
            let err = DomainError::invalid("cannot transfer to the same account");
            log_rejection("transfer")(&err);
            return Err(err);
        }
        require_funds(source, amount).inspect_err(log_rejection("transfer"))?;
        require_credit_fits(destination, amount).inspect_err(log_rejection("transfer"))?;

        let source_balance = self.post(
            from,
            -amount,
            LedgerEntry::new(format!("transferencia para {to}"), amount),
        )?;
        let destination_balance = self.post(
            to,
            amount,
            LedgerEntry::new(format!("transferencia de {from}"), amount),
        )?;

        tracing::debug!(
            from,
            to,
            %amount,
            %source_balance,
            %destination_balance,
            "transfer posted"
        );
        Ok(TransferReceipt {
            amount,
            from: AccountName::new(from),
            to: AccountName::new(to),
            source_balance,
            destination_balance,
        })
    }

    /// Replace the account's statement with an empty one. Balances are kept.
    pub fn clear_statement(&mut self, account: &str) -> DomainResult<()> {
        require_known_account(&self.store, account).inspect_err(log_rejection("clear_statement"))?;
        if let Some(target) = self.store.account_mut(account) {
            target.clear_entries();
        }
        tracing::debug!(account, "statement cleared");
        Ok(())
    }

    /// Post a balance change and its audit entry on an account that has
    /// already been validated.
    pub(crate) fn post(&mut self, account: &str, delta: Amount, entry: LedgerEntry) -> DomainResult<Amount> {
        self.store
            .account_mut(account)
            .map(|target| target.post(delta, entry))
            .ok_or_else(|| DomainError::not_found(format!("account '{account}' not found")))
    }
}

/// Debug-level trace for a rejected call; rejections are expected traffic.
pub(crate) fn log_rejection(operation: &'static str) -> impl Fn(&DomainError) {
    move |err| tracing::debug!(operation, kind = err.kind().as_str(), reason = err.message(), "rejected")
}
