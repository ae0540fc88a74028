//! `LedgerService`: the single entry point for reading and mutating the ledger.
//!
//! The service owns its `LedgerStore` outright. Operations take `&mut self`,
//! so each one runs to completion before the next can begin; callers that
//! share a service across threads must serialize access themselves (the HTTP
//! adapter wraps it in a `Mutex`).
//!
//! Operations are split by concern across modules:
//! - `operations`: deposit, withdraw, transfer, statements
//! - `policy`: per-kind transfer rules (`transfer_with_policy`)
//! - `investment`: apply / redeem
//! - `dispenser`: cash-dispenser withdrawals

use tsbank_core::{AccountName, Amount, DomainResult};

use crate::store::{LedgerEntry, LedgerStore};
use crate::validation::require_known_account;

#[derive(Debug, Clone)]
pub struct LedgerService {
    pub(crate) store: LedgerStore,
}

impl LedgerService {
    pub fn new(store: LedgerStore) -> Self {
        Self { store }
    }

    /// Service over the default seed (`principal` = 1000, `destino` = 500).
    pub fn seeded() -> Self {
        Self::new(LedgerStore::seeded())
    }

    pub fn store(&self) -> &LedgerStore {
        &self.store
    }

    pub fn is_known_account(&self, name: &str) -> bool {
        self.store.contains(name)
    }

    pub fn account_names(&self) -> Vec<AccountName> {
        self.store.account_names().cloned().collect()
    }

    pub fn balance(&self, account: &str) -> DomainResult<Amount> {
        Ok(require_known_account(&self.store, account)?.balance())
    }

    pub fn statement(&self, account: &str) -> DomainResult<Vec<LedgerEntry>> {
        Ok(require_known_account(&self.store, account)?.entries().to_vec())
    }
}
