//! Ledger Store: balances, audit statements and investment slots.
//!
//! Storage and retrieval only. Business rules live in the operation modules;
//! the store just guarantees that a balance change and its audit entry are
//! recorded together.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use rust_decimal_macros::dec;
use tsbank_core::{AccountName, Amount, Decimal, Entity, ValueObject};

use crate::investment::InvestmentKind;

/// One line of an account statement (immutable).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Free-form operation tag, e.g. `deposito` or `transferencia para destino`.
    #[serde(rename = "op")]
    pub operation: String,
    pub amount: Amount,
}

impl LedgerEntry {
    pub fn new(operation: impl Into<String>, amount: Amount) -> Self {
        Self {
            operation: operation.into(),
            amount,
        }
    }
}

impl ValueObject for LedgerEntry {}

/// Account: balance + ordered, append-only statement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Account {
    name: AccountName,
    balance: Amount,
    entries: Vec<LedgerEntry>,
}

impl Account {
    pub fn new(name: AccountName, balance: Amount) -> Self {
        Self {
            name,
            balance,
            entries: Vec::new(),
        }
    }

    pub fn name(&self) -> &AccountName {
        &self.name
    }

    pub fn balance(&self) -> Amount {
        self.balance
    }

    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    /// Apply a signed balance change together with its audit entry. Callers
    /// check funds and `require_credit_fits` first.
    pub(crate) fn post(&mut self, delta: Amount, entry: LedgerEntry) -> Amount {
        self.balance += delta;
        self.entries.push(entry);
        self.balance
    }

    pub(crate) fn clear_entries(&mut self) {
        self.entries = Vec::new();
    }
}

impl Entity for Account {
    type Id = AccountName;

    fn id(&self) -> &Self::Id {
        &self.name
    }
}

/// Open position for one investment kind.
///
/// Only one position per kind is representable: later applications add to
/// the principal and replace `opened_at`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvestmentSlot {
    pub principal: Amount,
    pub rate: Decimal,
    pub opened_at: Option<NaiveDateTime>,
}

impl InvestmentSlot {
    fn closed(kind: InvestmentKind) -> Self {
        Self {
            principal: Decimal::ZERO,
            rate: kind.rate(),
            opened_at: None,
        }
    }
}

/// In-memory ledger state, owned by `LedgerService`.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerStore {
    accounts: BTreeMap<AccountName, Account>,
    investments: [InvestmentSlot; InvestmentKind::ALL.len()],
}

impl LedgerStore {
    /// Store with no accounts and every investment slot closed.
    pub fn empty() -> Self {
        Self {
            accounts: BTreeMap::new(),
            investments: InvestmentKind::ALL.map(InvestmentSlot::closed),
        }
    }

    /// Store seeded with `principal` (1000) and `destino` (500).
    pub fn seeded() -> Self {
        Self::with_accounts([
            (AccountName::new("principal"), dec!(1000)),
            (AccountName::new("destino"), dec!(500)),
        ])
    }

    /// Store seeded with the given opening balances. A repeated name keeps
    /// the last balance.
    pub fn with_accounts(seed: impl IntoIterator<Item = (AccountName, Amount)>) -> Self {
        let mut store = Self::empty();
        for (name, balance) in seed {
            let account = Account::new(name, balance);
            store.accounts.insert(account.id().clone(), account);
        }
        store
    }

    pub fn contains(&self, name: &str) -> bool {
        self.accounts.contains_key(name)
    }

    pub fn account(&self, name: &str) -> Option<&Account> {
        self.accounts.get(name)
    }

    pub(crate) fn account_mut(&mut self, name: &str) -> Option<&mut Account> {
        self.accounts.get_mut(name)
    }

    /// Account names in sorted order.
    pub fn account_names(&self) -> impl Iterator<Item = &AccountName> {
        self.accounts.keys()
    }

    pub fn investment(&self, kind: InvestmentKind) -> &InvestmentSlot {
        &self.investments[kind.index()]
    }

    pub(crate) fn investment_mut(&mut self, kind: InvestmentKind) -> &mut InvestmentSlot {
        &mut self.investments[kind.index()]
    }

    /// Every slot, in `InvestmentKind::ALL` order.
    pub fn investments(&self) -> impl Iterator<Item = (InvestmentKind, &InvestmentSlot)> {
        InvestmentKind::ALL.into_iter().zip(self.investments.iter())
    }
}

impl Default for LedgerStore {
    fn default() -> Self {
        Self::empty()
    }
}
