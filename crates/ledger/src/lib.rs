//! Ledger module: accounts, audit statements, transfers, investments and
//! cash-dispenser withdrawals.
//!
//! Pure domain logic only: no IO, no HTTP, no clock reads. Every operation
//! takes the current instant as an argument when a rule depends on it.

pub mod dispenser;
pub mod investment;
pub mod operations;
pub mod policy;
pub mod service;
pub mod store;
pub mod validation;

pub use dispenser::DispenserKind;
pub use investment::{InvestmentKind, InvestmentPosition, InvestmentReceipt, Redemption};
pub use operations::TransferReceipt;
pub use policy::{TimeWindow, TransferKind, TransferRule};
pub use service::LedgerService;
pub use store::{Account, InvestmentSlot, LedgerEntry, LedgerStore};
