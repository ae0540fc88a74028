//! Line-oriented terminal client over an in-process `LedgerService`.
//!
//! - `prompt.rs`: reading answers and validating typed amounts
//! - `screens.rs`: screen states and menu choices
//! - `session.rs`: the login/menu loop that drives the ledger

pub mod prompt;
pub mod screens;
pub mod session;

pub use prompt::{AmountInputError, Prompt, parse_amount};
pub use screens::{InvestmentChoice, MenuChoice, Screen};
pub use session::Session;
