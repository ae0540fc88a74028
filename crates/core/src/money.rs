//! Monetary amounts.
//!
//! Amounts are exact decimals so that sums of cents never drift. JSON carries
//! them as plain numbers. Display always uses two decimals.

pub use rust_decimal::Decimal;

/// Monetary amount in the ledger's single currency.
pub type Amount = Decimal;

/// Render an amount the way receipts and screens show it (`R$ 300.00`).
pub fn display_amount(amount: Amount) -> String {
    format!("R$ {amount:.2}")
}
