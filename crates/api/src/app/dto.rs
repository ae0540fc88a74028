use serde::Deserialize;
use serde_json::{Value, json};

use tsbank_core::{AccountName, Amount, DomainResult};
use tsbank_ledger::{
    DispenserKind, InvestmentKind, InvestmentPosition, InvestmentReceipt, LedgerEntry, Redemption,
    TransferKind, TransferReceipt,
};

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct AccountQuery {
    pub account: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AmountRequest {
    pub amount: Amount,
    pub account: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TransferRequest {
    pub amount: Amount,
    pub dest_account: String,
    pub kind: TransferKind,
    pub source_account: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ApplyInvestmentRequest {
    pub amount: Amount,
    pub kind: InvestmentKind,
    pub account: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RedeemInvestmentRequest {
    pub kind: InvestmentKind,
    pub account: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DispenserWithdrawRequest {
    pub amount: Amount,
    pub dispenser_kind: DispenserKind,
    pub account: Option<String>,
}

/// An omitted account means the default one; a blank one is rejected.
pub fn resolve_account(account: Option<String>) -> DomainResult<AccountName> {
    match account {
        Some(name) => name.parse(),
        None => Ok(AccountName::default()),
    }
}

// -------------------------
// Response mapping
// -------------------------

pub fn statement_to_json(entries: Vec<LedgerEntry>) -> Value {
    json!({ "entries": entries })
}

pub fn transfer_to_json(kind: TransferKind, receipt: &TransferReceipt) -> Value {
    json!({
        "message": format!(
            "Transferred {} to {}",
            tsbank_core::display_amount(receipt.amount),
            receipt.to
        ),
        "kind": kind,
        "amount": receipt.amount,
        "source": receipt.from,
        "destination": receipt.to,
        "source_balance": receipt.source_balance,
        "destination_balance": receipt.destination_balance,
    })
}

pub fn investment_receipt_to_json(receipt: &InvestmentReceipt) -> Value {
    json!({
        "message": format!("Applied in {}", receipt.kind),
        "principal": receipt.principal,
        "opened_at": receipt.opened_at,
    })
}

pub fn redemption_to_json(redemption: &Redemption) -> Value {
    json!({
        "message": format!(
            "Redeemed {} from {}",
            tsbank_core::display_amount(redemption.total),
            redemption.kind
        ),
        "total": redemption.total,
        "yield": redemption.yield_amount,
        "days": redemption.days,
    })
}

pub fn positions_to_json(positions: Vec<InvestmentPosition>) -> Value {
    json!({ "items": positions })
}
