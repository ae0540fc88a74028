//! Investment Engine: apply principal to an instrument, accrue yield by kind,
//! redeem to cash.

use core::str::FromStr;

use chrono::NaiveDateTime;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use tsbank_core::{Amount, Decimal, DomainError, DomainResult, ValueObject};

use crate::operations::log_rejection;
use crate::service::LedgerService;
use crate::store::LedgerEntry;
use crate::validation::{require_credit_fits, require_funds, require_known_account, require_positive_amount};

/// Fixed-term instrument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InvestmentKind {
    Cdb,
    Poupanca,
    TesouroDireto,
}

impl InvestmentKind {
    pub const ALL: [InvestmentKind; 3] = [
        InvestmentKind::Cdb,
        InvestmentKind::Poupanca,
        InvestmentKind::TesouroDireto,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            InvestmentKind::Cdb => "CDB",
            InvestmentKind::Poupanca => "POUPANCA",
            InvestmentKind::TesouroDireto => "TESOURO_DIRETO",
        }
    }

    /// Rate per compounding period (see `accrued_yield`).
    pub fn rate(self) -> Decimal {
        match self {
            InvestmentKind::Cdb => dec!(0.015),
            InvestmentKind::Poupanca => dec!(0.005),
            InvestmentKind::TesouroDireto => dec!(0.01),
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            InvestmentKind::Cdb => 0,
            InvestmentKind::Poupanca => 1,
            InvestmentKind::TesouroDireto => 2,
        }
    }
}

impl core::fmt::Display for InvestmentKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InvestmentKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        InvestmentKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DomainError::invalid(format!("invalid investment kind '{s}'")))
    }
}

/// Yield accrued on `principal` after `days` whole days.
///
/// - CDB compounds daily.
/// - POUPANCA accrues linearly per day.
/// - TESOURO_DIRETO compounds per 30-day period, with a fractional exponent.
///
/// The growth factor is computed in floating point and the result rounded to
/// cents. A yield too large for `Decimal` saturates at `Decimal::MAX`.
pub fn accrued_yield(kind: InvestmentKind, principal: Amount, rate: Decimal, days: i64) -> Amount {
    let principal = principal.to_f64().unwrap_or_default();
    let rate = rate.to_f64().unwrap_or_default();
    let days = days as f64;
    let accrued = match kind {
        InvestmentKind::Cdb => principal * ((1.0 + rate).powf(days) - 1.0),
        InvestmentKind::Poupanca => principal * rate * days,
        InvestmentKind::TesouroDireto => principal * ((1.0 + rate).powf(days / 30.0) - 1.0),
    };
    Decimal::from_f64(accrued)
        .map(|value| value.round_dp(2))
        .unwrap_or(Decimal::MAX)
}

/// Result of `apply_investment`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvestmentReceipt {
    pub kind: InvestmentKind,
    pub principal: Amount,
    pub opened_at: NaiveDateTime,
}

impl ValueObject for InvestmentReceipt {}

/// Result of `redeem_investment`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Redemption {
    pub kind: InvestmentKind,
    pub total: Amount,
    #[serde(rename = "yield")]
    pub yield_amount: Amount,
    pub days: i64,
}

impl ValueObject for Redemption {}

/// Snapshot of one investment slot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvestmentPosition {
    pub kind: InvestmentKind,
    pub principal: Amount,
    pub rate: Decimal,
    pub opened_at: Option<NaiveDateTime>,
}

impl LedgerService {
    /// Move `amount` from `account` into the `kind` slot, opened at
    /// `applied_at`. An already-open slot keeps growing and its opening time
    /// is replaced.
    pub fn apply_investment(
        &mut self,
        amount: Amount,
        kind: InvestmentKind,
        account: &str,
        applied_at: NaiveDateTime,
    ) -> DomainResult<InvestmentReceipt> {
        let source = require_known_account(&self.store, account).inspect_err(log_rejection("apply_investment"))?;
        require_positive_amount(amount).inspect_err(log_rejection("apply_investment"))?;
        require_funds(source, amount).inspect_err(log_rejection("apply_investment"))?;

        self.post(
            account,
            -amount,
            LedgerEntry::new(format!("aplicacao_{kind}"), amount),
        )?;

        let slot = self.store.investment_mut(kind);
        slot.principal = slot.principal.saturating_add(amount);
        slot.opened_at = Some(applied_at);
        let principal = slot.principal;

        tracing::debug!(kind = kind.as_str(), account, %amount, %principal, "investment applied");
        Ok(InvestmentReceipt {
            kind,
            principal,
            opened_at: applied_at,
        })
    }

    /// Close the `kind` slot at `redeemed_at` and credit principal plus
    /// yield to `account`.
    pub fn redeem_investment(
        &mut self,
        kind: InvestmentKind,
        account: &str,
        redeemed_at: NaiveDateTime,
    ) -> DomainResult<Redemption> {
        let target = require_known_account(&self.store, account).inspect_err(log_rejection("redeem_investment"))?;

        let slot = self.store.investment(kind);
        let opened_at = match slot.opened_at {
            Some(opened_at) if slot.principal > Decimal::ZERO => opened_at,
            _ => {
                let err = DomainError::invalid(format!("nothing applied in {kind}"));
                log_rejection("redeem_investment")(&err);
                return Err(err);
            }
        };
        if redeemed_at < opened_at {
            let err = DomainError::invalid(format!(
                "redemption date {redeemed_at} is earlier than the application date {opened_at}"
            ));
            log_rejection("redeem_investment")(&err);
            return Err(err);
        }

        let days = (redeemed_at - opened_at).num_days();
        let principal = slot.principal;
        let yield_amount = accrued_yield(kind, principal, slot.rate, days);
        let total = principal
            .checked_add(yield_amount)
            .ok_or_else(|| DomainError::invalid("amount out of range"))
            .inspect_err(log_rejection("redeem_investment"))?;
        require_credit_fits(target, total).inspect_err(log_rejection("redeem_investment"))?;

        self.post(account, total, LedgerEntry::new(format!("resgate_{kind}"), total))?;
        self.store.investment_mut(kind).principal = Decimal::ZERO;

        tracing::debug!(
            kind = kind.as_str(),
            account,
            %principal,
            %yield_amount,
            days,
            "investment redeemed"
        );
        Ok(Redemption {
            kind,
            total,
            yield_amount,
            days,
        })
    }

    pub fn investment_positions(&self) -> Vec<InvestmentPosition> {
        self.store
            .investments()
            .map(|(kind, slot)| InvestmentPosition {
                kind,
                principal: slot.principal,
                rate: slot.rate,
                opened_at: slot.opened_at,
            })
            .collect()
    }
}
