//! Transfer Policy Engine: per-kind time-of-day and amount-limit rules.
//!
//! The rule table is static and keyed by `TransferKind`. Rules are evaluated
//! against an explicit local time-of-day, before any balance check.

use core::str::FromStr;

use chrono::{NaiveDateTime, NaiveTime};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use tsbank_core::{Amount, DomainError, DomainResult, display_amount};

use crate::operations::{TransferReceipt, log_rejection};
use crate::service::LedgerService;

/// Transfer rail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransferKind {
    Pix,
    Doc,
    Ted,
    Interna,
}

impl TransferKind {
    pub const ALL: [TransferKind; 4] = [
        TransferKind::Pix,
        TransferKind::Doc,
        TransferKind::Ted,
        TransferKind::Interna,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TransferKind::Pix => "PIX",
            TransferKind::Doc => "DOC",
            TransferKind::Ted => "TED",
            TransferKind::Interna => "INTERNA",
        }
    }

    /// The rule row for this kind.
    pub fn rule(self) -> TransferRule {
        match self {
            TransferKind::Pix => TransferRule {
                kind: self,
                max_amount: dec!(1000),
                limit_window: Some(TimeWindow::new(hm(20, 0), hm(6, 0))),
                allowed_window: None,
            },
            TransferKind::Doc => TransferRule {
                kind: self,
                max_amount: dec!(10000),
                limit_window: None,
                allowed_window: None,
            },
            TransferKind::Ted => TransferRule {
                kind: self,
                max_amount: dec!(50000),
                limit_window: None,
                allowed_window: Some(TimeWindow::new(hm(6, 0), hm(17, 0))),
            },
            TransferKind::Interna => TransferRule {
                kind: self,
                max_amount: dec!(100000),
                limit_window: None,
                allowed_window: None,
            },
        }
    }
}

impl core::fmt::Display for TransferKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransferKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TransferKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DomainError::invalid(format!("invalid transfer kind '{s}'")))
    }
}

/// Inclusive time-of-day interval. `start > end` wraps past midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl TimeWindow {
    pub const fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, at: NaiveTime) -> bool {
        if self.start <= self.end {
            self.start <= at && at <= self.end
        } else {
            at >= self.start || at <= self.end
        }
    }
}

impl core::fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} and {}", self.start.format("%H:%M"), self.end.format("%H:%M"))
    }
}

/// One row of the policy table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransferRule {
    pub kind: TransferKind,
    /// Amounts above this are rejected (inside `limit_window` when set).
    pub max_amount: Amount,
    /// When set, the limit only applies inside this window.
    pub limit_window: Option<TimeWindow>,
    /// When set, transfers outside this window are rejected outright.
    pub allowed_window: Option<TimeWindow>,
}

impl TransferRule {
    /// Check `amount` at local time `at`; the first violated clause wins.
    pub fn check(&self, amount: Amount, at: NaiveTime) -> DomainResult<()> {
        if let Some(window) = self.allowed_window {
            if !window.contains(at) {
                return Err(DomainError::invalid(format!(
                    "{} is only allowed between {window}",
                    self.kind
                )));
            }
        }

        let limit_applies = self.limit_window.is_none_or(|window| window.contains(at));
        if limit_applies && amount > self.max_amount {
            let limit = display_amount(self.max_amount);
            return Err(DomainError::invalid(match (self.kind, self.limit_window) {
                (TransferKind::Interna, _) => {
                    format!("amount exceeds the internal transfer limit ({limit})")
                }
                (kind, Some(window)) => format!(
                    "{kind} night-time transfer above the {limit} limit (between {window})"
                ),
                (kind, None) => format!("amount exceeds the {kind} limit ({limit})"),
            }));
        }

        Ok(())
    }
}

/// Evaluate the policy row for `kind`.
pub fn check_transfer_policy(kind: TransferKind, amount: Amount, at: NaiveTime) -> DomainResult<()> {
    kind.rule().check(amount, at)
}

impl LedgerService {
    /// Run the policy for `kind` at `now`, then `transfer`. Policy violations
    /// take precedence over balance and account checks.
    pub fn transfer_with_policy(
        &mut self,
        kind: TransferKind,
        amount: Amount,
        from: &str,
        to: &str,
        now: NaiveDateTime,
    ) -> DomainResult<TransferReceipt> {
        check_transfer_policy(kind, amount, now.time()).inspect_err(log_rejection("transfer_policy"))?;
        let receipt = self.transfer(amount, from, to)?;
        tracing::debug!(kind = kind.as_str(), from, to, %amount, "policy transfer completed");
        Ok(receipt)
    }
}

fn hm(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use tsbank_core::ErrorKind;

    fn at(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
    }

    fn on(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn rich_service() -> LedgerService {
        let mut svc = LedgerService::seeded();
        svc.deposit(dec!(199000), "principal").unwrap();
        svc
    }

    #[test]
    fn pix_night_limit_applies_inside_the_inclusive_window() {
        for time in [at(20, 0), at(22, 0), at(0, 0), at(6, 0)] {
            let err = check_transfer_policy(TransferKind::Pix, dec!(1500), time).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidArgument);
            assert!(err.message().contains("night-time transfer above"));
        }
        assert!(check_transfer_policy(TransferKind::Pix, dec!(1000), at(22, 0)).is_ok());
        assert!(check_transfer_policy(TransferKind::Pix, dec!(1000.01), at(22, 0)).is_err());
    }

    #[test]
    fn pix_has_no_limit_during_the_day() {
        for time in [at(6, 1), at(14, 0), at(19, 59)] {
            assert!(check_transfer_policy(TransferKind::Pix, dec!(1500), time).is_ok());
        }
    }

    #[test]
    fn doc_limit_ignores_time() {
        for time in [at(3, 0), at(12, 0), at(23, 0)] {
            let err = check_transfer_policy(TransferKind::Doc, dec!(15000), time).unwrap_err();
            assert!(err.message().contains("exceeds the DOC limit"));
            assert!(check_transfer_policy(TransferKind::Doc, dec!(9000), time).is_ok());
        }
    }

    #[test]
    fn ted_is_restricted_to_business_hours() {
        assert!(check_transfer_policy(TransferKind::Ted, dec!(1000), at(6, 0)).is_ok());
        assert!(check_transfer_policy(TransferKind::Ted, dec!(1000), at(17, 0)).is_ok());
        for time in [at(5, 59), at(17, 1), at(18, 0)] {
            let err = check_transfer_policy(TransferKind::Ted, dec!(1000), time).unwrap_err();
            assert!(err.message().contains("only allowed between 06:00 and 17:00"));
        }
    }

    #[test]
    fn ted_limit_applies_within_business_hours() {
        let err = check_transfer_policy(TransferKind::Ted, dec!(60000), at(11, 0)).unwrap_err();
        assert!(err.message().contains("exceeds the TED limit"));
        assert!(check_transfer_policy(TransferKind::Ted, dec!(20000), at(10, 0)).is_ok());
    }

    #[test]
    fn internal_transfer_limit() {
        let err = check_transfer_policy(TransferKind::Interna, dec!(150000), at(10, 0)).unwrap_err();
        assert!(err.message().contains("internal transfer limit"));
        assert!(check_transfer_policy(TransferKind::Interna, dec!(90000), at(23, 0)).is_ok());
    }

    #[test]
    fn unrecognized_kind_is_invalid_argument() {
        let err = "INVALIDA".parse::<TransferKind>().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert_eq!("pix".parse::<TransferKind>().unwrap(), TransferKind::Pix);
        assert_eq!("INTERNA".parse::<TransferKind>().unwrap(), TransferKind::Interna);
    }

    #[test]
    fn pix_1500_rejected_at_night_and_accepted_in_the_afternoon() {
        let mut svc = LedgerService::seeded();
        svc.deposit(dec!(1000), "principal").unwrap();

        let err = svc
            .transfer_with_policy(TransferKind::Pix, dec!(1500), "principal", "destino", on(22, 0))
            .unwrap_err();
        assert!(err.message().contains("night-time transfer above"));
        assert_eq!(svc.balance("principal").unwrap(), dec!(2000));

        let receipt = svc
            .transfer_with_policy(TransferKind::Pix, dec!(1500), "principal", "destino", on(14, 0))
            .unwrap();
        assert_eq!(receipt.source_balance, dec!(500));
        assert_eq!(receipt.destination_balance, dec!(2000));
    }

    #[test]
    fn policy_violation_wins_over_insufficient_funds() {
        let mut svc = LedgerService::seeded();
        let err = svc
            .transfer_with_policy(TransferKind::Doc, dec!(15000), "principal", "destino", on(10, 0))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn insufficient_funds_reported_once_policy_passes() {
        let mut svc = LedgerService::seeded();
        let err = svc
            .transfer_with_policy(TransferKind::Pix, dec!(9999), "principal", "destino", on(10, 0))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InsufficientFunds);
    }

    #[test]
    fn every_kind_accepts_a_small_daytime_transfer() {
        let mut svc = rich_service();
        for kind in TransferKind::ALL {
            svc.transfer_with_policy(kind, dec!(10), "principal", "destino", on(10, 0))
                .unwrap();
        }
        assert_eq!(svc.statement("destino").unwrap().len(), TransferKind::ALL.len());
    }
}
