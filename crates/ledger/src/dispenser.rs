//! Cash-dispenser withdrawals: amounts must be a whole number of bills.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use tsbank_core::{Amount, Decimal, DomainError, DomainResult};

use crate::operations::log_rejection;
use crate::service::LedgerService;
use crate::store::LedgerEntry;
use crate::validation::{require_funds, require_known_account, require_positive_amount};

/// Dispenser model, named after the single bill it holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DispenserKind {
    #[serde(rename = "CAIXA_10")]
    Caixa10,
    #[serde(rename = "CAIXA_20")]
    Caixa20,
    #[serde(rename = "CAIXA_50")]
    Caixa50,
    #[serde(rename = "CAIXA_100")]
    Caixa100,
}

impl DispenserKind {
    pub const ALL: [DispenserKind; 4] = [
        DispenserKind::Caixa10,
        DispenserKind::Caixa20,
        DispenserKind::Caixa50,
        DispenserKind::Caixa100,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DispenserKind::Caixa10 => "CAIXA_10",
            DispenserKind::Caixa20 => "CAIXA_20",
            DispenserKind::Caixa50 => "CAIXA_50",
            DispenserKind::Caixa100 => "CAIXA_100",
        }
    }

    pub fn denomination(self) -> u32 {
        match self {
            DispenserKind::Caixa10 => 10,
            DispenserKind::Caixa20 => 20,
            DispenserKind::Caixa50 => 50,
            DispenserKind::Caixa100 => 100,
        }
    }
}

impl core::fmt::Display for DispenserKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DispenserKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DispenserKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DomainError::invalid(format!("invalid dispenser kind '{s}'")))
    }
}

impl LedgerService {
    /// Withdraw `amount` in bills of the dispenser's denomination; returns the
    /// new balance. Funds are checked before the denomination.
    pub fn withdraw_at_dispenser(
        &mut self,
        amount: Amount,
        kind: DispenserKind,
        account: &str,
    ) -> DomainResult<Amount> {
        let source = require_known_account(&self.store, account).inspect_err(log_rejection("dispenser"))?;
        require_positive_amount(amount).inspect_err(log_rejection("dispenser"))?;
        require_funds(source, amount).inspect_err(log_rejection("dispenser"))?;

        let denomination = kind.denomination();
        if !(amount % Decimal::from(denomination)).is_zero() {
            let err = DomainError::invalid(format!("amount must be a multiple of {denomination}"));
            log_rejection("dispenser")(&err);
            return Err(err);
        }

        let balance = self.post(
            account,
            -amount,
            LedgerEntry::new(format!("saque_caixa_{denomination}"), amount),
        )?;
        tracing::debug!(account, %amount, denomination, %balance, "dispenser withdrawal posted");
        Ok(balance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use tsbank_core::ErrorKind;

    fn funded(extra: Amount) -> LedgerService {
        let mut svc = LedgerService::seeded();
        svc.deposit(extra, "principal").unwrap();
        svc
    }

    #[test]
    fn non_multiple_is_rejected_and_multiple_accepted() {
        let mut svc = funded(dec!(100));
        let err = svc
            .withdraw_at_dispenser(dec!(25), DispenserKind::Caixa10, "principal")
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert_eq!(err.message(), "amount must be a multiple of 10");

        let balance = svc
            .withdraw_at_dispenser(dec!(40), DispenserKind::Caixa10, "principal")
            .unwrap();
        assert_eq!(balance, dec!(1060));
        assert_eq!(
            svc.statement("principal").unwrap().last().unwrap(),
            &LedgerEntry::new("saque_caixa_10", dec!(40))
        );
    }

    #[test]
    fn fifty_note_dispenser() {
        let mut svc = funded(dec!(200));
        assert!(svc
            .withdraw_at_dispenser(dec!(150), DispenserKind::Caixa50, "principal")
            .is_ok());
        let err = svc
            .withdraw_at_dispenser(dec!(120), DispenserKind::Caixa50, "principal")
            .unwrap_err();
        assert!(err.message().contains("multiple of 50"));
    }

    #[test]
    fn funds_are_checked_before_denomination() {
        let mut svc = LedgerService::seeded();
        let err = svc
            .withdraw_at_dispenser(dec!(1005), DispenserKind::Caixa100, "principal")
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InsufficientFunds);
        assert!(svc.statement("principal").unwrap().is_empty());
    }

    #[test]
    fn fractional_amounts_are_never_a_multiple() {
        let mut svc = LedgerService::seeded();
        let err = svc
            .withdraw_at_dispenser(dec!(20.5), DispenserKind::Caixa20, "principal")
            .unwrap_err();
        assert!(err.message().contains("multiple of 20"));
    }

    #[test]
    fn cent_remainders_are_not_a_multiple() {
        let mut svc = funded(dec!(100));
        let err = svc
            .withdraw_at_dispenser(dec!(100.01), DispenserKind::Caixa100, "principal")
            .unwrap_err();
        assert!(err.message().contains("multiple of 100"));
        let balance = svc
            .withdraw_at_dispenser(dec!(100.00), DispenserKind::Caixa100, "principal")
            .unwrap();
        assert_eq!(balance, dec!(1000));
    }

    #[test]
    fn unknown_account_is_not_found() {
        let mut svc = LedgerService::seeded();
        let err = svc
            .withdraw_at_dispenser(dec!(50), DispenserKind::Caixa50, "conta_inexistente")
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(svc.balance("principal").unwrap(), dec!(1000));
    }

    #[test]
    fn kinds_round_trip_their_wire_names() {
        for kind in DispenserKind::ALL {
            assert_eq!(kind.as_str().parse::<DispenserKind>().unwrap(), kind);
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.as_str()));
        }
        assert!("CAIXA_X".parse::<DispenserKind>().is_err());
    }
}
