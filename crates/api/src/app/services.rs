use std::sync::{Arc, Mutex, PoisonError};

use chrono::NaiveDateTime;

use tsbank_core::{Clock, DomainResult};
use tsbank_ledger::{LedgerService, LedgerStore};

/// State shared by every handler. The mutex is the serialization point: one
/// ledger operation runs at a time, start to finish.
pub struct AppServices {
    ledger: Mutex<LedgerService>,
    clock: Arc<dyn Clock>,
}

impl AppServices {
    pub fn new(store: LedgerStore, clock: Arc<dyn Clock>) -> Self {
        Self {
            ledger: Mutex::new(LedgerService::new(store)),
            clock,
        }
    }

    pub fn now(&self) -> NaiveDateTime {
        self.clock.now()
    }

    /// Run `f` with exclusive access to the ledger.
    pub fn with_ledger<T>(&self, f: impl FnOnce(&mut LedgerService) -> DomainResult<T>) -> DomainResult<T> {
        // Operations validate before mutating, so a panicked holder cannot
        // have left a half-applied change behind.
        let mut ledger = self.ledger.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut ledger)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tsbank_core::{Decimal, FixedClock};

    #[test]
    fn ledger_access_is_shared_across_calls() {
        let at = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_hms_opt(9, 0, 0).unwrap();
        let services = AppServices::new(LedgerStore::seeded(), Arc::new(FixedClock(at)));

        services.with_ledger(|l| l.deposit(Decimal::from(10), "principal")).unwrap();
        let balance = services.with_ledger(|l| l.balance("principal")).unwrap();

        assert_eq!(balance, Decimal::from(1010));
        assert_eq!(services.now(), at);
    }
}
