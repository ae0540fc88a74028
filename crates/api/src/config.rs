//! Server configuration, read from `TSBANK_*` environment variables.

use std::net::SocketAddr;

use tsbank_core::{AccountName, Amount, Decimal};
use tsbank_ledger::LedgerStore;
use tsbank_observability::LogFormat;

pub const BIND_ADDR_VAR: &str = "TSBANK_BIND_ADDR";
pub const LOG_FORMAT_VAR: &str = "TSBANK_LOG_FORMAT";
pub const SEED_ACCOUNTS_VAR: &str = "TSBANK_SEED_ACCOUNTS";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_SEED: &str = "principal=1000,destino=500";

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("{var}: invalid socket address '{value}'")]
    BindAddr { var: &'static str, value: String },
    #[error("{var}: {reason}")]
    LogFormat { var: &'static str, reason: String },
    #[error("{var}: invalid seed entry '{entry}' (expected name=balance)")]
    SeedEntry { var: &'static str, entry: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    pub bind_addr: SocketAddr,
    pub log_format: LogFormat,
    pub seed_accounts: Vec<(AccountName, Amount)>,
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; unset keys fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let bind = lookup(BIND_ADDR_VAR).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_owned());
        let bind_addr = bind.trim().parse().map_err(|_| ConfigError::BindAddr {
            var: BIND_ADDR_VAR,
            value: bind.clone(),
        })?;

        let log_format = match lookup(LOG_FORMAT_VAR) {
            Some(raw) => raw.parse().map_err(|reason| ConfigError::LogFormat {
                var: LOG_FORMAT_VAR,
                reason,
            })?,
            None => LogFormat::default(),
        };

        let seed = lookup(SEED_ACCOUNTS_VAR).unwrap_or_else(|| DEFAULT_SEED.to_owned());
        let seed_accounts = parse_seed(&seed)?;

        Ok(Self {
            bind_addr,
            log_format,
            seed_accounts,
        })
    }

    pub fn ledger_store(&self) -> LedgerStore {
        LedgerStore::with_accounts(self.seed_accounts.iter().cloned())
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            log_format: LogFormat::default(),
            seed_accounts: vec![
                (AccountName::new("principal"), Decimal::from(1000)),
                (AccountName::new("destino"), Decimal::from(500)),
            ],
        }
    }
}

/// Parse `name=balance,name=balance`. Blank segments are skipped.
pub fn parse_seed(raw: &str) -> Result<Vec<(AccountName, Amount)>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            let invalid = || ConfigError::SeedEntry {
                var: SEED_ACCOUNTS_VAR,
                entry: segment.to_owned(),
            };
            let (name, balance) = segment.split_once('=').ok_or_else(invalid)?;
            let name: AccountName = name.parse().map_err(|_| invalid())?;
            let balance: Amount = balance.trim().parse().map_err(|_| invalid())?;
            if balance < Decimal::ZERO {
                return Err(invalid());
            }
            Ok((name, balance))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = ApiConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ApiConfig::default());
    }

    #[test]
    fn reads_every_variable() {
        let config = ApiConfig::from_lookup(lookup(&[
            (BIND_ADDR_VAR, "127.0.0.1:9000"),
            (LOG_FORMAT_VAR, "pretty"),
            (SEED_ACCOUNTS_VAR, "alice=10.5, bob=0"),
        ]))
        .unwrap();
        assert_eq!(config.bind_addr.port(), 9000);
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert_eq!(
            config.seed_accounts,
            vec![
                (AccountName::new("alice"), Decimal::new(105, 1)),
                (AccountName::new("bob"), Decimal::ZERO),
            ]
        );
        assert!(config.ledger_store().contains("alice"));
    }

    #[test]
    fn rejects_malformed_values() {
        assert!(matches!(
            ApiConfig::from_lookup(lookup(&[(BIND_ADDR_VAR, "nowhere")])),
            Err(ConfigError::BindAddr { .. })
        ));
        assert!(matches!(
            ApiConfig::from_lookup(lookup(&[(LOG_FORMAT_VAR, "xml")])),
            Err(ConfigError::LogFormat { .. })
        ));
        for bad in ["alice", "=10", "alice=abc", "alice=-5", "alice=NaN"] {
            assert!(parse_seed(bad).is_err(), "{bad}");
        }
    }
}
