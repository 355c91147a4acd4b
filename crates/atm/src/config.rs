//! Environment-driven configuration for the teller binary.
//!
//! | variable | values | default |
//! |---|---|---|
//! | `TELLER_DEMO_ACCOUNTS` | `true` / `false` | `true` |
//! | `TELLER_LOG_FORMAT` | `text` / `json` | `text` |
//! | `TELLER_LOG_LEVEL` | any `EnvFilter` directive | `warn` |
//!
//! `RUST_LOG`, when set, overrides `TELLER_LOG_LEVEL`.

use teller_observability::{LogFormat, LogSettings};
use thiserror::Error;

pub const DEMO_ACCOUNTS_VAR: &str = "TELLER_DEMO_ACCOUNTS";
pub const LOG_FORMAT_VAR: &str = "TELLER_LOG_FORMAT";
pub const LOG_LEVEL_VAR: &str = "TELLER_LOG_LEVEL";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var}: {message}")]
    Invalid { var: &'static str, message: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtmConfig {
    /// Seed the ledger with the two demo accounts.
    pub seed_demo_accounts: bool,
    pub log: LogSettings,
}

impl Default for AtmConfig {
    fn default() -> Self {
        Self {
            seed_demo_accounts: true,
            log: LogSettings::default(),
        }
    }
}

impl AtmConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (unset keys fall back to defaults).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(raw) = lookup(DEMO_ACCOUNTS_VAR) {
            config.seed_demo_accounts = parse_bool(&raw).ok_or_else(|| ConfigError::Invalid {
                var: DEMO_ACCOUNTS_VAR,
                message: format!("expected true or false, got {raw:?}"),
            })?;
        }

        if let Some(raw) = lookup(LOG_FORMAT_VAR) {
            config.log.format = raw
                .parse::<LogFormat>()
                .map_err(|message| ConfigError::Invalid {
                    var: LOG_FORMAT_VAR,
                    message,
                })?;
        }

        if let Some(raw) = lookup(LOG_LEVEL_VAR) {
            let directive = raw.trim();
            if directive.is_empty() {
                return Err(ConfigError::Invalid {
                    var: LOG_LEVEL_VAR,
                    message: "empty filter directive".to_string(),
                });
            }
            config.log.default_directive = directive.to_string();
        }

        Ok(config)
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
