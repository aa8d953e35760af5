#![forbid(unsafe_code)]

use std::env;

use scpost_kernel_contracts::config::{LedgerConfig, DEFAULT_DERIVATIVE_SYMBOL_SUFFIX};
use scpost_kernel_contracts::{Address, ContractViolation};

pub const ENV_MAX_POST_LENGTH: &str = "SCPOST_MAX_POST_LENGTH";
pub const ENV_INFIX_LENGTH: &str = "SCPOST_INFIX_LENGTH";
pub const ENV_VERSION: &str = "SCPOST_VERSION";
pub const ENV_SYMBOL_SUFFIX: &str = "SCPOST_SYMBOL_SUFFIX";

/// Construction-time defaults for a new ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostLedgerSettings {
    pub max_post_length: u32,
    pub infix_length: u32,
    pub version: String,
    pub derivative_symbol_suffix: String,
}

impl PostLedgerSettings {
    pub fn mvp_v1() -> Self {
        Self {
            max_post_length: 280,
            infix_length: 3,
            version: "0.0.1".to_string(),
            derivative_symbol_suffix: DEFAULT_DERIVATIVE_SYMBOL_SUFFIX.to_string(),
        }
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Unset, blank or unparsable values keep the `mvp_v1` default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::mvp_v1();
        let trimmed = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let number = |key: &str, default: u32| {
            trimmed(key)
                .and_then(|v| v.parse::<u32>().ok())
                .unwrap_or(default)
        };
        Self {
            max_post_length: number(ENV_MAX_POST_LENGTH, defaults.max_post_length),
            infix_length: number(ENV_INFIX_LENGTH, defaults.infix_length),
            version: trimmed(ENV_VERSION).unwrap_or(defaults.version),
            // An explicitly empty suffix disables stripping, so this one is not trimmed away.
            derivative_symbol_suffix: lookup(ENV_SYMBOL_SUFFIX)
                .map(|v| v.trim().to_string())
                .unwrap_or(defaults.derivative_symbol_suffix),
        }
    }

    pub fn into_config(
        self,
        ledger_address: Address,
        trusted_relay: Address,
        reply_all_address: Address,
        owner: Address,
    ) -> Result<LedgerConfig, ContractViolation> {
        LedgerConfig::v1(
            ledger_address,
            self.max_post_length,
            self.infix_length,
            trusted_relay,
            self.version,
            reply_all_address,
            owner,
        )?
        .with_derivative_symbol_suffix(self.derivative_symbol_suffix)
    }
}

impl Default for PostLedgerSettings {
    fn default() -> Self {
        Self::mvp_v1()
    }
}
