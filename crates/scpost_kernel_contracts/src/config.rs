#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};

use crate::{Address, ContractViolation, Validate};

pub const DEFAULT_DERIVATIVE_SYMBOL_SUFFIX: &str = "-d";
pub const MAX_VERSION_LEN: usize = 32;
pub const MAX_SYMBOL_SUFFIX_LEN: usize = 16;

/// Ledger configuration singleton.
///
/// `ledger_address` and `version` are fixed at construction. Every other field is
/// replaced wholesale by an owner-gated setter; posts already stored are never
/// re-checked against a changed budget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Derivative registry this ledger resolves original identifiers against.
    pub ledger_address: Address,
    /// Total character budget: content + infix + accounted symbol.
    pub max_post_length: u32,
    /// Characters reserved for the separator rendered between content and symbol.
    pub infix_length: u32,
    pub trusted_relay: Address,
    pub version: String,
    pub reply_all_address: Address,
    pub owner: Address,
    /// Suffix carried by derivative symbols (`ME7-d`) that does not count toward the budget.
    pub derivative_symbol_suffix: String,
}

impl LedgerConfig {
    #[allow(clippy::too_many_arguments)]
    pub fn v1(
        ledger_address: Address,
        max_post_length: u32,
        infix_length: u32,
        trusted_relay: Address,
        version: String,
        reply_all_address: Address,
        owner: Address,
    ) -> Result<Self, ContractViolation> {
        let c = Self {
            ledger_address,
            max_post_length,
            infix_length,
            trusted_relay,
            version,
            reply_all_address,
            owner,
            derivative_symbol_suffix: DEFAULT_DERIVATIVE_SYMBOL_SUFFIX.to_string(),
        };
        c.validate()?;
        Ok(c)
    }

    pub fn with_derivative_symbol_suffix(
        mut self,
        suffix: impl Into<String>,
    ) -> Result<Self, ContractViolation> {
        self.derivative_symbol_suffix = suffix.into();
        self.validate()?;
        Ok(self)
    }
}

impl Validate for LedgerConfig {
    fn validate(&self) -> Result<(), ContractViolation> {
        if self.owner.is_zero() {
            return Err(ContractViolation::InvalidValue {
                field: "ledger_config.owner",
                reason: "must not be the zero address",
            });
        }
        if self.version.trim().is_empty() {
            return Err(ContractViolation::InvalidValue {
                field: "ledger_config.version",
                reason: "must not be empty",
            });
        }
        if self.version.len() > MAX_VERSION_LEN {
            return Err(ContractViolation::InvalidValue {
                field: "ledger_config.version",
                reason: "must be <= 32 bytes",
            });
        }
        if self.derivative_symbol_suffix.len() > MAX_SYMBOL_SUFFIX_LEN {
            return Err(ContractViolation::InvalidValue {
                field: "ledger_config.derivative_symbol_suffix",
                reason: "must be <= 16 bytes",
            });
        }
        Ok(())
    }
}
