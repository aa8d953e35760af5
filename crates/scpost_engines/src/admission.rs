#![forbid(unsafe_code)]

use scpost_kernel_contracts::config::LedgerConfig;
use scpost_kernel_contracts::text::{char_length, MalformedText};

/// Length budget derived from the ledger configuration:
/// `content + infix + symbol <= max_post_length`, all counted in code points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostLengthPolicy {
    max_post_length: u64,
    infix_length: u64,
    derivative_symbol_suffix: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthVerdict {
    WithinBudget { length: u64, budget: u64 },
    /// `budget` is 0 when the infix and symbol alone exceed `max_post_length`.
    TooLong { length: u64, budget: u64 },
}

impl PostLengthPolicy {
    pub fn from_config(config: &LedgerConfig) -> Self {
        Self {
            max_post_length: u64::from(config.max_post_length),
            infix_length: u64::from(config.infix_length),
            derivative_symbol_suffix: config.derivative_symbol_suffix.clone(),
        }
    }

    /// Portion of the symbol that counts toward the budget (`ME7-d` -> `ME7`).
    pub fn accounted_symbol<'a>(&self, symbol: &'a str) -> &'a str {
        if self.derivative_symbol_suffix.is_empty() {
            return symbol;
        }
        symbol
            .strip_suffix(self.derivative_symbol_suffix.as_str())
            .unwrap_or(symbol)
    }

    /// `None` when infix plus symbol already exceed the total budget.
    pub fn budget_for_symbol(&self, symbol: &str) -> Result<Option<u64>, MalformedText> {
        let symbol_length = char_length(self.accounted_symbol(symbol).as_bytes())? as u64;
        Ok(self
            .max_post_length
            .checked_sub(self.infix_length)
            .and_then(|rest| rest.checked_sub(symbol_length)))
    }

    pub fn check(&self, content: &[u8], symbol: &str) -> Result<LengthVerdict, MalformedText> {
        let budget = self.budget_for_symbol(symbol)?;
        let length = char_length(content)? as u64;
        Ok(match budget {
            Some(budget) if length <= budget => LengthVerdict::WithinBudget { length, budget },
            Some(budget) => LengthVerdict::TooLong { length, budget },
            None => LengthVerdict::TooLong { length, budget: 0 },
        })
    }
}
