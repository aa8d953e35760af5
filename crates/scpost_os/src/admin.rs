#![forbid(unsafe_code)]

use scpost_kernel_contracts::config::LedgerConfig;
use scpost_kernel_contracts::Address;

use crate::PostLedgerError;

/// Owner check composed into every configuration mutation.
#[derive(Debug, Default, Clone, Copy)]
pub struct AdminGate;

impl AdminGate {
    pub fn ensure_owner(config: &LedgerConfig, caller: Address) -> Result<(), PostLedgerError> {
        if caller != config.owner {
            return Err(PostLedgerError::NotOwner { caller });
        }
        Ok(())
    }
}
