#![forbid(unsafe_code)]

use scpost_kernel_contracts::text::MalformedText;
use scpost_kernel_contracts::{Address, ContractViolation};
use scpost_storage::ledger::StorageError;

/// Terminal outcome of a rejected ledger call. No variant leaves partial state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PostLedgerError {
    #[error("derivative contract not found for {original:?}")]
    DerivativeNotFound { original: String },
    #[error("{caller} does not own derivative {derivative}")]
    NotAnOwner { derivative: Address, caller: Address },
    #[error("post exceeds max post length: {length} > {budget}")]
    PostTooLong { length: u64, budget: u64 },
    #[error("caller {caller} is not the owner")]
    NotOwner { caller: Address },
    #[error(transparent)]
    MalformedText(#[from] MalformedText),
    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] ContractViolation),
    #[error("storage: {0}")]
    Storage(StorageError),
}

impl PostLedgerError {
    /// Stable kind label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            PostLedgerError::DerivativeNotFound { .. } => "derivative_not_found",
            PostLedgerError::NotAnOwner { .. } => "not_an_owner",
            PostLedgerError::PostTooLong { .. } => "post_too_long",
            PostLedgerError::NotOwner { .. } => "not_owner",
            PostLedgerError::MalformedText(_) => "malformed_text",
            PostLedgerError::InvalidConfig(_) => "invalid_config",
            PostLedgerError::Storage(_) => "storage",
        }
    }
}

impl From<StorageError> for PostLedgerError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::ContractViolation(v) => PostLedgerError::InvalidConfig(v),
            other => PostLedgerError::Storage(other),
        }
    }
}
