#![forbid(unsafe_code)]

pub mod admin;
pub mod error;
pub mod notify;
pub mod post_ledger;
pub mod settings;

pub use error::PostLedgerError;
pub use post_ledger::{PostLedger, PostLedgerCollaborators, SavePostRequest};
