#![forbid(unsafe_code)]

pub mod address;
pub mod common;
pub mod config;
pub mod post;
pub mod text;

pub use address::Address;
pub use common::{ContractViolation, UnixTimeSecs, Validate};
