#![forbid(unsafe_code)]

pub mod admission;
pub mod caller;
pub mod clock;
pub mod ownership;
pub mod registry;
pub mod symbol;
