//! Command implementations

pub(crate) mod common;
pub mod compare;
pub mod fields;
pub mod resolve;
pub mod snapshot;
