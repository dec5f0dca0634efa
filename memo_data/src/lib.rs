//! Shared data model for memo objectives.

pub mod defs;
pub mod validate;

pub use defs::*;
pub use validate::{ValidationError, validate_objectives};
