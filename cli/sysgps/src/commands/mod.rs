//! CLI command implementations.

pub mod eval;
pub mod resolve;
pub mod rules;
