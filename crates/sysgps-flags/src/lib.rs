//! Device-conditioned compiler flag resolution for the `sys_gps` HAL.
//!
//! A target device name is looked up in an ordered table of
//! [`FlagRule`]s; every rule whose device matches exactly contributes its
//! flag to the resulting [`FlagSet`], in table order.
//!
//! - **Rules:** the built-in table plus optional `.rules.toml` files
//! - **Resolution:** a total, pure function; unknown devices yield no flags

pub mod error;
pub mod parse;
pub mod resolve;
pub mod rule;

pub use error::{FlagError, Result};
pub use resolve::{resolve, resolve_with};
pub use rule::{FlagRule, FlagSet, RuleTable, BUILTIN_RULES};
