//! Error types for rule table operations.

use std::path::PathBuf;

/// Errors that can occur while loading or writing rule tables.
///
/// Resolution itself never fails; these only arise at the file boundary.
#[derive(Debug, thiserror::Error)]
pub enum FlagError {
    /// TOML deserialization error.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML serialization error.
    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    /// I/O error reading rule files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Rule file not found.
    #[error("rule file not found: {}", path.display())]
    NotFound {
        /// The path that was not found.
        path: PathBuf,
    },

    /// Validation error in a rule table.
    #[error("validation error: {detail}")]
    Validation {
        /// Description of the validation failure.
        detail: String,
    },
}

/// Result type for rule table operations.
pub type Result<T> = std::result::Result<T, FlagError>;
