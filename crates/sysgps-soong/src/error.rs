//! Host integration error types.

/// Errors raised by the module-type registry and module loading.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    /// A module type with this name is already registered.
    #[error("module type '{name}' is already registered")]
    DuplicateModuleType { name: String },

    /// No module type with this name is registered.
    #[error("unknown module type '{name}'")]
    UnknownModuleType { name: String },

    /// Load hooks already ran for this module.
    #[error("module '{name}' has already been loaded")]
    AlreadyLoaded { name: String },
}

/// Result type alias for host integration operations.
pub type Result<T> = std::result::Result<T, HostError>;
