//! Error types for column filters.
//!
//! Selection reconciliation never fails; only the filter-builder registry and
//! the configuration loaders surface errors.

/// Result type alias for filter operations.
pub type Result<T> = std::result::Result<T, FilterError>;

/// Errors that can occur when building or configuring filters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FilterError {
    /// No builder is registered under the requested kind.
    #[error("Unknown filter kind '{kind}'")]
    UnknownKind { kind: String },

    /// A builder is already registered under this kind.
    #[error("Filter kind '{kind}' is already registered")]
    DuplicateKind { kind: String },

    /// The process-wide registry was installed twice.
    #[error("Filter registry has already been initialized")]
    RegistryAlreadyInitialized,

    /// The process-wide registry was looked up before installation.
    #[error("Filter registry has not been initialized. Call init_filter_registry() first")]
    RegistryNotInitialized,

    /// A filter configuration document could not be decoded.
    #[error("Invalid filter configuration: {message}")]
    Config { message: String },
}

impl FilterError {
    /// Create an unknown-kind error.
    pub fn unknown_kind(kind: impl Into<String>) -> Self {
        Self::UnknownKind { kind: kind.into() }
    }

    /// Create a duplicate-kind error.
    pub fn duplicate_kind(kind: impl Into<String>) -> Self {
        Self::DuplicateKind { kind: kind.into() }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}
