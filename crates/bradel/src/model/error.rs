//! Error types for the binding layer.

use super::registry::ComponentRole;

/// Result type alias for binding operations.
pub type Result<T> = std::result::Result<T, BindingError>;

/// Recoverable errors raised while binding view models to components.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BindingError {
    /// No component is registered for the view model's kind.
    #[error("no component registered for reuse identifier '{reuse_identifier}'")]
    UnregisteredKind { reuse_identifier: String },

    /// A component is registered for the kind, but in another role.
    #[error("reuse identifier '{reuse_identifier}' is registered as {found}, expected {expected}")]
    RoleMismatch {
        reuse_identifier: String,
        expected: ComponentRole,
        found: ComponentRole,
    },

    /// The binding has no view model to read from.
    #[error("no view model is set")]
    NoViewModel,

    /// The binding configuration could not be parsed.
    #[error("invalid binding configuration: {0}")]
    InvalidConfig(String),
}

impl BindingError {
    /// Creates an unregistered-kind error.
    pub fn unregistered(reuse_identifier: impl Into<String>) -> Self {
        Self::UnregisteredKind {
            reuse_identifier: reuse_identifier.into(),
        }
    }
}
