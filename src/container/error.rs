//! Container error types.

use thiserror::Error;

/// Errors raised while resolving components.
#[derive(Debug, Error)]
pub enum ContainerError {
    /// No constructor is registered for the identifier.
    #[error("Failed to reflect component {id}: {reason}")]
    Reflection { id: String, reason: String },

    /// The dependency graph loops back on a component under construction.
    #[error("Circular dependency detected: {chain}")]
    Cycle { chain: String },

    /// A constructor asked for more arguments than were auto-wired.
    #[error("Component {id} expected argument #{position} ({expected}) but none was supplied")]
    MissingArgument {
        id: String,
        position: usize,
        expected: &'static str,
    },

    /// A resolved instance does not have the requested concrete type.
    #[error("Component {id} is not of type {expected}")]
    TypeMismatch { id: String, expected: &'static str },

    /// A bound factory or a constructor failed on its own terms.
    #[error("Failed to build component {id}: {message}")]
    Factory { id: String, message: String },
}

impl ContainerError {
    /// Construction failure raised from inside a component's constructor.
    pub fn construction(id: impl Into<String>, message: impl std::fmt::Display) -> Self {
        ContainerError::Factory {
            id: id.into(),
            message: message.to_string(),
        }
    }
}
