//! Router error types.

use std::path::PathBuf;

use thiserror::Error;

use crate::container::ContainerError;
use crate::routing::controller::HandlerError;

/// Errors raised while building the route table or dispatching.
#[derive(Debug, Error)]
pub enum RouterError {
    /// Discovery root is missing or not a directory.
    #[error("The directory {} does not exist", path.display())]
    InvalidDirectory { path: PathBuf },

    /// A file under the discovery root could not be read.
    #[error("File {} could not be read: {source}", path.display())]
    InvalidFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A discovered unit names a controller the registry does not know.
    #[error("Controller {id} does not exist (discovered in {})", path.display())]
    ControllerNotFound { id: String, path: PathBuf },

    /// A controller id cannot be described (not in the registry).
    #[error("Failed to describe controller {controller}: {reason}")]
    Reflection { controller: String, reason: String },

    /// A route path is not a valid regular expression.
    #[error("Invalid route pattern {pattern:?} on {controller}::{action}: {source}")]
    InvalidPattern {
        pattern: String,
        controller: String,
        action: String,
        #[source]
        source: regex::Error,
    },

    /// No route entry matched and no not-found handler is set.
    #[error("Route {uri} with method {method} not found.")]
    RouteNotFound { uri: String, method: String },

    /// The container failed to build the controller or one of its dependencies.
    #[error(transparent)]
    Container(#[from] ContainerError),

    /// The container resolved the controller id to an instance of another type.
    #[error("Controller {controller} resolved to an instance of another type")]
    ControllerType { controller: String },

    /// The invoked action returned an error.
    #[error("Action {controller}::{action} failed: {source}")]
    Handler {
        controller: String,
        action: String,
        #[source]
        source: HandlerError,
    },
}

impl RouterError {
    /// True for the one soft failure a client is expected to see (404).
    pub fn is_not_found(&self) -> bool {
        matches!(self, RouterError::RouteNotFound { .. })
    }
}
