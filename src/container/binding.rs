//! Binding targets.

use std::fmt;
use std::sync::Arc;

use crate::container::component::Instance;
use crate::container::error::ContainerError;
use crate::container::injector::Container;

/// Factory invoked with the container on every resolution of its id.
pub type Factory = Arc<dyn Fn(&Container) -> Result<Instance, ContainerError> + Send + Sync>;

/// What an abstract id resolves to.
#[derive(Clone)]
pub enum Binding {
    /// Another id, instantiated (and cached) by the container.
    Concrete(String),
    /// A factory that owns its own caching semantics.
    Factory(Factory),
}

impl Binding {
    pub fn factory<F>(f: F) -> Self
    where
        F: Fn(&Container) -> Result<Instance, ContainerError> + Send + Sync + 'static,
    {
        Binding::Factory(Arc::new(f))
    }
}

impl fmt::Debug for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Binding::Concrete(id) => f.debug_tuple("Concrete").field(id).finish(),
            Binding::Factory(_) => f.write_str("Factory(..)"),
        }
    }
}

impl From<&str> for Binding {
    fn from(id: &str) -> Self {
        Binding::Concrete(id.to_string())
    }
}

impl From<String> for Binding {
    fn from(id: String) -> Self {
        Binding::Concrete(id)
    }
}
