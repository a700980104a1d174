//! The container itself: bindings, constructors and the singleton cache.

use std::any::{type_name, Any};
use std::cell::RefCell;
use std::fmt;
use std::sync::Arc;

use dashmap::DashMap;

use crate::container::binding::Binding;
use crate::container::component::{Args, Component, Instance, Param};
use crate::container::error::ContainerError;

/// Registered way of building one concrete id.
#[derive(Clone, Copy)]
struct Constructor {
    params: fn() -> Vec<Param>,
    build: fn(&mut Args) -> Result<Instance, ContainerError>,
}

thread_local! {
    /// Ids under construction on this thread, tagged with their container.
    static PENDING: RefCell<Vec<(usize, String)>> = const { RefCell::new(Vec::new()) };
}

/// Marks an id as under construction until dropped.
///
/// The pending list is per thread, so a factory that calls back into the
/// container keeps the chain of the resolution that invoked it.
struct PendingGuard;

impl PendingGuard {
    fn enter(owner: usize, id: &str) -> Result<Self, ContainerError> {
        PENDING.with(|pending| {
            let mut pending = pending.borrow_mut();

            if pending.iter().any(|(o, p)| *o == owner && p == id) {
                let mut chain: Vec<&str> = pending
                    .iter()
                    .filter(|(o, _)| *o == owner)
                    .map(|(_, p)| p.as_str())
                    .collect();
                chain.push(id);
                return Err(ContainerError::Cycle {
                    chain: chain.join(" -> "),
                });
            }

            pending.push((owner, id.to_string()));
            Ok(PendingGuard)
        })
    }
}

impl Drop for PendingGuard {
    fn drop(&mut self) {
        PENDING.with(|pending| {
            pending.borrow_mut().pop();
        });
    }
}

fn build_instance<T: Component>(args: &mut Args) -> Result<Instance, ContainerError> {
    T::construct(args).map(|component| Arc::new(component) as Instance)
}

/// Maps abstract ids to concrete components and caches singletons.
///
/// All tables are concurrent maps, so a shared `Arc<Container>` can be
/// resolved from many request handlers at once. Construction never holds a
/// map lock; if two threads build the same id concurrently, the first
/// instance inserted wins and both callers receive it.
pub struct Container {
    bindings: DashMap<String, Binding>,
    constructors: DashMap<String, Constructor>,
    instances: DashMap<String, Instance>,
}

impl Container {
    /// Create an empty container.
    pub fn new() -> Self {
        Self {
            bindings: DashMap::new(),
            constructors: DashMap::new(),
            instances: DashMap::new(),
        }
    }

    /// Register the constructor of `T` under `T::ID`. Last registration wins.
    pub fn register<T: Component>(&self) {
        self.constructors.insert(
            T::ID.to_string(),
            Constructor {
                params: T::params,
                build: build_instance::<T>,
            },
        );
        tracing::trace!(component = T::ID, "Component registered");
    }

    /// Bind an abstract id to a concrete id or a factory. Last binding wins.
    pub fn bind(&self, abstract_id: impl Into<String>, target: impl Into<Binding>) {
        let abstract_id = abstract_id.into();
        let target = target.into();
        tracing::trace!(id = %abstract_id, target = ?target, "Binding registered");
        self.bindings.insert(abstract_id, target);
    }

    /// Bind an abstract id to a factory closure.
    pub fn bind_factory<F>(&self, abstract_id: impl Into<String>, factory: F)
    where
        F: Fn(&Container) -> Result<Instance, ContainerError> + Send + Sync + 'static,
    {
        self.bind(abstract_id, Binding::factory(factory));
    }

    /// Resolve an id to an instance.
    ///
    /// Factory bindings are invoked on every call and never cached here.
    /// Everything else resolves to the singleton of its concrete id.
    /// Re-entering an id that is still being resolved on this thread, directly
    /// or through a factory, fails with [`ContainerError::Cycle`].
    pub fn get(&self, id: &str) -> Result<Instance, ContainerError> {
        // Clone out of the map so no shard lock is held during resolution.
        let binding = self.bindings.get(id).map(|entry| entry.value().clone());

        match binding {
            Some(Binding::Factory(factory)) => {
                let _pending = PendingGuard::enter(self.key(), id)?;
                factory(self)
            }
            Some(Binding::Concrete(concrete)) => self.resolve_class(&concrete),
            None => self.resolve_class(id),
        }
    }

    /// Resolve an id and downcast it to `T`.
    pub fn resolve<T: Any + Send + Sync>(&self, id: &str) -> Result<Arc<T>, ContainerError> {
        self.get(id)?
            .downcast::<T>()
            .map_err(|_| ContainerError::TypeMismatch {
                id: id.to_string(),
                expected: type_name::<T>(),
            })
    }

    /// Resolve a component by its own id.
    pub fn component<T: Component>(&self) -> Result<Arc<T>, ContainerError> {
        self.resolve::<T>(T::ID)
    }

    /// True if the id is bound or has a registered constructor.
    pub fn contains(&self, id: &str) -> bool {
        self.bindings.contains_key(id) || self.constructors.contains_key(id)
    }

    /// True if a singleton for the concrete id has been built.
    pub fn is_cached(&self, id: &str) -> bool {
        self.instances.contains_key(id)
    }

    fn key(&self) -> usize {
        self as *const Container as usize
    }

    fn resolve_class(&self, id: &str) -> Result<Instance, ContainerError> {
        if let Some(instance) = self.instances.get(id) {
            return Ok(instance.value().clone());
        }

        let built = {
            let _pending = PendingGuard::enter(self.key(), id)?;
            self.instantiate(id)?
        };

        let instance = self
            .instances
            .entry(id.to_string())
            .or_insert(built)
            .value()
            .clone();

        Ok(instance)
    }

    fn instantiate(&self, id: &str) -> Result<Instance, ContainerError> {
        let constructor = self
            .constructors
            .get(id)
            .map(|entry| *entry.value())
            .ok_or_else(|| ContainerError::Reflection {
                id: id.to_string(),
                reason: format!("component \"{id}\" is not registered"),
            })?;

        let values = self.resolve_dependencies(id, &(constructor.params)())?;
        let instance = (constructor.build)(&mut Args::new(id, values))?;

        tracing::debug!(component = %id, "Component instantiated");
        Ok(instance)
    }

    fn resolve_dependencies(&self, id: &str, params: &[Param]) -> Result<Vec<Instance>, ContainerError> {
        let mut values = Vec::with_capacity(params.len());

        for param in params {
            match param.dependency() {
                Some(dependency) => values.push(self.get(dependency)?),
                None => {
                    tracing::trace!(component = %id, param = param.name, "Skipping non-component parameter");
                }
            }
        }

        Ok(values)
    }
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Container")
            .field("bindings", &self.bindings.len())
            .field("constructors", &self.constructors.len())
            .field("instances", &self.instances.len())
            .finish()
    }
}
