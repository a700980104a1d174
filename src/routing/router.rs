//! Route registration and dispatch.
//!
//! # Responsibilities
//! - Register controllers explicitly or through source-tree discovery
//! - Own the route table
//! - Dispatch a request to the first matching action
//! - Fall back to the not-found handler, or report `RouteNotFound`
//!
//! # Design Decisions
//! - Immutable after startup; `&self` dispatch is safe from many threads
//! - Linear first-match scan in registration order
//! - Controller instances come from the container on every dispatch
//! - Errors propagate to the caller; nothing here terminates the process

use std::collections::HashSet;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use crate::container::Container;
use crate::http::Response;
use crate::routing::controller::Controller;
use crate::routing::discovery::{self, DiscoveryPolicy, DEFAULT_EXTENSION};
use crate::routing::error::RouterError;
use crate::routing::registry::{ControllerDescriptor, ControllerRegistry};
use crate::routing::table::RouteTable;

/// Callback invoked with `(uri, method, response)` when nothing matches.
pub type NotFoundHandler = Box<dyn Fn(&str, &str, &mut Response) + Send + Sync>;

/// Maps requests to controller actions.
pub struct Router {
    container: Arc<Container>,
    registry: ControllerRegistry,
    table: RouteTable,
    not_found: Option<NotFoundHandler>,
    policy: DiscoveryPolicy,
    extension: String,
}

impl Router {
    /// Create a router with an empty registry and strict discovery.
    pub fn new(container: Arc<Container>) -> Self {
        Self {
            container,
            registry: ControllerRegistry::new(),
            table: RouteTable::new(),
            not_found: None,
            policy: DiscoveryPolicy::default(),
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }

    pub fn with_registry(mut self, registry: ControllerRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn with_discovery_policy(mut self, policy: DiscoveryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Extension of source units considered during discovery.
    pub fn with_source_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    pub fn container(&self) -> &Arc<Container> {
        &self.container
    }

    pub fn registry(&self) -> &ControllerRegistry {
        &self.registry
    }

    pub fn routes(&self) -> &RouteTable {
        &self.table
    }

    /// Register a controller type directly. Returns the number of entries added.
    pub fn register<C: Controller>(&mut self) -> Result<usize, RouterError> {
        self.register_descriptor(ControllerDescriptor::of::<C>())
    }

    /// Register a controller by id from the registry.
    ///
    /// Registering the same controller again appends its entries again;
    /// the earlier ones keep winning at dispatch.
    pub fn register_controller(&mut self, id: &str) -> Result<usize, RouterError> {
        let descriptor = *self
            .registry
            .get(id)
            .ok_or_else(|| RouterError::Reflection {
                controller: id.to_string(),
                reason: format!("controller \"{id}\" is not in the registry"),
            })?;

        self.register_descriptor(descriptor)
    }

    /// Register every controller in the registry, in registry order.
    pub fn register_all(&mut self) -> Result<usize, RouterError> {
        let descriptors = self.registry.descriptors().to_vec();
        let mut added = 0;
        for descriptor in descriptors {
            added += self.register_descriptor(descriptor)?;
        }
        Ok(added)
    }

    /// Discover controller units under `root` and register each one.
    ///
    /// Returns the number of controllers registered. Fails with
    /// `InvalidDirectory` before registering anything if `root` is not a
    /// directory.
    pub fn auto_register_controllers(&mut self, root: impl AsRef<Path>) -> Result<usize, RouterError> {
        let root = root.as_ref();
        let candidates = discovery::collect_candidates(root, &self.extension)?;

        tracing::debug!(
            root = %root.display(),
            candidates = candidates.len(),
            "Scanning for controllers"
        );

        let mut registered = 0;
        for path in candidates {
            let unit = discovery::inspect_unit(&path)?;
            let id = unit.qualified_id();

            if !self.registry.contains(&id) {
                match self.policy {
                    DiscoveryPolicy::Strict => {
                        return Err(RouterError::ControllerNotFound { id, path });
                    }
                    DiscoveryPolicy::Lenient => {
                        tracing::warn!(controller = %id, path = %path.display(), "Skipping unknown controller");
                        continue;
                    }
                }
            }

            self.register_controller(&id)?;
            registered += 1;
        }

        tracing::info!(
            root = %root.display(),
            controllers = registered,
            routes = self.table.len(),
            "Controllers discovered"
        );
        Ok(registered)
    }

    /// Set the handler used when no route matches.
    pub fn set_not_found_handler<F>(&mut self, handler: F)
    where
        F: Fn(&str, &str, &mut Response) + Send + Sync + 'static,
    {
        self.not_found = Some(Box::new(handler));
    }

    /// Resolve every registered controller once, so no singleton is built
    /// lazily while serving. Returns the number of distinct controllers.
    pub fn preload_controllers(&self) -> Result<usize, RouterError> {
        let mut seen = HashSet::new();
        for entry in self.table.iter() {
            if seen.insert(entry.controller()) {
                self.container.get(entry.controller())?;
            }
        }
        Ok(seen.len())
    }

    /// Dispatch a request to the first matching action.
    ///
    /// On a match, the controller is resolved through the container and the
    /// action is invoked with the captured parameters. Without a match, the
    /// not-found handler runs if set; otherwise `RouteNotFound` is returned.
    pub fn dispatch(&self, uri: &str, method: &str, response: &mut Response) -> Result<(), RouterError> {
        if let Some((entry, params)) = self.table.find(uri, method) {
            tracing::debug!(
                uri,
                method,
                controller = entry.controller(),
                action = entry.action(),
                params = params.len(),
                "Route matched"
            );

            let instance = self.container.get(entry.controller())?;
            return entry.invoke(&instance, &params, response);
        }

        match &self.not_found {
            Some(handler) => {
                tracing::debug!(uri, method, "No route matched, invoking not-found handler");
                handler(uri, method, response);
                Ok(())
            }
            None => Err(RouterError::RouteNotFound {
                uri: uri.to_string(),
                method: method.to_string(),
            }),
        }
    }

    fn register_descriptor(&mut self, descriptor: ControllerDescriptor) -> Result<usize, RouterError> {
        let entries = descriptor.entries()?;
        let added = entries.len();

        descriptor.install(&self.container);
        self.table.extend(entries);

        tracing::debug!(controller = descriptor.id(), routes = added, "Controller registered");
        Ok(added)
    }
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("routes", &self.table.len())
            .field("registry", &self.registry.len())
            .field("not_found", &self.not_found.is_some())
            .field("policy", &self.policy)
            .finish()
    }
}
