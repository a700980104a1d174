//! Explicit controller registry.
//!
//! Every controller the application can mount is listed here once, in one
//! place, so wiring is checked at compile time. Discovery and
//! [`Router::register_controller`](crate::routing::Router::register_controller)
//! look controllers up by id in this list.

use crate::container::Container;
use crate::routing::controller::Controller;
use crate::routing::error::RouterError;
use crate::routing::table::{entries_for, RouteEntry};

/// Everything the router needs to mount one controller.
#[derive(Clone, Copy)]
pub struct ControllerDescriptor {
    id: &'static str,
    install: fn(&Container),
    entries: fn() -> Result<Vec<RouteEntry>, RouterError>,
}

fn install<C: Controller>(container: &Container) {
    container.register::<C>();
}

impl ControllerDescriptor {
    pub fn of<C: Controller>() -> Self {
        Self {
            id: C::ID,
            install: install::<C>,
            entries: entries_for::<C>,
        }
    }

    pub fn id(&self) -> &'static str {
        self.id
    }

    /// Register the controller's constructor with the container.
    pub fn install(&self, container: &Container) {
        (self.install)(container)
    }

    /// Route entries of the controller, in declaration order.
    pub fn entries(&self) -> Result<Vec<RouteEntry>, RouterError> {
        (self.entries)()
    }
}

impl std::fmt::Debug for ControllerDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ControllerDescriptor")
            .field("id", &self.id)
            .finish()
    }
}

/// Ordered list of known controllers.
#[derive(Debug, Clone, Default)]
pub struct ControllerRegistry {
    descriptors: Vec<ControllerDescriptor>,
}

impl ControllerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`ControllerRegistry::add`].
    pub fn with<C: Controller>(mut self) -> Self {
        self.add::<C>();
        self
    }

    /// Add a controller. Adding an id again replaces the earlier descriptor
    /// in place.
    pub fn add<C: Controller>(&mut self) {
        let descriptor = ControllerDescriptor::of::<C>();
        match self.descriptors.iter_mut().find(|d| d.id == C::ID) {
            Some(existing) => *existing = descriptor,
            None => self.descriptors.push(descriptor),
        }
    }

    pub fn get(&self, id: &str) -> Option<&ControllerDescriptor> {
        self.descriptors.iter().find(|d| d.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.descriptors.iter().map(|d| d.id)
    }

    pub fn descriptors(&self) -> &[ControllerDescriptor] {
        &self.descriptors
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}
