//! The route table.
//!
//! # Responsibilities
//! - Flatten a controller's actions into route entries
//! - Keep entries in registration order
//! - Find the first entry matching a request
//!
//! # Design Decisions
//! - Append-only during startup, read-only afterwards
//! - No de-duplication: registering twice appends twice
//! - First match wins, never best match

use std::fmt;
use std::sync::Arc;

use crate::container::Instance;
use crate::http::Response;
use crate::routing::controller::Controller;
use crate::routing::error::RouterError;
use crate::routing::params::Params;
use crate::routing::pattern::PathPattern;
use crate::routing::route::Route;

/// Type-erased call of one action on a resolved controller instance.
type Invoker = Arc<dyn Fn(&Instance, &Params, &mut Response) -> Result<(), RouterError> + Send + Sync>;

/// One `(pattern, methods, controller, action)` registration.
pub struct RouteEntry {
    route: Route,
    pattern: PathPattern,
    controller: String,
    action: String,
    invoker: Invoker,
}

impl RouteEntry {
    pub fn path(&self) -> &str {
        self.route.path()
    }

    pub fn methods(&self) -> &[String] {
        self.route.methods()
    }

    pub fn controller(&self) -> &str {
        &self.controller
    }

    pub fn action(&self) -> &str {
        &self.action
    }

    /// Captured parameters if both the verb and the full URI match.
    pub fn matches(&self, uri: &str, method: &str) -> Option<Params> {
        if !self.route.accepts(method) {
            return None;
        }
        self.pattern.captures(uri).map(Params::new)
    }

    pub(crate) fn invoke(
        &self,
        instance: &Instance,
        params: &Params,
        response: &mut Response,
    ) -> Result<(), RouterError> {
        (self.invoker)(instance, params, response)
    }
}

impl fmt::Debug for RouteEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteEntry")
            .field("path", &self.route.path())
            .field("methods", &self.route.methods())
            .field("controller", &self.controller)
            .field("action", &self.action)
            .finish()
    }
}

/// Build one entry per `(action, route)` of `C`, in declaration order.
///
/// Fails on the first invalid pattern without producing any entry.
pub fn entries_for<C: Controller>() -> Result<Vec<RouteEntry>, RouterError> {
    let mut entries = Vec::new();

    for action in C::actions() {
        let (name, routes, handler) = action.into_parts();

        for route in routes {
            let pattern =
                PathPattern::compile(route.path()).map_err(|source| RouterError::InvalidPattern {
                    pattern: route.path().to_string(),
                    controller: C::ID.to_string(),
                    action: name.to_string(),
                    source,
                })?;

            let invoker: Invoker = Arc::new(
                move |instance: &Instance, params: &Params, response: &mut Response| {
                    let controller = (**instance).downcast_ref::<C>().ok_or_else(|| {
                        RouterError::ControllerType {
                            controller: C::ID.to_string(),
                        }
                    })?;

                    handler(controller, params, response).map_err(|source| RouterError::Handler {
                        controller: C::ID.to_string(),
                        action: name.to_string(),
                        source,
                    })
                },
            );

            entries.push(RouteEntry {
                route,
                pattern,
                controller: C::ID.to_string(),
                action: name.to_string(),
                invoker,
            });
        }
    }

    Ok(entries)
}

/// Ordered list of route entries.
#[derive(Debug, Default)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extend(&mut self, entries: Vec<RouteEntry>) {
        self.entries.extend(entries);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RouteEntry> {
        self.entries.iter()
    }

    /// Number of entries registered for a controller.
    pub fn count_for(&self, controller: &str) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.controller == controller)
            .count()
    }

    /// First entry, in registration order, that matches the request.
    pub fn find(&self, uri: &str, method: &str) -> Option<(&RouteEntry, Params)> {
        self.entries
            .iter()
            .find_map(|entry| entry.matches(uri, method).map(|params| (entry, params)))
    }
}
