//! Controller declarations.
//!
//! A controller is a container component that lists its actions. Each action
//! carries zero or more [`Route`] declarations and a plain function pointer
//! that the router invokes positionally with the captured parameters.

use crate::container::Component;
use crate::http::Response;
use crate::routing::params::Params;
use crate::routing::route::Route;

/// Error type actions may return.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

pub type HandlerResult = Result<(), HandlerError>;

/// Signature of an action on controller `C`.
pub type Handler<C> = fn(&C, &Params, &mut Response) -> HandlerResult;

/// A named action and the routes that reach it.
pub struct Action<C> {
    name: &'static str,
    routes: Vec<Route>,
    handler: Handler<C>,
}

impl<C> Action<C> {
    pub fn new(name: &'static str, handler: Handler<C>) -> Self {
        Self {
            name,
            routes: Vec::new(),
            handler,
        }
    }

    /// Attach a route declaration. An action may carry several.
    pub fn route(mut self, route: Route) -> Self {
        self.routes.push(route);
        self
    }

    /// Shorthand for a `GET` route.
    pub fn get(self, path: impl Into<String>) -> Self {
        self.route(Route::new(path))
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub(crate) fn into_parts(self) -> (&'static str, Vec<Route>, Handler<C>) {
        (self.name, self.routes, self.handler)
    }
}

/// A component whose actions are reachable through the router.
pub trait Controller: Component {
    /// Actions in declaration order.
    fn actions() -> Vec<Action<Self>>;
}
