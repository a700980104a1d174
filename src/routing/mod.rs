//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Registration (at startup):
//!     ControllerRegistry (explicit list)
//!     → discovery.rs (optional: pick controllers from a source tree)
//!     → table.rs (flatten actions × routes, compile patterns)
//!     → Freeze as read-only RouteTable
//!
//! Dispatch (per request):
//!     (uri, method)
//!     → router.rs (linear scan, first match)
//!     → Container::get(controller)
//!     → action(&controller, &params, &mut response)
//!     → or not-found handler / RouteNotFound
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - First match wins, in registration order
//! - Route paths are regular expressions anchored to the full URI
//! - Controllers are listed explicitly; discovery never loads code

pub mod controller;
pub mod discovery;
pub mod error;
pub mod params;
pub mod pattern;
pub mod registry;
pub mod route;
pub mod router;
pub mod table;

pub use controller::{Action, Controller, Handler, HandlerError, HandlerResult};
pub use discovery::{DiscoveredUnit, DiscoveryPolicy};
pub use error::RouterError;
pub use params::{ParamError, Params};
pub use registry::{ControllerDescriptor, ControllerRegistry};
pub use route::Route;
pub use router::{NotFoundHandler, Router};
pub use table::{RouteEntry, RouteTable};
