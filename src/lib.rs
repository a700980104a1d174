//! Controller dispatch layer with a dependency-injection container.

pub mod app;
pub mod config;
pub mod container;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use config::AppConfig;
pub use container::{Component, Container};
pub use http::{HttpServer, Response};
pub use lifecycle::Shutdown;
pub use routing::{Controller, Router, RouterError};
