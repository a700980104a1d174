//! Demo application: services, controllers and bootstrap wiring.

pub mod controllers;
pub mod services;

use std::sync::Arc;

use crate::config::DiscoveryConfig;
use crate::container::{Component, Container};
use crate::http::Response;
use crate::routing::{ControllerRegistry, Router, RouterError};

use self::controllers::{HomeController, UserController};
use self::services::{UserService, UserStore};

/// Abstract id the user controller depends on.
pub const USERS: &str = "users";

/// Every controller the application can mount.
pub fn registry() -> ControllerRegistry {
    ControllerRegistry::new()
        .with::<HomeController>()
        .with::<UserController>()
}

/// Container with the services registered and bound.
pub fn build_container() -> Container {
    let container = Container::new();
    container.register::<UserStore>();
    container.register::<UserService>();
    container.bind(USERS, UserService::ID);
    container
}

/// Build the router: registry, discovery or explicit registration, not-found hook.
pub fn bootstrap(config: &DiscoveryConfig) -> Result<Router, RouterError> {
    let container = Arc::new(build_container());
    let mut router = Router::new(container)
        .with_registry(registry())
        .with_discovery_policy(config.policy)
        .with_source_extension(config.extension.as_str());

    let controllers = match &config.controller_dir {
        Some(dir) => router.auto_register_controllers(dir)?,
        None => {
            router.register_all()?;
            router.registry().len()
        }
    };

    router.set_not_found_handler(not_found);

    tracing::info!(
        controllers,
        routes = router.routes().len(),
        "Router ready"
    );
    Ok(router)
}

/// Log the miss and render an explanatory 404.
pub fn not_found(uri: &str, method: &str, response: &mut Response) {
    tracing::error!(uri, method, "Route not found");
    response.set_status(404);
    response.write(&format!("Route {uri} with method {method} not found."));
}
