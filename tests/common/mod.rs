//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::net::TcpListener;

use controller_router::config::ServerConfig;
use controller_router::container::{Args, Component, Container, ContainerError, Instance, Param};
use controller_router::http::{HttpServer, Response};
use controller_router::lifecycle::Shutdown;
use controller_router::routing::{
    Action, Controller, ControllerRegistry, HandlerResult, Params, Route, Router,
};

/// Abstract id the blog controller depends on.
pub const GREETER: &str = "greeter";

/// Counts constructions so tests can observe singleton behavior.
pub static COUNTER_BUILDS: AtomicUsize = AtomicUsize::new(0);

pub struct Counter {
    pub serial: usize,
}

impl Component for Counter {
    const ID: &'static str = "fixtures::Counter";

    fn construct(_args: &mut Args) -> Result<Self, ContainerError> {
        let serial = COUNTER_BUILDS.fetch_add(1, Ordering::SeqCst);
        Ok(Counter { serial })
    }
}

pub trait Greet: Send + Sync {
    fn greet(&self, name: &str) -> String;
}

pub struct Polite;

impl Component for Polite {
    const ID: &'static str = "fixtures::Polite";

    fn construct(_args: &mut Args) -> Result<Self, ContainerError> {
        Ok(Polite)
    }
}

impl Greet for Polite {
    fn greet(&self, name: &str) -> String {
        format!("Good day, {name}")
    }
}

pub struct Casual;

impl Component for Casual {
    const ID: &'static str = "fixtures::Casual";

    fn construct(_args: &mut Args) -> Result<Self, ContainerError> {
        Ok(Casual)
    }
}

impl Greet for Casual {
    fn greet(&self, name: &str) -> String {
        format!("hey {name}")
    }
}

/// Greeter behind the `GREETER` binding, resolved through a factory.
pub struct Greeter(pub Arc<dyn Greet>);

/// Blog controller: overlapping routes, captures, an injected greeter.
pub struct BlogController {
    greeter: Arc<Greeter>,
    counter: Arc<Counter>,
}

impl BlogController {
    fn post(&self, params: &Params, response: &mut Response) -> HandlerResult {
        let year = params.require(0)?;
        let slug = params.require(1)?;
        response.write(&format!("post {year}/{slug}"));
        Ok(())
    }

    fn archive(&self, params: &Params, response: &mut Response) -> HandlerResult {
        response.write(&format!("archive {}", params.require(0)?));
        Ok(())
    }

    fn hello(&self, params: &Params, response: &mut Response) -> HandlerResult {
        response.write(&self.greeter.0.greet(params.require(0)?));
        Ok(())
    }

    fn serial(&self, _params: &Params, response: &mut Response) -> HandlerResult {
        response.write(&self.counter.serial.to_string());
        Ok(())
    }

    fn submit(&self, _params: &Params, response: &mut Response) -> HandlerResult {
        response.set_status(201);
        response.write("created");
        Ok(())
    }

    fn broken(&self, _params: &Params, _response: &mut Response) -> HandlerResult {
        Err("storage offline".into())
    }
}

impl Component for BlogController {
    const ID: &'static str = "fixtures::BlogController";

    fn params() -> Vec<Param> {
        vec![
            Param::abstract_id("greeter", GREETER),
            Param::component::<Counter>("counter"),
        ]
    }

    fn construct(args: &mut Args) -> Result<Self, ContainerError> {
        Ok(BlogController {
            greeter: args.take()?,
            counter: args.take()?,
        })
    }
}

impl Controller for BlogController {
    fn actions() -> Vec<Action<Self>> {
        vec![
            Action::new("post", BlogController::post).get(r"/blog/(\d{4})/([a-z-]+)"),
            Action::new("archive", BlogController::archive).get(r"/blog/(.+)"),
            Action::new("hello", BlogController::hello).get(r"/hello/(\w+)"),
            Action::new("serial", BlogController::serial).get("/serial"),
            Action::new("submit", BlogController::submit)
                .route(Route::with_methods("/submit", ["POST", "PUT"])),
            Action::new("broken", BlogController::broken).get("/broken"),
        ]
    }
}

/// Router with the blog controller registered and a polite greeter bound.
pub fn blog_router() -> Router {
    let container = Arc::new(Container::new());
    container.register::<Counter>();
    container.register::<Polite>();
    container.register::<Casual>();

    let registry = ControllerRegistry::new().with::<BlogController>();
    let mut router = Router::new(container).with_registry(registry);
    router.register::<BlogController>().unwrap();
    bind_greeter::<Polite>(&router);
    router
}

/// Point `GREETER` at a fresh wrapper around component `G`.
pub fn bind_greeter<G: Component + Greet>(router: &Router) {
    router.container().bind_factory(GREETER, |container| {
        let inner: Arc<dyn Greet> = container.component::<G>()?;
        Ok(Arc::new(Greeter(inner)) as Instance)
    });
}

/// Serve `router` on an ephemeral port. Returns the address and the shutdown handle.
pub async fn spawn_server(router: Router) -> (SocketAddr, Arc<Shutdown>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Arc::new(Shutdown::new());
    let server = HttpServer::new(ServerConfig::default(), Arc::new(router));
    let receiver = shutdown.subscribe();
    tokio::spawn(async move {
        server.run(listener, receiver).await.unwrap();
    });

    (addr, shutdown)
}
