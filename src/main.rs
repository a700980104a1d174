//! controller-router
//!
//! Serves HTTP requests by dispatching them to controller actions.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ──────────────▶ http::server (axum fallback, request ID, timeout, trace)
//!                          │
//!                          ▼
//!                     routing::Router::dispatch(path, method)
//!                          │  first matching RouteEntry
//!                          ▼
//!                     container::Container::get(controller)
//!                          │  singleton, dependencies auto-wired
//!                          ▼
//!                     action(&controller, &params, &mut Response)
//!     Client Response      │
//!     ◀────────────────────┘
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;

use controller_router::app;
use controller_router::config::{load_config, AppConfig};
use controller_router::http::{HttpServer, Response};
use controller_router::lifecycle::{signals, Shutdown};
use controller_router::observability::logging::init_logging;
use controller_router::routing::Router;

#[derive(Parser)]
#[command(name = "controller-router")]
#[command(about = "Dispatch HTTP requests to container-managed controllers", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve HTTP (default)
    Serve,
    /// Print the route table in registration order
    Routes,
    /// Dispatch a single request and print the response
    Dispatch {
        /// HTTP verb, e.g. GET
        method: String,
        /// Request path, e.g. /user/2
        uri: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => AppConfig::default(),
    };

    init_logging(&config.observability);
    tracing::info!("controller-router v{} starting", env!("CARGO_PKG_VERSION"));

    let router = app::bootstrap(&config.discovery)?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve(config, router).await?,
        Commands::Routes => print_routes(&router),
        Commands::Dispatch { method, uri } => {
            let mut response = Response::new();
            router.dispatch(&uri, &method, &mut response)?;

            println!("{}", response.status());
            for (name, value) in response.headers() {
                println!("{name}: {value}");
            }
            println!();
            println!("{}", response.body());
        }
    }

    Ok(())
}

async fn serve(config: AppConfig, router: Router) -> Result<(), Box<dyn std::error::Error>> {
    if config.server.preload_controllers {
        let controllers = router.preload_controllers()?;
        tracing::info!(controllers, "Controllers preloaded");
    }

    let listener = TcpListener::bind(&config.server.bind_address).await?;
    tracing::info!(
        address = %listener.local_addr()?,
        request_timeout_secs = config.server.request_timeout_secs,
        "Listening for connections"
    );

    let shutdown = Arc::new(Shutdown::new());
    let server_shutdown = shutdown.subscribe();
    let signal_shutdown = shutdown.clone();
    tokio::spawn(async move {
        signals::shutdown_on_ctrl_c(&signal_shutdown).await;
    });

    let server = HttpServer::new(config.server, Arc::new(router));
    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

fn print_routes(router: &Router) {
    for entry in router.routes().iter() {
        println!(
            "{:<12} {:<24} {}::{}",
            entry.methods().join(","),
            entry.path(),
            entry.controller(),
            entry.action()
        );
    }
}
