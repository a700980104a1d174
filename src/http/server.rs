//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the axum app whose fallback feeds every request to the dispatcher
//! - Wire up middleware (timeout, request ID, tracing)
//! - Render dispatch failures as 404 / 500 responses
//! - Serve until the shutdown signal fires

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response as HttpResponse},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ServerConfig;
use crate::http::response::Response;
use crate::routing::{Router as ControllerRouter, RouterError};

/// Header carrying the request ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Body sent when no route matches and no not-found handler is set.
pub const NOT_FOUND_BODY: &str = "Route not found.";

/// Body sent for every other dispatch failure.
pub const SERVER_ERROR_BODY: &str = "Fatal Error. See error log for details.";

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub router: Arc<ControllerRouter>,
}

/// HTTP front end for the controller router.
pub struct HttpServer {
    app: Router,
}

impl HttpServer {
    /// Create a new HTTP server around a fully registered router.
    pub fn new(config: ServerConfig, router: Arc<ControllerRouter>) -> Self {
        let app = Self::build_app(&config, AppState { router });
        Self { app }
    }

    /// Build the axum app with all middleware layers.
    #[allow(deprecated)]
    fn build_app(config: &ServerConfig, state: AppState) -> Router {
        Router::new()
            .fallback(dispatch_handler)
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout_secs)))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// Run the server until `shutdown` receives a signal.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Fallback handler: every request goes through the controller router.
async fn dispatch_handler(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> HttpResponse {
    let request_id = headers
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string();

    tracing::debug!(
        request_id = %request_id,
        method = %method,
        path = %uri.path(),
        "Dispatching request"
    );

    let mut response = Response::new();
    match state.router.dispatch(uri.path(), method.as_str(), &mut response) {
        Ok(()) => response.into_response(),
        Err(err) => render_error(&request_id, &err),
    }
}

/// Map a dispatch failure to the client-facing response.
pub fn render_error(request_id: &str, err: &RouterError) -> HttpResponse {
    if err.is_not_found() {
        tracing::warn!(request_id = %request_id, error = %err, "No route matched");
        (StatusCode::NOT_FOUND, NOT_FOUND_BODY).into_response()
    } else {
        tracing::error!(request_id = %request_id, error = %err, "Dispatch failed");
        (StatusCode::INTERNAL_SERVER_ERROR, SERVER_ERROR_BODY).into_response()
    }
}
