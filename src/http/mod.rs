//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (axum setup, request ID, timeout, trace)
//!     → routing::Router::dispatch(path, method, &mut Response)
//!     → response.rs (status, headers, body written by the action)
//!     → Send to client
//! ```

pub mod response;
pub mod server;

pub use response::Response;
pub use server::{HttpServer, X_REQUEST_ID};
