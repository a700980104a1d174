//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing events with structured fields
//!       (controller, action, uri, method, request_id)
//!
//! Consumers:
//!     → logging.rs (fmt layer to stdout, EnvFilter)
//! ```
//!
//! # Design Decisions
//! - Structured fields instead of interpolated messages
//! - Request ID flows from the HTTP boundary into dispatch logs

pub mod logging;
