//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (app::bootstrap):
//!     Load config → Build container → Register controllers → Preload → Serve
//!
//! Shutdown (shutdown.rs):
//!     Signal received → broadcast → server stops accepting → drain → exit
//!
//! Signals (signals.rs):
//!     SIGINT (Ctrl+C) → Trigger graceful shutdown
//! ```

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
