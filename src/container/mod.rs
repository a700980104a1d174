//! Dependency-injection container.
//!
//! # Data Flow
//! ```text
//! Bootstrap:
//!     register::<T>()  → constructor table (id → params + build fn)
//!     bind(abstract, concrete | factory) → binding table
//!
//! Resolution (get):
//!     id → binding? ─ factory ─→ invoke(container) → instance (uncached)
//!                  └ concrete ─→ instantiate(concrete)
//!        → cached? → instance
//!        → params → get(dep) for each component param
//!        → build(args) → cache → instance
//! ```
//!
//! # Design Decisions
//! - Components declare their constructor parameters explicitly; no runtime reflection
//! - Singleton scope only: one instance per concrete id
//! - Cyclic graphs are reported as errors, not stack overflows
//! - Lock-free reads via DashMap; no lock held while constructing

pub mod binding;
pub mod component;
pub mod error;
pub mod injector;

pub use binding::{Binding, Factory};
pub use component::{Args, Component, Instance, Param, ParamKind};
pub use error::ContainerError;
pub use injector::Container;
