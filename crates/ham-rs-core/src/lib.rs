//! # ham-rs-core
//!
//! Error types and logging helpers shared by the ham-rs crates. This crate
//! has no routing logic of its own and exists so that the routing and view
//! layers agree on a single error vocabulary.
//!
//! ## Modules
//!
//! - [`error`] - Error types and result alias
//! - [`logging`] - Tracing-based logging integration

pub mod error;
pub mod logging;

// Re-export the most commonly used types at the crate root.
pub use error::{HamError, HamResult};
