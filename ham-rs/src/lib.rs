//! # ham-rs
//!
//! A minimal URL routing and dispatch layer. Routes map a `(path, method)`
//! pair to a handler (a plain closure or a controller-style view) and
//! invoke it with positional parameters extracted from the URL. Routers
//! nest under mount prefixes and can be populated lazily, the first time a
//! dispatch reaches them.
//!
//! This is the meta-crate that re-exports the sub-crates for convenient
//! access; depend on the individual crates for finer-grained control.
//!
//! # Examples
//!
//! ```
//! use ham_rs::routing::{handler, Registry};
//!
//! let registry = Registry::new();
//! let root = registry.root();
//! root.add("/post/<int>", handler(|args| Some(format!("post {}", args[0]))), Some(&["get"]))
//!     .unwrap();
//!
//! assert_eq!(root.resolve("/post/42", "get").unwrap().unwrap(), "post 42");
//! assert!(root.resolve("/post/42", "post").unwrap().is_none());
//! ```

/// Error types and logging helpers.
pub use ham_rs_core as core;

/// URL routing: pattern compiler, route table, nested routers, registry.
pub use ham_rs_routing as routing;

/// Controller layer: the `View` trait and per-dispatch lifecycle.
pub use ham_rs_views as views;

pub use ham_rs_core::{HamError, HamResult};
pub use ham_rs_routing::{controller, handler, Registry, Router};
pub use ham_rs_views::{Response, View};

// Third-party crates surfaced for downstream convenience.
pub use tracing;
