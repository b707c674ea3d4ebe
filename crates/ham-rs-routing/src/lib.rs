//! # ham-rs-routing
//!
//! URL routing and dispatch: compile URL templates with typed placeholders
//! into matchable patterns, register handlers and nested routers in an
//! ordered route table, and resolve `(url, method)` pairs to handler
//! invocations with positional parameters extracted from the URL.
//!
//! ## Modules
//!
//! - [`placeholders`] - The closed set of typed placeholder tokens
//! - [`pattern`] - URL template compilation
//! - [`router`] - Route table, registration, and the match/dispatch walk
//! - [`registry`] - One router per defining unit, populated lazily
//!
//! # Examples
//!
//! ```
//! use ham_rs_routing::{controller, handler, Registry};
//! use ham_rs_views::{Response, View};
//!
//! #[derive(Default)]
//! struct BlogView;
//!
//! impl View for BlogView {
//!     fn get(&mut self, args: &[String]) -> Option<Response> {
//!         Some(format!("post #{}", args[0]))
//!     }
//!
//!     fn allowed_methods(&self) -> Vec<String> {
//!         vec!["get".to_string()]
//!     }
//! }
//!
//! let registry = Registry::new();
//! let root = registry.root();
//! root.add("/about", handler(|_| Some("about us".to_string())), None).unwrap();
//!
//! let blog = registry.declare("blog", |r| {
//!     r.add("/<int>", controller::<BlogView>(), None)
//! });
//! root.add_module("/blog", &blog).unwrap();
//!
//! assert_eq!(root.resolve("/about", "get").unwrap().unwrap(), "about us");
//! assert_eq!(root.resolve("/blog/5", "get").unwrap().unwrap(), "post #5");
//! assert!(root.resolve("/blog/5", "delete").unwrap().is_none());
//! ```

pub mod pattern;
pub mod placeholders;
pub mod registry;
pub mod router;

pub use pattern::{compile, CompiledPattern};
pub use placeholders::Placeholder;
pub use registry::{Registry, ROOT_UNIT};
pub use router::{controller, handler, Handler, LoadState, RouteTarget, Router, UnitLoader};
