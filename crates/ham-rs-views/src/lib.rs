//! # ham-rs-views
//!
//! Controller layer for ham-rs. A "view" is a controller object whose
//! methods service individual HTTP verbs; the routing layer constructs one
//! per dispatch, runs its setup hook, and invokes the method matching the
//! request.
//!
//! ## Modules
//!
//! - [`view`] - The [`View`] trait and method dispatch
//! - [`lifecycle`] - Per-dispatch construction and the prepare-once contract

pub mod lifecycle;
pub mod view;

pub use lifecycle::{view_factory, PreparedView, ViewFactory};
pub use view::{Response, View, KNOWN_METHODS};
