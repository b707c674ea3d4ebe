//! The router registry: one router per defining unit, created once.
//!
//! A [`Registry`] caches routers keyed by a defining-unit identifier.
//! Repeated lookups for the same identifier return the same `Arc<Router>`,
//! so registration state accumulates across calls and across dispatches.
//! Entries are never removed; the cache lives as long as the registry.
//!
//! The registry is an explicit owned object rather than hidden process
//! state: a server holds one and passes routers around by reference. For
//! code that wants the original's `detect()` convenience there is a single
//! process-wide default instance behind [`Registry::global`].

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use once_cell::sync::Lazy;

use ham_rs_core::HamResult;

use crate::router::Router;

/// The defining-unit identifier of the process-root router.
pub const ROOT_UNIT: &str = "root";

static GLOBAL: Lazy<Registry> = Lazy::new(Registry::new);

/// A process-lifetime cache of routers keyed by defining-unit identifier.
///
/// # Examples
///
/// ```
/// use ham_rs_routing::{handler, Registry};
///
/// let registry = Registry::new();
/// let root = registry.root();
/// root.add("/about", handler(|_| Some("about".to_string())), None).unwrap();
///
/// // Same identifier, same router.
/// assert!(std::sync::Arc::ptr_eq(&root, &registry.root()));
/// ```
#[derive(Default)]
pub struct Registry {
    routers: RwLock<HashMap<String, Arc<Router>>>,
}

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the process-wide default registry.
    ///
    /// Prefer owning a `Registry` where practical; this exists for
    /// entry-point code that has nowhere to thread one through.
    pub fn global() -> &'static Self {
        &GLOBAL
    }

    /// Returns the router for `unit`, creating and caching an empty one on
    /// first reference.
    ///
    /// Idempotent identity: repeated calls with the same identifier return
    /// the same router object.
    pub fn detect(&self, unit: &str) -> Arc<Router> {
        if let Some(router) = self
            .routers
            .read()
            .expect("registry lock poisoned")
            .get(unit)
        {
            return Arc::clone(router);
        }

        let mut routers = self.routers.write().expect("registry lock poisoned");
        Arc::clone(
            routers
                .entry(unit.to_string())
                .or_insert_with(|| Router::new(unit)),
        )
    }

    /// Returns the process-root router (`detect(ROOT_UNIT)`).
    pub fn root(&self) -> Arc<Router> {
        self.detect(ROOT_UNIT)
    }

    /// Two-phase construction: returns the router for `unit` immediately
    /// and schedules `loader` to populate it when matching first reaches
    /// it.
    ///
    /// The loader attaches only if the unit has neither a loader nor a
    /// completed population; later `declare` calls for the same unit keep
    /// the first loader.
    pub fn declare<F>(&self, unit: &str, loader: F) -> Arc<Router>
    where
        F: FnOnce(&Router) -> HamResult<()> + Send + 'static,
    {
        let router = self.detect(unit);
        router.attach_loader(Box::new(loader));
        router
    }

    /// Returns whether a router has been created for `unit`.
    pub fn contains(&self, unit: &str) -> bool {
        self.routers
            .read()
            .expect("registry lock poisoned")
            .contains_key(unit)
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let routers = self.routers.read().expect("registry lock poisoned");
        f.debug_struct("Registry")
            .field("units", &routers.keys().collect::<Vec<_>>())
            .finish()
    }
}
