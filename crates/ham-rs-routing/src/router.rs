//! The router: route registration and the match/dispatch walk.
//!
//! A [`Router`] owns an ordered route table whose values are either
//! terminal entries (a [`RouteTarget`] plus its allowed methods) or nested
//! routers mounted under a path prefix. Matching walks the table in
//! insertion order and recurses into nested routers by stripping the mount
//! prefix from the front of the URL.
//!
//! **Registration order is the only precedence signal.** There is no
//! length- or specificity-based reordering: given two patterns that both
//! match a URL, the one registered first wins. Hand-ordered route tables
//! depend on this.

use std::fmt;
use std::sync::{Arc, Mutex};

use ham_rs_core::{HamError, HamResult};
use ham_rs_views::{view_factory, PreparedView, Response, View, ViewFactory};

use crate::pattern::{compile, CompiledPattern};

/// A plain callable handler: positional URL arguments in, optional response
/// body out.
pub type Handler = Arc<dyn Fn(&[String]) -> Option<Response> + Send + Sync>;

/// A closure that populates a router's table when its defining unit is
/// first reached during matching.
pub type UnitLoader = Box<dyn FnOnce(&Router) -> HamResult<()> + Send>;

/// The allowed-method default for plain callables registered without an
/// explicit method list.
const CALLABLE_DEFAULT_METHODS: [&str; 3] = ["get", "post", "head"];

/// What a terminal route dispatches to.
///
/// The route table discriminates explicitly between plain callables,
/// controller factories, and nested routers; this enum covers the two
/// terminal cases. Construct values with [`handler`] or [`controller`].
#[derive(Clone)]
pub enum RouteTarget {
    /// A plain callable, invoked directly with the captured arguments.
    Callable(Handler),
    /// A controller factory; each dispatch constructs a fresh view, runs
    /// its setup hook, and invokes the method matching the request.
    Controller(ViewFactory),
}

impl fmt::Debug for RouteTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Callable(_) => f.write_str("Callable"),
            Self::Controller(_) => f.write_str("Controller"),
        }
    }
}

/// Wraps a closure as a [`RouteTarget::Callable`].
///
/// # Examples
///
/// ```
/// use ham_rs_routing::{handler, Router};
///
/// let router = Router::new("root");
/// router
///     .add("/hello", handler(|_args| Some("hi".to_string())), None)
///     .unwrap();
/// assert_eq!(router.resolve("/hello", "get").unwrap().unwrap(), "hi");
/// ```
pub fn handler<F>(f: F) -> RouteTarget
where
    F: Fn(&[String]) -> Option<Response> + Send + Sync + 'static,
{
    RouteTarget::Callable(Arc::new(f))
}

/// Wraps a view type as a [`RouteTarget::Controller`].
pub fn controller<V>() -> RouteTarget
where
    V: View + Default + 'static,
{
    RouteTarget::Controller(view_factory::<V>())
}

/// One route-table value.
#[derive(Clone)]
enum RouteEntry {
    /// Dispatch stops here on a match with an allowed method.
    Terminal {
        pattern: CompiledPattern,
        target: RouteTarget,
        methods: Vec<String>,
    },
    /// Prefix-based delegation to a sub-tree of routes.
    Nested {
        pattern: CompiledPattern,
        router: Arc<Router>,
    },
}

impl RouteEntry {
    fn pattern(&self) -> &CompiledPattern {
        match self {
            Self::Terminal { pattern, .. } | Self::Nested { pattern, .. } => pattern,
        }
    }
}

/// An ordered mapping from compiled-pattern key to route entry.
///
/// Insertion order is preserved; re-inserting an existing key overwrites
/// the value *in place*, keeping the original position (mapping semantics,
/// not a list of independent slots).
#[derive(Default)]
struct RouteTable {
    entries: Vec<RouteEntry>,
}

impl RouteTable {
    fn insert(&mut self, entry: RouteEntry) {
        let key = entry.pattern().key().to_string();
        if let Some(slot) = self
            .entries
            .iter_mut()
            .find(|e| e.pattern().key() == key)
        {
            *slot = entry;
        } else {
            self.entries.push(entry);
        }
    }

    fn snapshot(&self) -> Vec<RouteEntry> {
        self.entries.clone()
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Lazy-population state of a router's defining unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    /// The defining unit has not been consulted yet.
    Unloaded,
    /// The defining unit is running right now.
    Populating,
    /// The defining unit has been consulted (successfully or not); it will
    /// not run again.
    Populated,
}

/// A router: a mount prefix, an ordered route table, and an optional
/// lazily-run defining unit.
///
/// Routers are shared via `Arc` and internally synchronized. Mutation is
/// append-only while a dispatch tree is alive: handlers and unit loaders
/// may register further routes, but nothing is ever removed.
pub struct Router {
    /// Identifier of the defining unit this router belongs to.
    unit: String,
    /// Mount prefix, set when the router is attached via
    /// [`Router::add_module`]. Empty for the root.
    prefix: Mutex<String>,
    table: Mutex<RouteTable>,
    state: Mutex<LoadState>,
    loader: Mutex<Option<UnitLoader>>,
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("unit", &self.unit)
            .field("prefix", &self.prefix())
            .field("routes", &self.table.lock().expect("route table lock poisoned").len())
            .field("state", &self.load_state())
            .finish()
    }
}

impl Router {
    /// Creates an empty router with no defining unit to load.
    pub fn new(unit: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            unit: unit.into(),
            prefix: Mutex::new(String::new()),
            table: Mutex::new(RouteTable::default()),
            state: Mutex::new(LoadState::Unloaded),
            loader: Mutex::new(None),
        })
    }

    /// Creates a router whose table is populated by `loader` the first time
    /// matching reaches it.
    pub fn with_loader<F>(unit: impl Into<String>, loader: F) -> Arc<Self>
    where
        F: FnOnce(&Self) -> HamResult<()> + Send + 'static,
    {
        let router = Self::new(unit);
        router.attach_loader(Box::new(loader));
        router
    }

    /// Returns the defining-unit identifier.
    pub fn unit(&self) -> &str {
        &self.unit
    }

    /// Returns the mount prefix (empty for a root router).
    pub fn prefix(&self) -> String {
        self.prefix.lock().expect("prefix lock poisoned").clone()
    }

    /// Returns the current lazy-population state.
    pub fn load_state(&self) -> LoadState {
        *self.state.lock().expect("router state lock poisoned")
    }

    /// Attaches a defining-unit loader if the router is still unloaded and
    /// has none. A loader already attached (or a unit already consulted)
    /// wins; the call is then a no-op.
    pub(crate) fn attach_loader(&self, loader: UnitLoader) {
        let state = self.state.lock().expect("router state lock poisoned");
        if *state != LoadState::Unloaded {
            return;
        }
        let mut slot = self.loader.lock().expect("loader lock poisoned");
        if slot.is_none() {
            *slot = Some(loader);
        }
    }

    /// Registers a terminal route.
    ///
    /// With `methods: None` the allowed set defaults to `{get, post, head}`
    /// for callables and to the controller's
    /// [`allowed_methods`](View::allowed_methods) (probed from a fresh,
    /// unprepared instance) for controllers. Method names are normalized to
    /// lowercase.
    ///
    /// The template is compiled with the wildcard disabled; a template
    /// compiling to an already-registered pattern overwrites that entry in
    /// place.
    ///
    /// # Errors
    ///
    /// Fails fast on malformed templates and on an explicit empty method
    /// list.
    pub fn add(
        &self,
        template: &str,
        target: RouteTarget,
        methods: Option<&[&str]>,
    ) -> HamResult<()> {
        let pattern = compile(template, false)?;

        let methods: Vec<String> = match methods {
            Some([]) => {
                return Err(HamError::ImproperlyConfigured(format!(
                    "empty method list for route '{template}'"
                )))
            }
            Some(list) => list.iter().map(|m| m.to_ascii_lowercase()).collect(),
            None => match &target {
                RouteTarget::Callable(_) => CALLABLE_DEFAULT_METHODS
                    .iter()
                    .map(ToString::to_string)
                    .collect(),
                RouteTarget::Controller(factory) => {
                    // Probe without running the setup hook; prepare() is
                    // reserved for real dispatches.
                    let probe = factory();
                    probe
                        .allowed_methods()
                        .iter()
                        .map(|m| m.to_ascii_lowercase())
                        .collect()
                }
            },
        };

        tracing::debug!(unit = %self.unit, template, ?methods, "registered route");
        self.table
            .lock()
            .expect("route table lock poisoned")
            .insert(RouteEntry::Terminal {
                pattern,
                target,
                methods,
            });
        Ok(())
    }

    /// Mounts a nested router under `prefix`.
    ///
    /// The child's mount prefix is set to `prefix` with the trailing slash
    /// stripped, and the table gains a wildcard-enabled entry for the
    /// prefix that delegates to the child. Returns the child for chaining.
    ///
    /// # Errors
    ///
    /// Fails fast if the prefix does not compile.
    pub fn add_module(&self, prefix: &str, module: &Arc<Self>) -> HamResult<Arc<Self>> {
        let pattern = compile(prefix, true)?;
        *module.prefix.lock().expect("prefix lock poisoned") =
            prefix.trim_end_matches('/').to_string();

        tracing::debug!(unit = %self.unit, prefix, child = %module.unit, "mounted nested router");
        self.table
            .lock()
            .expect("route table lock poisoned")
            .insert(RouteEntry::Nested {
                pattern,
                router: Arc::clone(module),
            });
        Ok(Arc::clone(module))
    }

    /// Resolves `url` to a response by walking the route table.
    ///
    /// Entries are scanned in insertion order; the first matching terminal
    /// entry whose method set contains the (case-insensitively compared)
    /// request method is invoked and its result returned immediately, even
    /// when the handler itself produced `None`. A nested router whose
    /// prefix matches is populated (its defining unit runs exactly once)
    /// and recursed into; if nothing inside it matches, scanning continues
    /// with subsequent siblings rather than failing. `Ok(None)` means no
    /// route matched at any level; the caller decides what a not-found
    /// response looks like.
    ///
    /// # Errors
    ///
    /// Returns [`HamError::LoadFailed`] if a defining unit reached during
    /// the walk fails to populate its router.
    pub fn resolve(&self, url: &str, method: &str) -> HamResult<Option<Response>> {
        self.ensure_populated()?;
        let method = method.to_ascii_lowercase();

        // Snapshot so handlers and loaders may register routes while the
        // walk is in progress (mutation is append-only).
        let entries = self
            .table
            .lock()
            .expect("route table lock poisoned")
            .snapshot();

        for entry in entries {
            match entry {
                RouteEntry::Nested { pattern, router } => {
                    if !pattern.is_match(url) {
                        continue;
                    }
                    let prefix = router.prefix();
                    let Some(inner) = url.strip_prefix(prefix.as_str()) else {
                        continue;
                    };
                    tracing::trace!(unit = %self.unit, prefix = %prefix, inner, "descending");
                    if let Some(response) = router.resolve(inner, &method)? {
                        return Ok(Some(response));
                    }
                    // Prefix matched but nothing beneath it did: fall
                    // through to sibling entries.
                }
                RouteEntry::Terminal {
                    pattern,
                    target,
                    methods,
                } => {
                    let Some(args) = pattern.match_args(url) else {
                        continue;
                    };
                    if !methods.iter().any(|m| m == &method) {
                        continue;
                    }
                    tracing::trace!(
                        unit = %self.unit,
                        template = pattern.template(),
                        ?args,
                        "matched terminal route"
                    );
                    let response = match &target {
                        RouteTarget::Callable(f) => f(&args),
                        RouteTarget::Controller(factory) => {
                            let mut view = PreparedView::resolve(factory);
                            view.dispatch(&method, &args)
                        }
                    };
                    return Ok(response);
                }
            }
        }
        Ok(None)
    }

    /// Runs the defining unit if it has not been consulted yet.
    ///
    /// The state lock is held across population, so concurrent dispatches
    /// block until the table is complete and can never observe a torn
    /// read. The unit runs at most once; a loader failure is reported but
    /// not retried. A loader must not dispatch back into the router it is
    /// populating.
    fn ensure_populated(&self) -> HamResult<()> {
        let mut state = self.state.lock().expect("router state lock poisoned");
        if *state == LoadState::Populated {
            return Ok(());
        }
        *state = LoadState::Populating;

        let loader = self.loader.lock().expect("loader lock poisoned").take();
        let result = match loader {
            Some(load) => {
                tracing::debug!(unit = %self.unit, "populating router");
                load(self).map_err(|e| match e {
                    already @ HamError::LoadFailed { .. } => already,
                    other => HamError::load_failed(self.unit.clone(), other),
                })
            }
            None => Ok(()),
        };

        *state = LoadState::Populated;
        result
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    fn ok(body: &str) -> RouteTarget {
        let body = body.to_string();
        handler(move |_args| Some(body.clone()))
    }

    #[test]
    fn test_add_and_resolve_literal() {
        let router = Router::new("root");
        router.add("/about", ok("about"), None).unwrap();

        assert_eq!(router.resolve("/about", "get").unwrap().unwrap(), "about");
        assert_eq!(router.resolve("/about/", "get").unwrap().unwrap(), "about");
        assert!(router.resolve("/about/extra", "get").unwrap().is_none());
        assert!(router.resolve("/elsewhere", "get").unwrap().is_none());
    }

    #[test]
    fn test_callable_default_methods() {
        let router = Router::new("root");
        router.add("/x", ok("x"), None).unwrap();

        assert!(router.resolve("/x", "get").unwrap().is_some());
        assert!(router.resolve("/x", "post").unwrap().is_some());
        assert!(router.resolve("/x", "head").unwrap().is_some());
        assert!(router.resolve("/x", "delete").unwrap().is_none());
    }

    #[test]
    fn test_method_names_normalized_to_lowercase() {
        let router = Router::new("root");
        router.add("/x", ok("x"), Some(&["GET"])).unwrap();

        assert!(router.resolve("/x", "get").unwrap().is_some());
        assert!(router.resolve("/x", "GET").unwrap().is_some());
        assert!(router.resolve("/x", "post").unwrap().is_none());
    }

    #[test]
    fn test_positional_args_reach_handler() {
        let router = Router::new("root");
        router
            .add(
                "/post/<int>",
                handler(|args| Some(format!("post {}", args[0]))),
                Some(&["get"]),
            )
            .unwrap();

        assert_eq!(
            router.resolve("/post/42", "get").unwrap().unwrap(),
            "post 42"
        );
        assert!(router.resolve("/post/42", "post").unwrap().is_none());
        assert!(router.resolve("/post/abc", "get").unwrap().is_none());
    }

    #[test]
    fn test_registration_order_wins() {
        let router = Router::new("root");
        router.add("/item/<string>", ok("by-slug"), None).unwrap();
        router.add("/item/<int>", ok("by-id"), None).unwrap();

        // "42" matches both patterns; the first registration wins.
        assert_eq!(
            router.resolve("/item/42", "get").unwrap().unwrap(),
            "by-slug"
        );
    }

    #[test]
    fn test_duplicate_pattern_overwrites_in_place() {
        let router = Router::new("root");
        router.add("/a", ok("first"), None).unwrap();
        router.add("/b", ok("b"), None).unwrap();
        // Same compiled pattern as "/a": replaces the value but keeps the
        // original table position.
        router.add("/a/", ok("second"), None).unwrap();

        assert_eq!(router.resolve("/a", "get").unwrap().unwrap(), "second");
        assert_eq!(
            router
                .table
                .lock()
                .unwrap()
                .len(),
            2
        );
    }

    #[test]
    fn test_terminal_match_returns_handler_none_verbatim() {
        let router = Router::new("root");
        router.add("/maybe", handler(|_| None), None).unwrap();
        router.add("/<string>", ok("fallback"), None).unwrap();

        // The first matching terminal wins even though its handler produced
        // None; later entries that also match are not consulted.
        assert!(router.resolve("/maybe", "get").unwrap().is_none());
        assert_eq!(router.resolve("/other", "get").unwrap().unwrap(), "fallback");
    }

    #[test]
    fn test_disallowed_method_falls_through_to_later_route() {
        let router = Router::new("root");
        router.add("/x", ok("get-only"), Some(&["get"])).unwrap();
        // Different compiled key (placeholder), also matching "/x".
        router.add("/<string>", ok("fallback"), Some(&["post"])).unwrap();

        assert_eq!(router.resolve("/x", "get").unwrap().unwrap(), "get-only");
        assert_eq!(router.resolve("/x", "post").unwrap().unwrap(), "fallback");
    }

    #[test]
    fn test_empty_method_list_rejected() {
        let router = Router::new("root");
        let err = router.add("/x", ok("x"), Some(&[])).unwrap_err();
        assert!(matches!(err, HamError::ImproperlyConfigured(_)));
    }

    #[test]
    fn test_malformed_template_fails_fast() {
        let router = Router::new("root");
        assert!(router.add("/x/<bogus>", ok("x"), None).is_err());
        assert!(router.resolve("/x/1", "get").unwrap().is_none());
    }

    #[test]
    fn test_nested_router_delegation() {
        let blog = Router::new("blog");
        blog.add("/<int>", handler(|args| Some(format!("blog {}", args[0]))), None)
            .unwrap();

        let root = Router::new("root");
        root.add_module("/blog", &blog).unwrap();

        assert_eq!(blog.prefix(), "/blog");
        assert_eq!(
            root.resolve("/blog/5", "get").unwrap().unwrap(),
            "blog 5"
        );
    }

    #[test]
    fn test_prefix_match_with_unmatched_suffix_falls_through() {
        let blog = Router::new("blog");
        blog.add("/<int>", ok("inner"), None).unwrap();

        let root = Router::new("root");
        root.add_module("/blog", &blog).unwrap();
        root.add("/blog/special", ok("sibling"), None).unwrap();

        // "/blog/special" enters the nested router first, matches nothing
        // inside, and control returns to the parent table.
        assert_eq!(
            root.resolve("/blog/special", "get").unwrap().unwrap(),
            "sibling"
        );
        // Entirely unmatched suffixes yield None overall.
        assert!(root.resolve("/blogs", "get").unwrap().is_none());
    }

    #[test]
    fn test_lazy_loader_runs_once_on_first_reach() {
        static LOADS: AtomicUsize = AtomicUsize::new(0);

        let blog = Router::with_loader("blog", |r| {
            LOADS.fetch_add(1, Ordering::SeqCst);
            r.add("/<int>", handler(|args| Some(args[0].clone())), None)
        });

        let root = Router::new("root");
        root.add_module("/blog", &blog).unwrap();

        assert_eq!(LOADS.load(Ordering::SeqCst), 0);
        assert_eq!(blog.load_state(), LoadState::Unloaded);

        // A dispatch that never reaches the prefix does not populate it.
        assert!(root.resolve("/other", "get").unwrap().is_none());
        assert_eq!(LOADS.load(Ordering::SeqCst), 0);

        assert_eq!(root.resolve("/blog/7", "get").unwrap().unwrap(), "7");
        assert_eq!(LOADS.load(Ordering::SeqCst), 1);
        assert_eq!(blog.load_state(), LoadState::Populated);

        assert_eq!(root.resolve("/blog/9", "get").unwrap().unwrap(), "9");
        assert_eq!(LOADS.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_loader_failure_surfaces_and_does_not_retry() {
        static LOADS: AtomicUsize = AtomicUsize::new(0);

        let broken = Router::with_loader("broken", |r| {
            LOADS.fetch_add(1, Ordering::SeqCst);
            r.add("/<bogus>", handler(|_| None), None)
        });

        let root = Router::new("root");
        root.add_module("/broken", &broken).unwrap();

        let err = root.resolve("/broken/1", "get").unwrap_err();
        assert!(matches!(err, HamError::LoadFailed { ref unit, .. } if unit == "broken"));
        assert_eq!(LOADS.load(Ordering::SeqCst), 1);

        // The unit is consulted exactly once; the router stays empty.
        assert!(root.resolve("/broken/1", "get").unwrap().is_none());
        assert_eq!(LOADS.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_controller_route_lifecycle() {
        static PREPARES: AtomicUsize = AtomicUsize::new(0);

        #[derive(Default)]
        struct BlogView {
            posts: Vec<String>,
        }

        impl View for BlogView {
            fn prepare(&mut self) {
                PREPARES.fetch_add(1, Ordering::SeqCst);
                self.posts = vec!["zero".to_string(), "one".to_string()];
            }

            fn get(&mut self, args: &[String]) -> Option<Response> {
                let id: usize = args.first()?.parse().ok()?;
                self.posts.get(id).cloned()
            }

            fn allowed_methods(&self) -> Vec<String> {
                vec!["get".to_string()]
            }
        }

        PREPARES.store(0, Ordering::SeqCst);
        let router = Router::new("root");
        router.add("/post/<int>", controller::<BlogView>(), None).unwrap();

        // Derived method set comes from allowed_methods(); probing for it
        // does not run the setup hook.
        assert_eq!(PREPARES.load(Ordering::SeqCst), 0);
        assert!(router.resolve("/post/0", "post").unwrap().is_none());
        assert_eq!(PREPARES.load(Ordering::SeqCst), 0);

        assert_eq!(router.resolve("/post/1", "get").unwrap().unwrap(), "one");
        assert_eq!(PREPARES.load(Ordering::SeqCst), 1);

        // Each dispatch prepares a fresh instance.
        assert_eq!(router.resolve("/post/0", "get").unwrap().unwrap(), "zero");
        assert_eq!(PREPARES.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_page_placeholder_passes_two_args() {
        let router = Router::new("root");
        router
            .add(
                "/archive/<page>",
                handler(|args| Some(format!("{}|{}", args[0], args[1]))),
                None,
            )
            .unwrap();

        assert_eq!(
            router.resolve("/archive/2024/5", "get").unwrap().unwrap(),
            "2024|5"
        );
        assert_eq!(
            router.resolve("/archive/7", "get").unwrap().unwrap(),
            "7|"
        );
    }

    #[test]
    fn test_debug_output() {
        let router = Router::new("root");
        router.add("/a", ok("a"), None).unwrap();
        let debug = format!("{router:?}");
        assert!(debug.contains("root"));
        assert!(debug.contains("Unloaded"));
    }
}
