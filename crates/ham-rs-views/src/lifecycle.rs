//! Per-dispatch view lifecycle.
//!
//! A view registered with a router is stored as a [`ViewFactory`], not an
//! instance. When a dispatch reaches it, [`PreparedView::resolve`]
//! constructs a fresh instance and runs its [`View::prepare`] hook exactly
//! once, before the servicing method. The instance is dropped when the
//! dispatch completes; there is no pooling or cross-request reuse.

use std::sync::Arc;

use crate::view::{Response, View};

/// Constructs a boxed [`View`] for one dispatch.
pub type ViewFactory = Arc<dyn Fn() -> Box<dyn View> + Send + Sync>;

/// Creates a [`ViewFactory`] for a view type with a `Default` constructor.
///
/// # Examples
///
/// ```
/// use ham_rs_views::{view_factory, PreparedView, Response, View};
///
/// #[derive(Default)]
/// struct Hello;
///
/// impl View for Hello {
///     fn get(&mut self, _args: &[String]) -> Option<Response> {
///         Some("hello".to_string())
///     }
/// }
///
/// let factory = view_factory::<Hello>();
/// let mut view = PreparedView::resolve(&factory);
/// assert_eq!(view.dispatch("get", &[]).unwrap(), "hello");
/// ```
pub fn view_factory<V>() -> ViewFactory
where
    V: View + Default + 'static,
{
    Arc::new(|| Box::new(V::default()))
}

/// A view instance whose [`View::prepare`] hook has already run.
///
/// The only way to obtain one is [`PreparedView::resolve`], which calls
/// `prepare` in one place; the hook therefore cannot run twice for a single
/// instance.
pub struct PreparedView {
    inner: Box<dyn View>,
}

impl PreparedView {
    /// Constructs a fresh instance from `factory` and invokes its setup
    /// hook.
    pub fn resolve(factory: &ViewFactory) -> Self {
        let mut inner = factory();
        inner.prepare();
        Self { inner }
    }

    /// Returns the lowercase method names the underlying view services.
    pub fn allowed_methods(&self) -> Vec<String> {
        self.inner.allowed_methods()
    }

    /// Dispatches to the underlying view's handler for `method`.
    pub fn dispatch(&mut self, method: &str, args: &[String]) -> Option<Response> {
        self.inner.dispatch(method, args)
    }
}
