//! Controller-style views.
//!
//! This module provides the [`View`] trait: a controller object whose
//! methods service individual HTTP verbs. Views organize handler logic into
//! a type with default implementations for the common methods, plus a
//! [`View::prepare`] setup hook that runs once per dispatch before the
//! servicing method.

/// The body returned by a handler. The embedding entry point emits it
/// verbatim as the response.
pub type Response = String;

/// The lowercase method names [`View::dispatch`] knows how to route.
pub const KNOWN_METHODS: &[&str] = &["get", "post", "head", "put", "patch", "delete", "options"];

/// A controller-style handler with one method per HTTP verb.
///
/// Default implementations return `None` ("this view does not service that
/// verb"); `head` delegates to `get`. Override [`View::allowed_methods`] to
/// narrow the method set derived at registration time when no explicit list
/// is given.
///
/// A fresh instance is constructed for every dispatch and discarded
/// afterwards; state set in [`View::prepare`] lives exactly as long as one
/// request.
///
/// # Examples
///
/// ```
/// use ham_rs_views::{Response, View};
///
/// #[derive(Default)]
/// struct BlogView {
///     posts: Vec<String>,
/// }
///
/// impl View for BlogView {
///     fn prepare(&mut self) {
///         self.posts = vec!["hello".to_string(), "world".to_string()];
///     }
///
///     fn get(&mut self, args: &[String]) -> Option<Response> {
///         let id: usize = args.first()?.parse().ok()?;
///         self.posts.get(id).cloned()
///     }
///
///     fn allowed_methods(&self) -> Vec<String> {
///         vec!["get".to_string()]
///     }
/// }
/// ```
pub trait View: Send {
    /// Setup hook, invoked exactly once per constructed instance, before
    /// the method that services the request.
    fn prepare(&mut self) {}

    /// Returns the lowercase method names this view services.
    ///
    /// Used as the allowed-method set when the view is registered without
    /// an explicit method list. The default claims every known method;
    /// views implementing a subset should override this so that disallowed
    /// methods fall through to later routes instead of reaching
    /// [`View::dispatch`].
    fn allowed_methods(&self) -> Vec<String> {
        KNOWN_METHODS.iter().map(ToString::to_string).collect()
    }

    /// Routes a dispatch to the handler for `method`.
    ///
    /// `method` must already be lowercase; unknown methods yield `None`.
    fn dispatch(&mut self, method: &str, args: &[String]) -> Option<Response> {
        match method {
            "get" => self.get(args),
            "post" => self.post(args),
            "head" => self.head(args),
            "put" => self.put(args),
            "patch" => self.patch(args),
            "delete" => self.delete(args),
            "options" => self.options(args),
            _ => None,
        }
    }

    /// Handles GET requests.
    fn get(&mut self, args: &[String]) -> Option<Response> {
        let _ = args;
        None
    }

    /// Handles POST requests.
    fn post(&mut self, args: &[String]) -> Option<Response> {
        let _ = args;
        None
    }

    /// Handles HEAD requests. Delegates to `get` by default.
    fn head(&mut self, args: &[String]) -> Option<Response> {
        self.get(args)
    }

    /// Handles PUT requests.
    fn put(&mut self, args: &[String]) -> Option<Response> {
        let _ = args;
        None
    }

    /// Handles PATCH requests.
    fn patch(&mut self, args: &[String]) -> Option<Response> {
        let _ = args;
        None
    }

    /// Handles DELETE requests.
    fn delete(&mut self, args: &[String]) -> Option<Response> {
        let _ = args;
        None
    }

    /// Handles OPTIONS requests.
    fn options(&mut self, args: &[String]) -> Option<Response> {
        let _ = args;
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct EchoView;

    impl View for EchoView {
        fn get(&mut self, args: &[String]) -> Option<Response> {
            Some(format!("get:{}", args.join(",")))
        }

        fn post(&mut self, _args: &[String]) -> Option<Response> {
            Some("post".to_string())
        }

        fn allowed_methods(&self) -> Vec<String> {
            vec!["get".to_string(), "post".to_string(), "head".to_string()]
        }
    }

    #[test]
    fn test_dispatch_routes_by_method() {
        let mut view = EchoView;
        let args = vec!["42".to_string()];
        assert_eq!(view.dispatch("get", &args).unwrap(), "get:42");
        assert_eq!(view.dispatch("post", &args).unwrap(), "post");
    }

    #[test]
    fn test_head_delegates_to_get() {
        let mut view = EchoView;
        assert_eq!(view.dispatch("head", &[]).unwrap(), "get:");
    }

    #[test]
    fn test_unimplemented_method_returns_none() {
        let mut view = EchoView;
        assert!(view.dispatch("delete", &[]).is_none());
    }

    #[test]
    fn test_unknown_method_returns_none() {
        let mut view = EchoView;
        assert!(view.dispatch("brew", &[]).is_none());
    }

    #[test]
    fn test_default_allowed_methods_lists_known_set() {
        #[derive(Default)]
        struct Bare;
        impl View for Bare {}

        let view = Bare;
        assert_eq!(view.allowed_methods(), KNOWN_METHODS.to_vec());
    }
}
