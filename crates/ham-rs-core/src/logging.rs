//! Logging integration for ham-rs.
//!
//! Provides helpers for configuring [`tracing`]-based logging and for
//! creating per-dispatch spans. Library code only emits `tracing` events;
//! installing a subscriber is left to the embedding application, typically
//! via [`setup_logging`].

/// Sets up the global tracing subscriber.
///
/// `filter` is an `EnvFilter` directive string (e.g. `"debug"` or
/// `"ham_rs_routing=trace"`). With `pretty` a human-readable format is used;
/// otherwise structured JSON output is produced. Installing a second
/// subscriber is a no-op rather than a panic, so tests may call this freely.
pub fn setup_logging(filter: &str, pretty: bool) {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"));

    if pretty {
        fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(true)
            .pretty()
            .try_init()
            .ok();
    } else {
        fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(true)
            .json()
            .try_init()
            .ok();
    }
}

/// Creates a tracing span for one URL dispatch.
///
/// Enter this span around a root router's `resolve` call so that log
/// entries emitted while walking the route tree carry the request URL and
/// method.
///
/// # Examples
///
/// ```
/// use ham_rs_core::logging::dispatch_span;
///
/// let span = dispatch_span("/blog/5", "get");
/// let _guard = span.enter();
/// tracing::debug!("dispatching");
/// ```
pub fn dispatch_span(url: &str, method: &str) -> tracing::Span {
    tracing::info_span!("dispatch", url, method)
}
