//! Core error types for ham-rs.
//!
//! Routing failures come in two flavours with very different treatment:
//! "nothing matched" is an ordinary outcome reported as `Ok(None)` by the
//! router and never appears here, while registration mistakes and loader
//! failures are programmer errors that should surface loudly and early.
//! [`HamError`] covers only the latter.

use thiserror::Error;

/// The primary error type for ham-rs.
///
/// All variants describe configuration-time problems: a route template that
/// cannot be compiled, a misuse of the registration API, or a nested
/// router's defining unit failing while it populated its route table.
/// An unmatched URL or a disallowed method is *not* an error; the router
/// reports those as `None`.
#[derive(Error, Debug)]
pub enum HamError {
    /// A URL template failed validation or compilation at registration time.
    ///
    /// Raised for unknown placeholder tokens (e.g. `<unknown>`), unclosed
    /// angle brackets, and anything the regex engine rejects after
    /// substitution.
    #[error("Malformed route template: {0}")]
    MalformedTemplate(String),

    /// The registration API was used in an unsupported way.
    #[error("Improperly configured: {0}")]
    ImproperlyConfigured(String),

    /// A nested router's defining unit returned an error while populating
    /// its route table.
    ///
    /// The unit is consulted exactly once; after a failure the router stays
    /// empty and subsequent dispatches do not retry the loader.
    #[error("Failed to load routes for unit '{unit}': {source}")]
    LoadFailed {
        /// The identifier of the defining unit that failed.
        unit: String,
        /// The underlying registration error raised by the loader.
        #[source]
        source: Box<HamError>,
    },
}

impl HamError {
    /// Wraps an error raised inside a unit loader with the unit identifier.
    pub fn load_failed(unit: impl Into<String>, source: Self) -> Self {
        Self::LoadFailed {
            unit: unit.into(),
            source: Box::new(source),
        }
    }
}

/// A convenience type alias for `Result<T, HamError>`.
pub type HamResult<T> = Result<T, HamError>;
