//! URL configuration for the blog demo.
//!
//! The root router gets its terminal routes up front; the `/blog` module
//! is declared lazily and only populates when a dispatch first reaches its
//! prefix.

use ham_rs_core::HamResult;
use ham_rs_routing::{controller, handler, Registry};

use crate::views::{self, PostView};

/// Registers all routes on `registry` and returns nothing; fetch the root
/// router with `registry.root()` afterwards.
pub fn install(registry: &Registry) -> HamResult<()> {
    let root = registry.root();
    root.add("/", handler(views::index), Some(&["get", "head"]))?;
    root.add(
        "/about",
        handler(|_| Some("a demo of ham-rs routing".to_string())),
        Some(&["get"]),
    )?;

    let blog = registry.declare("blog", |r| {
        tracing::info!("populating blog module");
        r.add("/", handler(|_| Some("latest posts".to_string())), Some(&["get"]))?;
        r.add("/<int>", controller::<PostView>(), None)?;
        r.add("/archive/<page>", handler(views::archive), Some(&["get"]))
    });
    root.add_module("/blog", &blog)?;

    Ok(())
}
