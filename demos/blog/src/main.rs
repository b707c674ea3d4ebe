//! Entry point for the blog demo.
//!
//! Plays the collaborator role the routing layer expects: it supplies the
//! request URL and lowercase method to the root router's `resolve`, emits
//! the returned body verbatim, and turns `None` into a not-found message.
//!
//! ```text
//! blog-demo /blog/1
//! blog-demo /blog/1 --method post
//! ```

mod urls;
mod views;

use std::process::ExitCode;

use clap::Parser;

use ham_rs_core::logging::{dispatch_span, setup_logging};
use ham_rs_routing::Registry;

#[derive(Parser)]
#[command(about = "Dispatch a URL through the blog demo's routers")]
struct Args {
    /// The request path, e.g. /blog/1
    url: String,

    /// The HTTP method
    #[arg(long, default_value = "get")]
    method: String,

    /// Log filter directive, e.g. "debug" or "ham_rs_routing=trace"
    #[arg(long, default_value = "info")]
    log: String,
}

fn main() -> ExitCode {
    let args = Args::parse();
    setup_logging(&args.log, true);

    let registry = Registry::new();
    if let Err(err) = urls::install(&registry) {
        eprintln!("route configuration error: {err}");
        return ExitCode::from(2);
    }

    let method = args.method.to_lowercase();
    let span = dispatch_span(&args.url, &method);
    let _guard = span.enter();

    match registry.root().resolve(&args.url, &method) {
        Ok(Some(body)) => {
            println!("{body}");
            ExitCode::SUCCESS
        }
        Ok(None) => {
            println!("404 Not Found: {} {}", method, args.url);
            ExitCode::FAILURE
        }
        Err(err) => {
            eprintln!("dispatch error: {err}");
            ExitCode::from(2)
        }
    }
}
