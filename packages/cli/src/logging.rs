//! Logging initialization using the `tracing` crate.
//!
//! Logs are diagnostics, not output: they go to stderr in compact form and stay
//! quiet unless asked for.
//!
//! - `RUST_LOG` takes precedence when set
//! - `--verbose` enables debug logs for zbg itself
//! - otherwise only warnings and errors are shown

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

/// Filter directives used when `RUST_LOG` is not set.
#[must_use]
pub const fn default_directives(verbose: bool) -> &'static str {
    if verbose { "warn,zbg=debug,zbg_lib=debug" } else { "warn" }
}

/// Initializes the global tracing subscriber.
///
/// Call once at startup, before any logging occurs. Later calls are ignored.
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)));

    let subscriber = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_file(false)
        .with_line_number(false)
        .without_time()
        .compact();

    if tracing_subscriber::registry().with(filter).with(subscriber).try_init().is_ok() {
        tracing::debug!(version = env!("CARGO_PKG_VERSION"), "starting zbg");
    }
}
