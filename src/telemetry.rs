//! Diagnostic logging.
//!
//! Events go to stderr through `tracing_subscriber::fmt`, filtered by
//! `RUST_LOG` (default `warn`), so they never mix with status output on
//! stdout. `RUST_LOG=debug` shows writer lifecycle; `trace` shows every batch.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

pub fn init_logging() {
    let registry = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_thread_names(true)
                .with_target(false)
                .compact(),
        );

    if let Err(err) = registry.try_init() {
        eprintln!("Failed to initialize logging: {err}");
    }
}
