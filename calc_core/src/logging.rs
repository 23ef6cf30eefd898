//! Logging setup shared by the GUI and CLI binaries.
//!
//! `calc_core` itself only emits `tracing` events; binaries call
//! [`init_default_logging`] once at startup to print them.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is unset
pub const DEFAULT_FILTER: &str = "info";

/// Build the filter from `RUST_LOG`, falling back to `default`.
pub fn make_filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// Install a stderr `fmt` subscriber. Safe to call more than once; only
/// the first call has an effect.
pub fn init_default_logging(default: &str) {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    let _ = tracing_subscriber::registry()
        .with(make_filter(default))
        .with(fmt_layer)
        .try_init();
}
