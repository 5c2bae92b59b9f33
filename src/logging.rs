//! Subscriber setup for applications embedding ptree.
//!
//! The library only emits `tracing` events; nothing is printed until the host
//! installs a subscriber, either its own or the one built here.

use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::config::Settings;

/// Install a stderr `fmt` subscriber.
///
/// The filter comes from `RUST_LOG` if set, else from `settings.log_filter`.
/// Returns false if a global subscriber was already installed.
pub fn init_logging(settings: &Settings) -> bool {
    if tracing::dispatcher::has_been_set() {
        tracing::debug!("Tracing subscriber already set");
        return false;
    }

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.log_filter))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false)
        .with_span_events(FmtSpan::CLOSE)
        .with_filter(env_filter);

    match tracing_subscriber::registry().with(fmt_layer).try_init() {
        Ok(()) => {
            tracing::debug!(filter = %settings.log_filter, "logging initialized");
            true
        }
        Err(e) => {
            eprintln!("Error: Failed to set up logging: {}", e);
            false
        }
    }
}
