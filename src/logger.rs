pub use tracing::{debug, error, info, warn, trace, instrument};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt::{self, format::FmtSpan}};

fn fmt_layer<S>(is_debug: bool) -> impl tracing_subscriber::Layer<S>
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    fmt::layer()
        .with_target(false)
        .with_timer(fmt::time::uptime())
        .with_span_events(if is_debug {
            FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        })
}

fn env_filter() -> (EnvFilter, bool) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let is_debug = env_filter.to_string().contains("debug") ||
                   std::env::var("RUST_LOG").unwrap_or_default().contains("debug");

    (env_filter, is_debug)
}

/// Install the process-wide subscriber.
pub fn init() {
    let (env_filter, is_debug) = env_filter();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer(is_debug))
        .init();
}

/// Build a subscriber without installing it, for use with
/// `tracing::subscriber::with_default` around a single kernel.
pub fn scoped() -> impl tracing::Subscriber + Send + Sync {
    let (env_filter, is_debug) = env_filter();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer(is_debug))
}
