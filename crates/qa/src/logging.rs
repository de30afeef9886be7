//! Logging utilities for the CLI.
//!
//! Diagnostics go through `tracing` to standard error so they never mix with
//! the report printed on standard output. The filter is read from
//! `RUST_LOG`, defaulting to `warn`.

use tracing::Subscriber;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{EnvFilter, fmt};

/// Filter applied when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "warn";

/// Initialize the global tracing subscriber.
///
/// Call `init` before any logging statements to avoid missing logs.
///
/// # Examples
///
/// ```rust,no_run
/// use qa::logging::init;
///
/// init();
/// tracing::warn!("Logging is initialized!");
/// ```
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let subscriber = subscriber(std::io::stderr, filter);
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        tracing::debug!("Global subscriber already installed");
    }
}

/// Build a formatting subscriber for `writer` with an explicit filter.
///
/// # Examples
///
/// ```rust,no_run
/// use qa::logging::subscriber;
/// use tracing_subscriber::EnvFilter;
///
/// let sub = subscriber(std::io::stderr, EnvFilter::new("debug"));
/// tracing::subscriber::with_default(sub, || tracing::debug!("scoped"));
/// ```
pub fn subscriber<W>(writer: W, filter: EnvFilter) -> impl Subscriber + Send + Sync
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .finish()
}
