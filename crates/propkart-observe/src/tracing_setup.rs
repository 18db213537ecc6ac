//! Tracing subscriber initialization with structured logging.
//!
//! # Usage
//!
//! ```no_run
//! // Warnings and errors only
//! propkart_observe::tracing_setup::init_tracing(0, false).unwrap();
//!
//! // -vv: everything
//! propkart_observe::tracing_setup::init_tracing(2, false).unwrap();
//! ```

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};

/// Filter used when `RUST_LOG` is unset.
pub fn default_directive(verbosity: u8, quiet: bool) -> &'static str {
    match verbosity {
        0 if quiet => "error",
        0 => "warn",
        1 => "info,propkart=debug",
        _ => "trace",
    }
}

/// Initialize the global tracing subscriber.
///
/// - Installs a `fmt` layer writing to stderr so command output on stdout
///   stays clean.
/// - Respects `RUST_LOG` when set; otherwise derives the filter from the
///   `-v` count and `--quiet`.
///
/// # Errors
///
/// Returns an error if a global subscriber has already been set.
pub fn init_tracing(verbosity: u8, quiet: bool) -> Result<(), TryInitError> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity, quiet)));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(verbosity > 1)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
}
