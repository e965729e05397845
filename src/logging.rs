use tracing::subscriber::SetGlobalDefaultError;
use tracing_error::ErrorLayer;
use tracing_subscriber::{layer::SubscriberExt, EnvFilter};

use crate::formatter::CustomFormatter;

/// Configure and install the global tracing subscriber.
///
/// `RUST_LOG` overrides the filter. Without it the crate logs at `info`, or at `debug`
/// when `verbose` is set, and everything else at `warn`.
pub fn setup_logging(verbose: bool) -> Result<(), SetGlobalDefaultError> {
    let crate_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,{name}={crate_level}", name = env!("CARGO_CRATE_NAME"))));

    let subscriber = tracing_subscriber::fmt()
        .with_ansi(true)
        .event_format(CustomFormatter)
        .with_env_filter(filter)
        .finish()
        .with(ErrorLayer::default());

    tracing::subscriber::set_global_default(subscriber)
}
