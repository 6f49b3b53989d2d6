//! Tracing subscriber setup

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Install a compact stderr subscriber.
///
/// `RUST_LOG` selects the filter, defaulting to `info`. `--verbose` forces
/// `debug`.
pub fn init(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    let fmt = tracing_subscriber::fmt::layer()
        .compact()
        .with_target(verbose)
        .with_writer(std::io::stderr);

    if let Err(e) = tracing_subscriber::registry().with(filter).with(fmt).try_init() {
        eprintln!("could not install log subscriber: {e}");
    }
    tracing::debug!("Verbose mode enabled");
}
