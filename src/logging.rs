//! Tracing subscriber setup for the binary.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const DEFAULT_FILTER: &str = "solar_lcoe=info";

/// Installs a stderr `fmt` subscriber filtered by `RUST_LOG`, falling back
/// to `solar_lcoe=info` (or `debug` when `verbose`).
///
/// Calling this twice is harmless; the second install is ignored.
pub fn init(verbose: bool) {
    let fallback = if verbose { "solar_lcoe=debug" } else { DEFAULT_FILTER };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init();
}
