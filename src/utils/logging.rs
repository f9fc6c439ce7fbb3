// src/utils/logging.rs
use tracing_subscriber::{fmt, EnvFilter};

/// Installs the tracing subscriber. `RUST_LOG` wins when set; otherwise
/// this crate logs at `debug` in debug mode and everything at `info`.
///
/// Logs go to stderr; stdout carries the trade listing.
pub fn setup_logging(debug: bool) {
    let default_directives = if debug {
        "info,contract_note_extractor=debug"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives));

    fmt()
        .with_env_filter(filter)
        .with_target(debug)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("Logging setup complete.");
}
