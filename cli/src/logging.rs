//! Logging setup for the command-line front end.
//!
//! Logs go to stderr so stdout carries only the JSON report. `RUST_LOG`
//! overrides the default filter; `--verbose` enables debug output for the
//! scribe crates.

use tracing_subscriber::{
    EnvFilter,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

pub fn init(verbose: bool) {
    let filter_directive = if verbose {
        "info,scribe_core=debug,scribe_cli=debug"
    } else {
        "warn"
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_directive));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_span_events(FmtSpan::NONE);

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(filter)
        .init();

    tracing::debug!(verbose, "scribe-detect logging initialized");
}
