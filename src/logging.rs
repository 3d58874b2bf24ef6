//! Diagnostic logging initialization
//!
//! Logs go to stderr so they never mix with command output or exported
//! snapshots piped through stdout.

use std::io::{self, IsTerminal};

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Pick the default filter directive for the given flags
///
/// `quiet` wins over `verbose`. 0 = warn, 1 = info, 2 = debug, 3+ = trace.
pub fn default_directive(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "studyvault=error";
    }
    match verbose {
        0 => "studyvault=warn",
        1 => "studyvault=info",
        2 => "studyvault=debug",
        _ => "studyvault=trace",
    }
}

/// Initialize the tracing subscriber
///
/// `RUST_LOG` overrides the directive chosen from the flags. With `json`
/// set, every event is one JSON line; otherwise output is colored on a
/// terminal and plain when redirected.
pub fn init_logging(json: bool, verbose: u8, quiet: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose, quiet)));

    if json {
        let fmt_layer = fmt::layer()
            .json()
            .with_target(true)
            .with_writer(io::stderr);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    } else if io::stderr().is_terminal() {
        let fmt_layer = fmt::layer().with_target(false).with_writer(io::stderr);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    } else {
        let fmt_layer = fmt::layer()
            .with_ansi(false)
            .with_target(false)
            .compact()
            .with_writer(io::stderr);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}
