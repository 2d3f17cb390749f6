// src/telemetry.rs
// =============================================================================
// Sets up logging with `tracing` and `tracing-subscriber`.
//
// All diagnostics go to stderr so stdout only ever holds the report.
// The debug level from the command line picks how chatty we are:
//   0 -> warnings only (bad links, timeouts)
//   1 -> + progress (pages being analyzed, URLs added, failed pages)
//   2 -> + every parser event
// Setting RUST_LOG overrides all of this.
// =============================================================================

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub fn init(debug_level: u8) {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_directives(debug_level))),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}

fn default_directives(debug_level: u8) -> String {
    let level = match debug_level {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    format!("warn,{}={}", env!("CARGO_CRATE_NAME"), level)
}
