//! `tracing` subscriber setup for the command-line tool.
//!
//! `RUST_LOG` overrides the verbosity-derived filter when set.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter directive for a verbosity level.
///
/// - `-1` (`--quiet`): errors only
/// - `0`: warnings plus this crate's `info` events
/// - `1` (`-v`): this crate at `debug`
/// - `2+` (`-vv`): this crate at `trace`
pub fn filter_directive(verbosity: i8) -> &'static str {
    match verbosity {
        i8::MIN..=-1 => "error",
        0 => "warn,manifest_flatten=info",
        1 => "warn,manifest_flatten=debug",
        _ => "info,manifest_flatten=trace",
    }
}

/// Install the global subscriber. Logs go to stderr so stdout stays clean.
pub fn init_logging(verbosity: i8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(verbosity)));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .try_init();
}
