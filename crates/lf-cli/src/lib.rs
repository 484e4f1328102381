//! Command-line tools for Loreforge.
//!
//! Each binary in `src/bin` parses its arguments with the matching module in
//! [`commands`] and hands them to that module's `run`. Errors come back as
//! strings; the binary prints them and exits 1.

/// One module per tool.
pub mod commands;

use tracing_subscriber::EnvFilter;

/// Install the stderr log subscriber.
///
/// `RUST_LOG` wins when set. Otherwise verbosity 0 logs warnings, 1 adds
/// info, and 2 or more adds debug output.
pub fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Print `error: <message>` and exit 1 on failure.
pub fn finish(result: Result<(), String>) {
    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
