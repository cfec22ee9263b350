#![cfg(feature = "std")]

use tracing_subscriber::EnvFilter;

/// Initialize logging with a filter taken from the `NAVAL_LOG` environment variable.
/// Defaults to `info` if the variable is not set or invalid. Output goes to
/// stderr so it does not interleave with the board on stdout.
pub fn init_logging() {
    let filter = EnvFilter::try_from_env("NAVAL_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
