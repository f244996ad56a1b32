//! Tracing subscriber setup

use tracing::Level;

/// Install a fmt subscriber writing to stderr
///
/// Safe to call more than once; only the first call installs a subscriber.
pub fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
