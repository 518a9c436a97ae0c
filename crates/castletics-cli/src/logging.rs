//! Log output for the CLI. Always stderr, so stdout stays parseable JSON.

use castletics_core::Config;
use tracing_subscriber::EnvFilter;

/// Install the global subscriber. `RUST_LOG` wins over `logging.level`.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = Config::load_or_default().logging.level;
        EnvFilter::try_new(&level).unwrap_or_else(|_| EnvFilter::new("info"))
    });

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
