//! Logging setup: `tracing-subscriber` with an env filter.
//!
//! `RUST_LOG` wins when set; otherwise the `-v`/`-q` flags pick the level.

use clap_verbosity_flag::{Verbosity, WarnLevel};
use tracing_subscriber::EnvFilter;

pub fn init(verbosity: &Verbosity<WarnLevel>) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.log_level_filter().to_string()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
