//! Logging utilities

pub use log::{debug, error, info, trace, warn};

/// Initialize the logging system from the `RUST_LOG` environment variable
pub fn init() {
    env_logger::init();
}

/// Initialize the logging system with a fallback level filter
///
/// `RUST_LOG` still wins when set; otherwise `default_filter` applies
/// (e.g. `"info"` or `"sim_engine=debug"`).
pub fn init_with_default(default_filter: &str) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}
