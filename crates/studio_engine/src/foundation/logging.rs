//! Logging utilities
//!
//! The library only talks to the `log` facade; binaries pick the backend.

pub use log::{debug, error, info, trace, warn};

/// Initialize `env_logger`, letting `RUST_LOG` override `default_level`
///
/// Safe to call more than once; later calls are ignored.
pub fn init_with_level(default_level: &str) {
    let env = env_logger::Env::default().default_filter_or(default_level);
    if env_logger::Builder::from_env(env).try_init().is_err() {
        log::debug!("Logger already initialized");
    }
}
