//! Configuration for the CRF daemon binary.
//!
//! The library half of this crate takes every parameter as an explicit
//! argument and has no configuration of its own; only `crf-daemon` reads
//! from the environment.

use std::env;
use std::sync::OnceLock;

/// Default filesystem path the daemon listens on when
/// `AVTP_CRF_DAEMON_SOCKET` is unset.
pub const DEFAULT_SOCKET_PATH: &str = "/tmp/crf";

#[derive(Debug, Clone)]
struct Config {
    socket_path: String,
}

impl Config {
    fn from_env() -> Self {
        let socket_path = env::var("AVTP_CRF_DAEMON_SOCKET")
            .unwrap_or_else(|_| DEFAULT_SOCKET_PATH.to_string());
        Config { socket_path }
    }
}

static CONFIG: OnceLock<Config> = OnceLock::new();

fn config() -> &'static Config {
    CONFIG.get_or_init(Config::from_env)
}

/// The Unix domain socket path the daemon binds its listener to, read
/// once from `AVTP_CRF_DAEMON_SOCKET` on first use and cached for the
/// lifetime of the process.
pub fn socket_path() -> &'static str {
    &config().socket_path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falls_back_to_the_default_path_when_unset() {
        // Reads whatever the process environment happens to have; this
        // only checks that a non-empty path comes back either way.
        assert!(!socket_path().is_empty());
    }
}
