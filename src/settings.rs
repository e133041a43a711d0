//! Environment-driven settings and logging setup.
//!
//! Values come from the process environment (a `.env` file is loaded first if
//! present). CLI flags override them.
//!
//! - `MEK_REWARDS_STORE`: profile directory (default `./reward-profiles`)
//! - `MEK_REWARDS_DEBUG_DIR`: debug bundle directory (default `./debug`)
//! - `RUST_LOG`: tracing filter (default `mek_rewards=warn`)

use std::path::PathBuf;

use tracing_subscriber::EnvFilter;

use crate::error::AppError;

pub const STORE_ENV: &str = "MEK_REWARDS_STORE";
pub const DEBUG_DIR_ENV: &str = "MEK_REWARDS_DEBUG_DIR";

const DEFAULT_STORE_DIR: &str = "reward-profiles";
const DEFAULT_DEBUG_DIR: &str = "debug";
const DEFAULT_LOG_FILTER: &str = "mek_rewards=warn";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub store_dir: PathBuf,
    pub debug_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            store_dir: PathBuf::from(DEFAULT_STORE_DIR),
            debug_dir: PathBuf::from(DEFAULT_DEBUG_DIR),
        }
    }
}

impl Settings {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Self {
            store_dir: non_empty(STORE_ENV).map(PathBuf::from).unwrap_or(defaults.store_dir),
            debug_dir: non_empty(DEBUG_DIR_ENV).map(PathBuf::from).unwrap_or(defaults.debug_dir),
        }
    }
}

/// Install the global tracing subscriber (stderr, `RUST_LOG`-filtered).
///
/// `verbose` raises the default filter to `debug` when `RUST_LOG` is unset.
pub fn init_tracing(verbose: bool) -> Result<(), AppError> {
    let default_filter = if verbose { "mek_rewards=debug" } else { DEFAULT_LOG_FILTER };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| AppError::new(4, format!("Failed to initialize logging: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_unset_or_blank() {
        let s = Settings::from_lookup(|_| None);
        assert_eq!(s, Settings::default());

        let s = Settings::from_lookup(|_| Some("  ".to_string()));
        assert_eq!(s, Settings::default());
    }

    #[test]
    fn env_overrides() {
        let s = Settings::from_lookup(|key| match key {
            STORE_ENV => Some("/tmp/profiles".to_string()),
            _ => None,
        });
        assert_eq!(s.store_dir, PathBuf::from("/tmp/profiles"));
        assert_eq!(s.debug_dir, PathBuf::from("debug"));
    }
}
