//! File logging through `tracing`.
//!
//! The TUI owns the terminal, so nothing is written to stdout or stderr.
//! Levels are taken from `RUST_LOG` and default to `info`.

use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_FILTER: &str = "info";

pub fn default_log_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|dir| dir.join("foodorder").join("foodorder.log"))
}

/// Picks the configured file if there is one, otherwise the default location.
pub fn resolve_log_path(configured: Option<&str>) -> Option<PathBuf> {
    match configured {
        Some(path) if !path.is_empty() => Some(PathBuf::from(path)),
        _ => default_log_path(),
    }
}

fn build_env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Installs the global subscriber. Call once, before the TUI starts.
pub fn init_logging(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating log directory {}", parent.display()))?;
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    let layer = fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true);

    tracing_subscriber::registry()
        .with(build_env_filter())
        .with(layer)
        .try_init()
        .context("installing tracing subscriber")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configured_path_wins() {
        assert_eq!(
            resolve_log_path(Some("/tmp/orders.log")),
            Some(PathBuf::from("/tmp/orders.log"))
        );
    }

    #[test]
    fn test_empty_path_falls_back_to_default() {
        assert_eq!(resolve_log_path(Some("")), default_log_path());
        assert_eq!(resolve_log_path(None), default_log_path());
    }

    #[test]
    fn test_default_path_file_name() {
        if let Some(path) = default_log_path() {
            assert!(path.ends_with("foodorder/foodorder.log"));
        }
    }
}
