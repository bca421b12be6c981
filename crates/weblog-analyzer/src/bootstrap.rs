use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use weblog_data::reader::DEFAULT_LOG_PATH;

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// Initialise the global `tracing` subscriber.
///
/// An explicit `RUST_LOG` environment variable takes precedence; otherwise
/// `log_level` (from `--log-level` / `--debug`) becomes the filter
/// directive. Falls back to `"info"` if the level string is not recognised.
pub fn setup_logging(log_level: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = fmt::layer().with_target(false).with_thread_ids(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(subscriber)
        .init();

    Ok(())
}

// ── Log-path resolution ────────────────────────────────────────────────────────

/// Resolve the log path to work on: an explicit `--file` wins, otherwise the
/// default data origin `weblog.txt` in the working directory.
pub fn resolve_log_path(explicit: Option<&Path>) -> PathBuf {
    match explicit {
        Some(path) => path.to_path_buf(),
        None => PathBuf::from(DEFAULT_LOG_PATH),
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
