use clap::Parser;
use std::path::PathBuf;

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Temporal access statistics for web-server logs
#[derive(Parser, Debug, Clone)]
#[command(
    name = "weblog-analyzer",
    about = "Temporal access statistics for web-server logs",
    version
)]
pub struct Settings {
    /// Log file, or a directory of rotated log files
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Report to produce
    #[arg(long, default_value = "summary", value_parser = ["summary", "hourly", "daily", "monthly", "all"])]
    pub view: String,

    /// Output format
    #[arg(long, default_value = "text", value_parser = ["text", "json"])]
    pub format: String,

    /// Write a random sample log with this many entries to the target file,
    /// then exit
    #[arg(long, value_name = "ENTRIES")]
    pub generate: Option<u64>,

    /// Seed for --generate (entropy-seeded when omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Logging level
    #[arg(long, default_value = "info", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

// ── Settings impl ──────────────────────────────────────────────────────────────

impl Settings {
    /// Parse CLI arguments and resolve derived values.
    pub fn from_args() -> Self {
        Self::parse().resolved()
    }

    /// Apply flag interactions: `--debug` overrides the log level.
    pub fn resolved(mut self) -> Self {
        if self.debug {
            self.log_level = "debug".to_string();
        }
        self
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
