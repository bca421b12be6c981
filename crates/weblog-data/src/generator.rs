//! Random sample-log creation.
//!
//! Writes simple-format (`YYYY MM DD HH MM`) access logs for demos and
//! tests. Generated days stay in 1-28 so every date exists in every month
//! without calendar logic.

use std::io::Write;
use std::path::Path;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;
use weblog_core::error::{Result, WeblogError};
use weblog_core::models::AccessRecord;

/// Year range for generated records.
const YEAR_RANGE: std::ops::RangeInclusive<i32> = 2018..=2024;

// ── LogfileCreator ────────────────────────────────────────────────────────────

/// Creates files of random access-log records.
pub struct LogfileCreator {
    rng: StdRng,
}

impl LogfileCreator {
    /// Create a generator seeded from the operating system.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Create a generator with a fixed seed; runs are reproducible.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Write `entries` random records to `path`, one simple-format line per
    /// record, in generation order (readers sort on load).
    pub fn create_file(&mut self, path: impl AsRef<Path>, entries: u64) -> Result<()> {
        let path = path.as_ref();
        let file = std::fs::File::create(path).map_err(|e| WeblogError::FileWrite {
            path: path.to_path_buf(),
            source: e,
        })?;
        let mut out = std::io::BufWriter::new(file);

        for _ in 0..entries {
            let record = self.random_record();
            writeln!(
                out,
                "{:04} {:02} {:02} {:02} {:02}",
                record.year, record.month, record.day, record.hour, record.minute
            )?;
        }
        out.flush()?;

        debug!("Generated {} records into {}", entries, path.display());
        Ok(())
    }

    /// Produce one random record with every field inside its domain.
    pub fn random_record(&mut self) -> AccessRecord {
        AccessRecord {
            year: self.rng.random_range(YEAR_RANGE),
            month: self.rng.random_range(1..=12),
            day: self.rng.random_range(1..=28),
            hour: self.rng.random_range(0..24),
            minute: self.rng.random_range(0..60),
        }
    }
}

impl Default for LogfileCreator {
    fn default() -> Self {
        Self::new()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
