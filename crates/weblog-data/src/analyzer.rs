//! Counter-table aggregation for the weblog analyzer.
//!
//! [`LogAnalyzer`] owns the fixed-size per-hour, per-day and per-month
//! counter tables, fills them by draining a [`RecordSource`], and answers
//! the derived-statistic queries over whatever has been accumulated.

use tracing::debug;
use weblog_core::error::Result;
use weblog_core::models::{RecordSource, DAY_SLOTS, HOUR_SLOTS, MONTH_SLOTS};

use crate::reader::LogfileReader;

// ── LogAnalyzer ───────────────────────────────────────────────────────────────

/// Aggregates access records into per-time-unit counter tables.
///
/// The analyzer owns its record source exclusively. Each accumulation pass
/// drains the source to exhaustion, and because the cursor is single-pass a
/// later pass over the same analyzer observes no further records. Callers
/// that want all three dimensions populated from one traversal use
/// [`accumulate_all`](LogAnalyzer::accumulate_all).
///
/// Queries never consume records and may be repeated freely; they report on
/// whichever tables have been filled so far.
pub struct LogAnalyzer<S = LogfileReader> {
    hour_counts: [u64; HOUR_SLOTS],
    day_counts: [u64; DAY_SLOTS],
    month_counts: [u64; MONTH_SLOTS],
    source: S,
}

impl LogAnalyzer<LogfileReader> {
    /// Create an analyzer over the default data origin, `weblog.txt`.
    pub fn new() -> Result<Self> {
        Ok(Self::with_source(LogfileReader::open_default()?))
    }

    /// Create an analyzer over the log file or directory at `path`.
    pub fn for_path(path: impl AsRef<std::path::Path>) -> Result<Self> {
        Ok(Self::with_source(LogfileReader::open(path)?))
    }
}

impl<S: RecordSource> LogAnalyzer<S> {
    /// Create an analyzer over a caller-supplied record source. All
    /// counters start at zero.
    pub fn with_source(source: S) -> Self {
        Self {
            hour_counts: [0; HOUR_SLOTS],
            day_counts: [0; DAY_SLOTS],
            month_counts: [0; MONTH_SLOTS],
            source,
        }
    }

    // ── Accumulation passes ───────────────────────────────────────────────────

    /// Drain the source, incrementing the hourly counter of each record.
    pub fn accumulate_hourly(&mut self) -> Result<()> {
        while self.source.has_next() {
            let record = self.source.next_record()?;
            self.hour_counts[record.hour as usize] += 1;
        }
        Ok(())
    }

    /// Drain the source, incrementing the daily counter of each record.
    pub fn accumulate_daily(&mut self) -> Result<()> {
        while self.source.has_next() {
            let record = self.source.next_record()?;
            self.day_counts[record.day as usize] += 1;
        }
        Ok(())
    }

    /// Drain the source, incrementing the monthly counter of each record.
    pub fn accumulate_monthly(&mut self) -> Result<()> {
        while self.source.has_next() {
            let record = self.source.next_record()?;
            self.month_counts[record.month as usize] += 1;
        }
        Ok(())
    }

    /// Drain the source counting records without touching any table.
    ///
    /// Shares the cursor with the accumulation passes: running this after
    /// any other pass on the same analyzer returns 0.
    pub fn total_access_count(&mut self) -> Result<u64> {
        let mut accesses = 0u64;
        while self.source.has_next() {
            self.source.next_record()?;
            accesses += 1;
        }
        Ok(accesses)
    }

    /// Drain the source once, filling all three counter tables, and return
    /// the number of records seen.
    ///
    /// One traversal stands in for the three per-dimension passes plus the
    /// total count, which would otherwise each need their own drain.
    pub fn accumulate_all(&mut self) -> Result<u64> {
        let mut accesses = 0u64;
        while self.source.has_next() {
            let record = self.source.next_record()?;
            self.hour_counts[record.hour as usize] += 1;
            self.day_counts[record.day as usize] += 1;
            self.month_counts[record.month as usize] += 1;
            accesses += 1;
        }
        debug!("Accumulated {} records across all tables", accesses);
        Ok(accesses)
    }

    // ── Derived-statistic queries ─────────────────────────────────────────────

    /// The hour of day (0-23) with the most accesses; ties go to the
    /// earliest hour. Returns 0 when the hourly table was never filled.
    pub fn busiest_hour(&self) -> u32 {
        busiest_index(&self.hour_counts, 0) as u32
    }

    /// The hour of day (0-23) with the fewest accesses; ties go to the
    /// earliest hour.
    pub fn quietest_hour(&self) -> u32 {
        quietest_index(&self.hour_counts, 0) as u32
    }

    /// Starting hour of the two-hour window with the most accesses.
    ///
    /// The window is circular: the window starting at hour 23 includes
    /// hour 0 of the next day. Ties go to the earliest starting hour.
    pub fn busiest_two_hour_window(&self) -> u32 {
        let window = |start: usize| {
            self.hour_counts[start] + self.hour_counts[(start + 1) % HOUR_SLOTS]
        };

        let mut busiest = 0;
        for hour in 1..HOUR_SLOTS {
            if window(hour) > window(busiest) {
                busiest = hour;
            }
        }
        busiest as u32
    }

    /// The day of month (1-31) with the most accesses; ties go to the
    /// earliest day. Returns 1 when the daily table was never filled.
    pub fn busiest_day(&self) -> u32 {
        busiest_index(&self.day_counts, 1) as u32
    }

    /// The day of month (1-31) with the fewest accesses; ties go to the
    /// earliest day.
    pub fn quietest_day(&self) -> u32 {
        quietest_index(&self.day_counts, 1) as u32
    }

    /// The month (1-12) with the most accesses; ties go to the earliest
    /// month. Returns 1 when the monthly table was never filled.
    pub fn busiest_month(&self) -> u32 {
        busiest_index(&self.month_counts, 1) as u32
    }

    /// The month (1-12) with the fewest accesses; ties go to the earliest
    /// month.
    pub fn quietest_month(&self) -> u32 {
        quietest_index(&self.month_counts, 1) as u32
    }

    // ── Counter-table accessors ───────────────────────────────────────────────

    /// Read-only view of the hourly counter table.
    pub fn hourly_counts(&self) -> &[u64; HOUR_SLOTS] {
        &self.hour_counts
    }

    /// Read-only view of the daily counter table. Slot 0 is always zero.
    pub fn daily_counts(&self) -> &[u64; DAY_SLOTS] {
        &self.day_counts
    }

    /// Read-only view of the monthly counter table. Slot 0 is always zero.
    pub fn monthly_counts(&self) -> &[u64; MONTH_SLOTS] {
        &self.month_counts
    }
}

// ── Extremum scans ────────────────────────────────────────────────────────────

/// Index of the maximum count. `first` is the initial candidate and the scan
/// covers `first + 1..`, so slots below `first` are never considered. Only a
/// strictly greater count replaces the candidate, which makes the lowest
/// index win ties.
fn busiest_index(counts: &[u64], first: usize) -> usize {
    let mut busiest = first;
    for idx in first + 1..counts.len() {
        if counts[idx] > counts[busiest] {
            busiest = idx;
        }
    }
    busiest
}

/// Index of the minimum count; same scan shape as [`busiest_index`] with a
/// strictly-less comparison.
fn quietest_index(counts: &[u64], first: usize) -> usize {
    let mut quietest = first;
    for idx in first + 1..counts.len() {
        if counts[idx] < counts[quietest] {
            quietest = idx;
        }
    }
    quietest
}

// ── Tests ─────────────────────────────────────────────────────────────────────
