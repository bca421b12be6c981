//! Main analysis pipeline for the weblog analyzer.
//!
//! Orchestrates reading, the combined accumulation pass and the
//! derived-statistic queries, returning a [`LogReport`] ready for rendering
//! or serialization.

use std::path::Path;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use weblog_core::error::Result;
use weblog_core::models::{RecordSource, DAY_SLOTS, HOUR_SLOTS, MONTH_SLOTS};

use crate::analyzer::LogAnalyzer;
use crate::reader::LogfileReader;

// ── Public types ──────────────────────────────────────────────────────────────

/// Metadata produced alongside the report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisMetadata {
    /// ISO-8601 timestamp when this report was generated.
    pub generated_at: String,
    /// Number of log files read. Zero for in-memory sources.
    pub files_read: usize,
    /// Total number of records processed.
    pub records_processed: u64,
    /// Wall-clock seconds spent reading and parsing the log files.
    pub load_time_seconds: f64,
    /// Wall-clock seconds spent filling the counter tables.
    pub scan_time_seconds: f64,
}

/// The seven derived statistics over the filled counter tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeakStats {
    /// Hour of day (0-23) with the most accesses.
    pub busiest_hour: u32,
    /// Hour of day (0-23) with the fewest accesses.
    pub quietest_hour: u32,
    /// Starting hour of the busiest circular two-hour window.
    pub busiest_two_hour_window: u32,
    /// Day of month (1-31) with the most accesses.
    pub busiest_day: u32,
    /// Day of month (1-31) with the fewest accesses.
    pub quietest_day: u32,
    /// Month (1-12) with the most accesses.
    pub busiest_month: u32,
    /// Month (1-12) with the fewest accesses.
    pub quietest_month: u32,
}

/// The complete output of one analysis traversal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogReport {
    /// Accesses per hour of day, indexed 0-23.
    pub hourly: [u64; HOUR_SLOTS],
    /// Accesses per day of month, indexed 1-31; slot 0 is unused.
    pub daily: [u64; DAY_SLOTS],
    /// Accesses per month, indexed 1-12; slot 0 is unused.
    pub monthly: [u64; MONTH_SLOTS],
    /// Total number of accesses.
    pub total_accesses: u64,
    /// Extremum and window statistics.
    pub peaks: PeakStats,
    /// Metadata about this analysis run.
    pub metadata: AnalysisMetadata,
}

// ── Public functions ──────────────────────────────────────────────────────────

/// Run the full analysis pipeline over the log file or directory at `path`.
///
/// 1. Open a [`LogfileReader`] (parses and validates every line).
/// 2. Fill all three counter tables in a single traversal.
/// 3. Compute the derived statistics.
pub fn analyze_log(path: impl AsRef<Path>) -> Result<LogReport> {
    // ── Step 1: Load and parse ────────────────────────────────────────────────
    let load_start = std::time::Instant::now();
    let reader = LogfileReader::open(path)?;
    let files_read = reader.file_count();
    let load_time = load_start.elapsed().as_secs_f64();

    run_pipeline(reader, files_read, load_time)
}

/// Run the pipeline over an already-built record source.
pub fn analyze_source<S: RecordSource>(source: S) -> Result<LogReport> {
    run_pipeline(source, 0, 0.0)
}

// ── Private helpers ───────────────────────────────────────────────────────────

fn run_pipeline<S: RecordSource>(
    source: S,
    files_read: usize,
    load_time: f64,
) -> Result<LogReport> {
    // ── Step 2: Accumulate ────────────────────────────────────────────────────
    let scan_start = std::time::Instant::now();
    let mut analyzer = LogAnalyzer::with_source(source);
    let total_accesses = analyzer.accumulate_all()?;
    let scan_time = scan_start.elapsed().as_secs_f64();

    // ── Step 3: Derived statistics ────────────────────────────────────────────
    let peaks = PeakStats {
        busiest_hour: analyzer.busiest_hour(),
        quietest_hour: analyzer.quietest_hour(),
        busiest_two_hour_window: analyzer.busiest_two_hour_window(),
        busiest_day: analyzer.busiest_day(),
        quietest_day: analyzer.quietest_day(),
        busiest_month: analyzer.busiest_month(),
        quietest_month: analyzer.quietest_month(),
    };

    let metadata = AnalysisMetadata {
        generated_at: Utc::now().to_rfc3339(),
        files_read,
        records_processed: total_accesses,
        load_time_seconds: load_time,
        scan_time_seconds: scan_time,
    };

    Ok(LogReport {
        hourly: *analyzer.hourly_counts(),
        daily: *analyzer.daily_counts(),
        monthly: *analyzer.monthly_counts(),
        total_accesses,
        peaks,
        metadata,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;
    use weblog_core::models::AccessRecord;

    fn write_log(dir: &std::path::Path, name: &str, lines: &[&str]) -> std::path::PathBuf {
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        for line in lines {
            writeln!(file, "{}", line).unwrap();
        }
        path
    }

    // ── analyze_log ───────────────────────────────────────────────────────────

    #[test]
    fn test_analyze_log_basic_pipeline() {
        let dir = TempDir::new().unwrap();
        let path = write_log(
            dir.path(),
            "weblog.txt",
            &[
                "2024 02 09 07 15",
                "2024 02 09 07 45",
                "2024 02 10 19 00",
                "2024 05 17 19 30",
            ],
        );

        let report = analyze_log(&path).unwrap();

        assert_eq!(report.total_accesses, 4);
        assert_eq!(report.hourly[7], 2);
        assert_eq!(report.hourly[19], 2);
        assert_eq!(report.daily[9], 2);
        assert_eq!(report.monthly[2], 3);
        assert_eq!(report.peaks.busiest_hour, 7);
        assert_eq!(report.peaks.busiest_day, 9);
        assert_eq!(report.peaks.busiest_month, 2);
    }

    #[test]
    fn test_analyze_log_empty_file() {
        let dir = TempDir::new().unwrap();
        let path = write_log(dir.path(), "weblog.txt", &[]);

        let report = analyze_log(&path).unwrap();

        assert_eq!(report.total_accesses, 0);
        assert!(report.hourly.iter().all(|&c| c == 0));
        assert_eq!(report.peaks.busiest_hour, 0);
        assert_eq!(report.peaks.busiest_day, 1);
        assert_eq!(report.peaks.busiest_month, 1);
    }

    #[test]
    fn test_analyze_log_directory() {
        let dir = TempDir::new().unwrap();
        write_log(dir.path(), "access.log", &["2024 01 05 10 00"]);
        write_log(dir.path(), "access-rotated.log", &["2024 01 06 11 00"]);

        let report = analyze_log(dir.path()).unwrap();

        assert_eq!(report.total_accesses, 2);
        assert_eq!(report.metadata.files_read, 2);
    }

    #[test]
    fn test_analyze_log_missing_path_fails() {
        let result = analyze_log("/tmp/does-not-exist-weblog-test-xyz");
        assert!(result.is_err());
    }

    #[test]
    fn test_analyze_log_metadata_fields_populated() {
        let dir = TempDir::new().unwrap();
        let path = write_log(dir.path(), "weblog.txt", &["2024 02 09 07 15"]);

        let report = analyze_log(&path).unwrap();

        assert!(!report.metadata.generated_at.is_empty());
        assert_eq!(report.metadata.files_read, 1);
        assert_eq!(report.metadata.records_processed, 1);
        assert!(report.metadata.load_time_seconds >= 0.0);
        assert!(report.metadata.scan_time_seconds >= 0.0);
    }

    // ── analyze_source ────────────────────────────────────────────────────────

    #[test]
    fn test_analyze_source_in_memory() {
        let records = vec![
            AccessRecord::new(2024, 3, 12, 22, 0).unwrap(),
            AccessRecord::new(2024, 3, 12, 23, 30).unwrap(),
            AccessRecord::new(2024, 3, 13, 0, 10).unwrap(),
        ];

        let report = analyze_source(LogfileReader::from_records(records)).unwrap();

        assert_eq!(report.total_accesses, 3);
        assert_eq!(report.metadata.files_read, 0);
        assert_eq!(report.hourly[22] + report.hourly[23] + report.hourly[0], 3);
    }

    #[test]
    fn test_report_serializes_to_json() {
        let report = analyze_source(LogfileReader::from_records(vec![
            AccessRecord::new(2024, 6, 21, 12, 0).unwrap(),
        ]))
        .unwrap();

        let json = serde_json::to_string(&report).unwrap();
        let back: LogReport = serde_json::from_str(&json).unwrap();

        assert_eq!(back.total_accesses, 1);
        assert_eq!(back.peaks, report.peaks);
        assert_eq!(back.monthly[6], 1);
    }
}
