//! Log-file discovery and loading for the weblog analyzer.
//!
//! Reads access-log files in either the five-field `YYYY MM DD HH MM` sample
//! format or Common/Combined Log Format and converts them into
//! [`AccessRecord`]s, exposed through the forward-only [`RecordSource`]
//! cursor.

use std::io::BufRead;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};
use weblog_core::error::{Result, WeblogError};
use weblog_core::models::{AccessRecord, RecordSource};

/// Default data origin when no `--file` is supplied.
pub const DEFAULT_LOG_PATH: &str = "weblog.txt";

/// Extensions recognised when scanning a directory of rotated logs.
const LOG_EXTENSIONS: &[&str] = &["log", "txt"];

/// The bracketed timestamp of a Common/Combined Log Format line,
/// e.g. `[10/Oct/2000:13:55:36 -0700]`.
static CLF_TIMESTAMP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[(\d{1,2})/([A-Za-z]{3})/(\d{4}):(\d{2}):(\d{2}):\d{2} [+-]\d{4}\]")
        .expect("timestamp pattern is valid")
});

const MONTH_ABBREVS: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

// ── Public API ────────────────────────────────────────────────────────────────

/// Find all `.log` / `.txt` files recursively under `dir`, sorted by path.
pub fn find_log_files(dir: &Path) -> Vec<PathBuf> {
    if !dir.exists() {
        warn!("Log path does not exist: {}", dir.display());
        return Vec::new();
    }

    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            entry.file_type().is_file()
                && entry
                    .path()
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .map(|ext| LOG_EXTENSIONS.contains(&ext))
                    .unwrap_or(false)
        })
        .map(|entry| entry.into_path())
        .collect();

    files.sort();
    files
}

/// Reads access records from log files and yields them in chronological
/// order through the [`RecordSource`] cursor.
///
/// Every line is parsed and validated up front, so a reader that opened
/// successfully only ever yields in-domain records. The cursor is
/// single-pass: once drained, the reader stays drained.
#[derive(Debug)]
pub struct LogfileReader {
    records: Vec<AccessRecord>,
    files: Vec<PathBuf>,
    cursor: usize,
}

impl LogfileReader {
    /// Open a log file, or a directory of rotated log files.
    ///
    /// Fails with [`WeblogError::LogPathNotFound`] when `path` does not
    /// exist, [`WeblogError::NoLogFiles`] when a directory contains no log
    /// files, and [`WeblogError::MalformedRecord`] on the first line that
    /// does not parse into a valid record.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(WeblogError::LogPathNotFound(path.to_path_buf()));
        }

        let files = if path.is_dir() {
            let found = find_log_files(path);
            if found.is_empty() {
                return Err(WeblogError::NoLogFiles(path.to_path_buf()));
            }
            found
        } else {
            vec![path.to_path_buf()]
        };

        let mut records: Vec<AccessRecord> = Vec::new();
        for file in &files {
            parse_file(file, &mut records)?;
        }

        // Chronological yield order regardless of file order on disk.
        records.sort();

        debug!(
            "Loaded {} records from {} file(s)",
            records.len(),
            files.len()
        );

        Ok(Self {
            records,
            files,
            cursor: 0,
        })
    }

    /// Open the default data origin, `weblog.txt` in the working directory.
    pub fn open_default() -> Result<Self> {
        Self::open(DEFAULT_LOG_PATH)
    }

    /// Build a reader over in-memory records, sorted chronologically.
    pub fn from_records(mut records: Vec<AccessRecord>) -> Self {
        records.sort();
        Self {
            records,
            files: Vec::new(),
            cursor: 0,
        }
    }

    /// Number of records the cursor has not yet yielded.
    pub fn remaining(&self) -> usize {
        self.records.len() - self.cursor
    }

    /// Number of log files this reader was loaded from.
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// The log files this reader was loaded from, sorted by path.
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }
}

impl RecordSource for LogfileReader {
    fn has_next(&self) -> bool {
        self.cursor < self.records.len()
    }

    fn next_record(&mut self) -> Result<AccessRecord> {
        let record = self
            .records
            .get(self.cursor)
            .copied()
            .ok_or(WeblogError::SourceExhausted)?;
        self.cursor += 1;
        Ok(record)
    }
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Parse every line of `path` into `records`, failing on the first line
/// that is neither blank nor a recognised record.
fn parse_file(path: &Path, records: &mut Vec<AccessRecord>) -> Result<()> {
    let file = std::fs::File::open(path).map_err(|e| WeblogError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let reader = std::io::BufReader::new(file);
    let mut parsed = 0u64;

    for (idx, line_result) in reader.lines().enumerate() {
        let line = line_result.map_err(|e| WeblogError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let record = parse_line(trimmed).map_err(|reason| WeblogError::MalformedRecord {
            path: path.to_path_buf(),
            line: idx + 1,
            reason,
        })?;
        records.push(record);
        parsed += 1;
    }

    debug!("File {}: {} records parsed", path.display(), parsed);
    Ok(())
}

/// Parse one non-blank line, trying the simple five-field format first and
/// the Common Log Format timestamp second.
fn parse_line(line: &str) -> std::result::Result<AccessRecord, String> {
    if let Some(result) = parse_simple(line) {
        return result;
    }
    if let Some(result) = parse_clf(line) {
        return result;
    }
    Err("unrecognised line format".to_string())
}

/// Five whitespace-separated integer fields: `year month day hour minute`.
///
/// Returns `None` when the line does not look like this format at all, so
/// the caller can try the next one.
fn parse_simple(line: &str) -> Option<std::result::Result<AccessRecord, String>> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() != 5 || !fields.iter().all(|f| f.chars().all(|c| c.is_ascii_digit())) {
        return None;
    }

    Some(build_simple_record(&fields))
}

fn build_simple_record(fields: &[&str]) -> std::result::Result<AccessRecord, String> {
    let year: i32 = parse_field(fields[0], "year")?;
    let month: u32 = parse_field(fields[1], "month")?;
    let day: u32 = parse_field(fields[2], "day")?;
    let hour: u32 = parse_field(fields[3], "hour")?;
    let minute: u32 = parse_field(fields[4], "minute")?;

    AccessRecord::new(year, month, day, hour, minute).map_err(|e| e.to_string())
}

/// A line carrying a bracketed Common Log Format timestamp anywhere in it.
fn parse_clf(line: &str) -> Option<std::result::Result<AccessRecord, String>> {
    let caps = CLF_TIMESTAMP.captures(line)?;
    Some(build_clf_record(&caps))
}

fn build_clf_record(caps: &regex::Captures<'_>) -> std::result::Result<AccessRecord, String> {
    let day: u32 = parse_field(&caps[1], "day")?;
    let month = month_from_abbrev(&caps[2])
        .ok_or_else(|| format!("unknown month abbreviation \"{}\"", &caps[2]))?;
    let year: i32 = parse_field(&caps[3], "year")?;
    let hour: u32 = parse_field(&caps[4], "hour")?;
    let minute: u32 = parse_field(&caps[5], "minute")?;

    AccessRecord::new(year, month, day, hour, minute).map_err(|e| e.to_string())
}

/// Parse a digit-only field, reporting overflow as a reason string.
fn parse_field<T: std::str::FromStr>(
    raw: &str,
    field: &'static str,
) -> std::result::Result<T, String> {
    raw.parse()
        .map_err(|_| format!("{} out of range: {}", field, raw))
}

/// Map an English three-letter month abbreviation to its 1-based number.
fn month_from_abbrev(abbrev: &str) -> Option<u32> {
    let lower = abbrev.to_ascii_lowercase();
    MONTH_ABBREVS
        .iter()
        .position(|m| *m == lower)
        .map(|idx| idx as u32 + 1)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    // ── Helpers ───────────────────────────────────────────────────────────────

    fn write_log(dir: &Path, name: &str, lines: &[&str]) -> PathBuf {
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        for line in lines {
            writeln!(file, "{}", line).unwrap();
        }
        path
    }

    fn drain(reader: &mut LogfileReader) -> Vec<AccessRecord> {
        let mut records = Vec::new();
        while reader.has_next() {
            records.push(reader.next_record().unwrap());
        }
        records
    }

    // ── find_log_files ────────────────────────────────────────────────────────

    #[test]
    fn test_find_log_files_in_flat_dir() {
        let dir = TempDir::new().unwrap();
        write_log(dir.path(), "a.log", &["2024 01 01 10 00"]);
        write_log(dir.path(), "b.txt", &["2024 01 01 11 00"]);

        let files = find_log_files(dir.path());
        assert_eq!(files.len(), 2);
    }

    #[test]
    fn test_find_log_files_recursive() {
        let dir = TempDir::new().unwrap();
        let sub = dir.path().join("2024-03");
        std::fs::create_dir_all(&sub).unwrap();
        write_log(dir.path(), "root.log", &["2024 01 01 10 00"]);
        write_log(&sub, "nested.log", &["2024 01 01 11 00"]);

        let files = find_log_files(dir.path());
        assert_eq!(files.len(), 2);
    }

    #[test]
    fn test_find_log_files_nonexistent_path() {
        let files = find_log_files(Path::new("/tmp/does-not-exist-weblog-test-xyz"));
        assert!(files.is_empty());
    }

    #[test]
    fn test_find_log_files_sorted() {
        let dir = TempDir::new().unwrap();
        write_log(dir.path(), "c.log", &["2024 01 01 10 00"]);
        write_log(dir.path(), "a.log", &["2024 01 01 10 00"]);
        write_log(dir.path(), "b.log", &["2024 01 01 10 00"]);

        let files = find_log_files(dir.path());
        let names: Vec<&str> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, vec!["a.log", "b.log", "c.log"]);
    }

    #[test]
    fn test_find_log_files_ignores_other_extensions() {
        let dir = TempDir::new().unwrap();
        write_log(dir.path(), "access.log", &["2024 01 01 10 00"]);
        write_log(dir.path(), "access.log.gz", &["binary junk"]);
        write_log(dir.path(), "notes.md", &["irrelevant"]);

        let files = find_log_files(dir.path());
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("access.log"));
    }

    // ── LogfileReader::open ───────────────────────────────────────────────────

    #[test]
    fn test_open_single_file() {
        let dir = TempDir::new().unwrap();
        let path = write_log(
            dir.path(),
            "weblog.txt",
            &["2024 01 15 10 30", "2024 01 15 11 00", "2024 01 15 12 45"],
        );

        let reader = LogfileReader::open(&path).unwrap();
        assert_eq!(reader.remaining(), 3);
        assert_eq!(reader.file_count(), 1);
    }

    #[test]
    fn test_open_yields_chronological_order() {
        let dir = TempDir::new().unwrap();
        let path = write_log(
            dir.path(),
            "weblog.txt",
            &["2024 06 01 18 00", "2023 12 31 23 59", "2024 06 01 07 15"],
        );

        let mut reader = LogfileReader::open(&path).unwrap();
        let records = drain(&mut reader);
        assert_eq!(records.len(), 3);
        assert!(records[0] < records[1]);
        assert!(records[1] < records[2]);
        assert_eq!(records[0].year, 2023);
    }

    #[test]
    fn test_open_directory_reads_all_files() {
        let dir = TempDir::new().unwrap();
        write_log(dir.path(), "access.log", &["2024 01 01 10 00"]);
        write_log(dir.path(), "access.log.1.txt", &["2024 01 02 11 00"]);

        let reader = LogfileReader::open(dir.path()).unwrap();
        assert_eq!(reader.remaining(), 2);
        assert_eq!(reader.file_count(), 2);
    }

    #[test]
    fn test_open_missing_path() {
        let err = LogfileReader::open("/tmp/does-not-exist-weblog-test-xyz").unwrap_err();
        assert!(matches!(err, WeblogError::LogPathNotFound(_)));
    }

    #[test]
    fn test_open_directory_without_logs() {
        let dir = TempDir::new().unwrap();
        write_log(dir.path(), "readme.md", &["not a log"]);

        let err = LogfileReader::open(dir.path()).unwrap_err();
        assert!(matches!(err, WeblogError::NoLogFiles(_)));
    }

    #[test]
    fn test_open_skips_blank_lines() {
        let dir = TempDir::new().unwrap();
        let path = write_log(
            dir.path(),
            "weblog.txt",
            &["2024 01 15 10 30", "", "   ", "2024 01 15 11 00"],
        );

        let reader = LogfileReader::open(&path).unwrap();
        assert_eq!(reader.remaining(), 2);
    }

    #[test]
    fn test_open_rejects_malformed_line() {
        let dir = TempDir::new().unwrap();
        let path = write_log(
            dir.path(),
            "weblog.txt",
            &["2024 01 15 10 30", "this is not a log line"],
        );

        let err = LogfileReader::open(&path).unwrap_err();
        match err {
            WeblogError::MalformedRecord { line, reason, .. } => {
                assert_eq!(line, 2);
                assert!(reason.contains("unrecognised"));
            }
            other => panic!("expected MalformedRecord, got {other:?}"),
        }
    }

    #[test]
    fn test_open_rejects_out_of_domain_hour() {
        let dir = TempDir::new().unwrap();
        let path = write_log(dir.path(), "weblog.txt", &["2024 01 15 24 00"]);

        let err = LogfileReader::open(&path).unwrap_err();
        match err {
            WeblogError::MalformedRecord { line, reason, .. } => {
                assert_eq!(line, 1);
                assert!(reason.contains("hour 24"));
            }
            other => panic!("expected MalformedRecord, got {other:?}"),
        }
    }

    #[test]
    fn test_open_rejects_out_of_domain_month() {
        let dir = TempDir::new().unwrap();
        let path = write_log(dir.path(), "weblog.txt", &["2024 13 01 10 00"]);

        let err = LogfileReader::open(&path).unwrap_err();
        assert!(err.to_string().contains("month 13"));
    }

    // ── Common Log Format ─────────────────────────────────────────────────────

    #[test]
    fn test_open_parses_clf_line() {
        let dir = TempDir::new().unwrap();
        let path = write_log(
            dir.path(),
            "access.log",
            &[r#"203.0.113.9 - - [10/Oct/2000:13:55:36 -0700] "GET /apache_pb.gif HTTP/1.0" 200 2326"#],
        );

        let mut reader = LogfileReader::open(&path).unwrap();
        let record = reader.next_record().unwrap();
        assert_eq!(record.year, 2000);
        assert_eq!(record.month, 10);
        assert_eq!(record.day, 10);
        assert_eq!(record.hour, 13);
        assert_eq!(record.minute, 55);
    }

    #[test]
    fn test_open_parses_clf_positive_offset_and_single_digit_day() {
        let dir = TempDir::new().unwrap();
        let path = write_log(
            dir.path(),
            "access.log",
            &[r#"198.51.100.4 - frank [3/Jan/2024:08:05:59 +0100] "POST /api HTTP/1.1" 201 512"#],
        );

        let mut reader = LogfileReader::open(&path).unwrap();
        let record = reader.next_record().unwrap();
        assert_eq!(record.year, 2024);
        assert_eq!(record.month, 1);
        assert_eq!(record.day, 3);
        assert_eq!(record.hour, 8);
        assert_eq!(record.minute, 5);
    }

    #[test]
    fn test_open_rejects_unknown_month_abbrev() {
        let dir = TempDir::new().unwrap();
        let path = write_log(
            dir.path(),
            "access.log",
            &[r#"203.0.113.9 - - [10/Xxx/2000:13:55:36 -0700] "GET / HTTP/1.0" 200 10"#],
        );

        let err = LogfileReader::open(&path).unwrap_err();
        assert!(err.to_string().contains("month abbreviation"));
    }

    #[test]
    fn test_open_mixed_formats_in_one_file() {
        let dir = TempDir::new().unwrap();
        let path = write_log(
            dir.path(),
            "access.log",
            &[
                "2024 05 20 09 15",
                r#"203.0.113.9 - - [20/May/2024:10:30:00 +0000] "GET / HTTP/1.1" 200 512"#,
            ],
        );

        let mut reader = LogfileReader::open(&path).unwrap();
        let records = drain(&mut reader);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].hour, 9);
        assert_eq!(records[1].hour, 10);
    }

    // ── RecordSource cursor ───────────────────────────────────────────────────

    #[test]
    fn test_from_records_sorts_chronologically() {
        let later = AccessRecord::new(2024, 8, 1, 12, 0).unwrap();
        let earlier = AccessRecord::new(2024, 7, 31, 23, 0).unwrap();

        let mut reader = LogfileReader::from_records(vec![later, earlier]);
        assert_eq!(reader.next_record().unwrap(), earlier);
        assert_eq!(reader.next_record().unwrap(), later);
    }

    #[test]
    fn test_cursor_is_single_pass() {
        let record = AccessRecord::new(2024, 1, 1, 0, 0).unwrap();
        let mut reader = LogfileReader::from_records(vec![record]);

        assert!(reader.has_next());
        reader.next_record().unwrap();
        assert!(!reader.has_next());
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn test_next_record_after_drain_is_exhausted() {
        let record = AccessRecord::new(2024, 1, 1, 0, 0).unwrap();
        let mut reader = LogfileReader::from_records(vec![record]);
        reader.next_record().unwrap();

        let err = reader.next_record().unwrap_err();
        assert!(matches!(err, WeblogError::SourceExhausted));
    }

    #[test]
    fn test_empty_reader_has_no_next() {
        let reader = LogfileReader::from_records(Vec::new());
        assert!(!reader.has_next());
        assert_eq!(reader.remaining(), 0);
    }
}
