use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the weblog analyzer.
#[derive(Error, Debug)]
pub enum WeblogError {
    /// A log file could not be opened or read from disk.
    #[error("Failed to read log file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A log file could not be created or written to disk.
    #[error("Failed to write log file {path}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A log line could not be parsed into an access record.
    #[error("Malformed record at {path}:{line}: {reason}")]
    MalformedRecord {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    /// A timestamp field fell outside its documented domain.
    #[error("{field} {value} out of domain [{min}, {max}]")]
    DomainViolation {
        field: &'static str,
        value: u32,
        min: u32,
        max: u32,
    },

    /// `next_record()` was called after the record source ran dry.
    #[error("Record source exhausted: no records remain")]
    SourceExhausted,

    /// The log path given on the command line (or the default) does not exist.
    #[error("Log path not found: {0}")]
    LogPathNotFound(PathBuf),

    /// No log files were found under the given directory.
    #[error("No log files found in {0}")]
    NoLogFiles(PathBuf),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the analyzer crates.
pub type Result<T> = std::result::Result<T, WeblogError>;
