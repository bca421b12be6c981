//! Data layer for the weblog analyzer.
//!
//! Discovers, reads and parses access-log files, accumulates the per-hour,
//! per-day and per-month counter tables, answers the derived-statistic
//! queries and renders reports for downstream consumers.

pub mod analysis;
pub mod analyzer;
pub mod generator;
pub mod reader;
pub mod report;

pub use weblog_core as core;
