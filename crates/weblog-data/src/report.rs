//! Plain-text report rendering for the weblog analyzer.
//!
//! Pure formatting over the counter tables: row enumerators yield
//! `(unit, count)` pairs across the full domain of a table in ascending
//! order, and the `write_*` functions render two-column text to any
//! [`io::Write`] sink.

use std::io::{self, Write};

use weblog_core::formatting::format_count;
use weblog_core::models::{DAY_SLOTS, HOUR_SLOTS, MONTH_SLOTS};

use crate::analysis::LogReport;

// ── Row enumeration ───────────────────────────────────────────────────────────

/// `(hour, count)` pairs for hours 0-23, zero counts included.
pub fn hourly_rows(counts: &[u64; HOUR_SLOTS]) -> Vec<(u32, u64)> {
    (0..HOUR_SLOTS).map(|h| (h as u32, counts[h])).collect()
}

/// `(day, count)` pairs for days 1-31. The unused slot 0 is never emitted.
pub fn daily_rows(counts: &[u64; DAY_SLOTS]) -> Vec<(u32, u64)> {
    (1..DAY_SLOTS).map(|d| (d as u32, counts[d])).collect()
}

/// `(month, count)` pairs for months 1-12. The unused slot 0 is never emitted.
pub fn monthly_rows(counts: &[u64; MONTH_SLOTS]) -> Vec<(u32, u64)> {
    (1..MONTH_SLOTS).map(|m| (m as u32, counts[m])).collect()
}

// ── Text rendering ────────────────────────────────────────────────────────────

/// Write the hourly counter table as a two-column report.
pub fn write_hourly_counts(out: &mut impl Write, counts: &[u64; HOUR_SLOTS]) -> io::Result<()> {
    writeln!(out, "Hour  Accesses")?;
    for (hour, count) in hourly_rows(counts) {
        writeln!(out, "{:>4}  {}", hour, format_count(count))?;
    }
    Ok(())
}

/// Write the daily counter table as a two-column report.
pub fn write_daily_counts(out: &mut impl Write, counts: &[u64; DAY_SLOTS]) -> io::Result<()> {
    writeln!(out, "Day  Accesses")?;
    for (day, count) in daily_rows(counts) {
        writeln!(out, "{:>3}  {}", day, format_count(count))?;
    }
    Ok(())
}

/// Write the monthly counter table as a two-column report.
pub fn write_monthly_counts(out: &mut impl Write, counts: &[u64; MONTH_SLOTS]) -> io::Result<()> {
    writeln!(out, "Month  Accesses")?;
    for (month, count) in monthly_rows(counts) {
        writeln!(out, "{:>5}  {}", month, format_count(count))?;
    }
    Ok(())
}

/// Write the access total and the seven derived statistics.
pub fn write_summary(out: &mut impl Write, report: &LogReport) -> io::Result<()> {
    let window_start = report.peaks.busiest_two_hour_window;
    let window_end = (window_start + 1) % HOUR_SLOTS as u32;

    writeln!(
        out,
        "{:<24} {}",
        "Total accesses:",
        format_count(report.total_accesses)
    )?;
    writeln!(out)?;
    writeln!(out, "{:<24} {}", "Busiest hour:", report.peaks.busiest_hour)?;
    writeln!(
        out,
        "{:<24} {}",
        "Quietest hour:", report.peaks.quietest_hour
    )?;
    writeln!(
        out,
        "{:<24} {}-{}",
        "Busiest two-hour window:", window_start, window_end
    )?;
    writeln!(out, "{:<24} {}", "Busiest day:", report.peaks.busiest_day)?;
    writeln!(out, "{:<24} {}", "Quietest day:", report.peaks.quietest_day)?;
    writeln!(
        out,
        "{:<24} {}",
        "Busiest month:", report.peaks.busiest_month
    )?;
    writeln!(
        out,
        "{:<24} {}",
        "Quietest month:", report.peaks.quietest_month
    )?;
    Ok(())
}

/// Write the summary followed by all three counter tables.
pub fn write_full_report(out: &mut impl Write, report: &LogReport) -> io::Result<()> {
    write_summary(out, report)?;
    writeln!(out)?;
    write_hourly_counts(out, &report.hourly)?;
    writeln!(out)?;
    write_daily_counts(out, &report.daily)?;
    writeln!(out)?;
    write_monthly_counts(out, &report.monthly)?;
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
