mod bootstrap;

use std::io::Write;

use anyhow::Result;
use weblog_core::settings::Settings;
use weblog_data::analysis::analyze_log;
use weblog_data::generator::LogfileCreator;
use weblog_data::report::{
    write_daily_counts, write_full_report, write_hourly_counts, write_monthly_counts,
    write_summary,
};

fn main() -> Result<()> {
    let settings = Settings::from_args();

    bootstrap::setup_logging(&settings.log_level)?;

    tracing::info!("Weblog Analyzer v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!("View: {}, Format: {}", settings.view, settings.format);

    let path = bootstrap::resolve_log_path(settings.file.as_deref());

    if let Some(entries) = settings.generate {
        tracing::info!("Generating {} sample records into {}", entries, path.display());
        let mut creator = match settings.seed {
            Some(seed) => LogfileCreator::with_seed(seed),
            None => LogfileCreator::new(),
        };
        creator.create_file(&path, entries)?;
        println!("Wrote {} records to {}", entries, path.display());
        return Ok(());
    }

    let report = analyze_log(&path)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    if settings.format == "json" {
        // JSON always carries the complete report; --view only shapes the
        // text rendering.
        writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
        return Ok(());
    }

    match settings.view.as_str() {
        "hourly" => write_hourly_counts(&mut out, &report.hourly)?,
        "daily" => write_daily_counts(&mut out, &report.daily)?,
        "monthly" => write_monthly_counts(&mut out, &report.monthly)?,
        "all" => write_full_report(&mut out, &report)?,
        _ => write_summary(&mut out, &report)?,
    }

    Ok(())
}
