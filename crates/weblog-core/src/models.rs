use serde::{Deserialize, Serialize};

use crate::error::{Result, WeblogError};

/// Number of slots in the hourly counter table. Hours are 0-based (0-23).
pub const HOUR_SLOTS: usize = 24;

/// Number of slots in the daily counter table. Days are 1-based (1-31);
/// slot 0 is reserved and never counted.
pub const DAY_SLOTS: usize = 32;

/// Number of slots in the monthly counter table. Months are 1-based (1-12);
/// slot 0 is reserved and never counted.
pub const MONTH_SLOTS: usize = 13;

/// A single access-log entry with its timestamp split into time-unit fields.
///
/// The aggregation engine only reads `hour`, `day` and `month`, but the full
/// five-field timestamp is carried so sources can order records
/// chronologically. Field order matters: the derived `Ord` compares
/// year, then month, then day, then hour, then minute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AccessRecord {
    /// Calendar year, e.g. 2024.
    pub year: i32,
    /// Month of year, 1-12.
    pub month: u32,
    /// Day of month, 1-31.
    pub day: u32,
    /// Hour of day, 0-23.
    pub hour: u32,
    /// Minute of hour, 0-59.
    pub minute: u32,
}

impl AccessRecord {
    /// Build a record, rejecting any time field outside its documented domain
    /// with [`WeblogError::DomainViolation`].
    pub fn new(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> Result<Self> {
        check_domain("month", month, 1, 12)?;
        check_domain("day", day, 1, 31)?;
        check_domain("hour", hour, 0, 23)?;
        check_domain("minute", minute, 0, 59)?;
        Ok(Self {
            year,
            month,
            day,
            hour,
            minute,
        })
    }
}

fn check_domain(field: &'static str, value: u32, min: u32, max: u32) -> Result<()> {
    if value < min || value > max {
        return Err(WeblogError::DomainViolation {
            field,
            value,
            min,
            max,
        });
    }
    Ok(())
}

/// A forward-only, single-pass cursor over access records.
///
/// The cursor cannot be reset: every record is observed at most once, and a
/// source that has been drained stays drained. Callers check
/// [`has_next`](RecordSource::has_next) before each
/// [`next_record`](RecordSource::next_record) call; calling `next_record` on
/// a dry source fails with [`WeblogError::SourceExhausted`].
pub trait RecordSource {
    /// `true` when at least one more record is available.
    fn has_next(&self) -> bool;

    /// Return the next record and advance the cursor irreversibly.
    fn next_record(&mut self) -> Result<AccessRecord>;
}
