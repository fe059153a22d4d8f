//! Time utilities: sheet date/time formats, 12-hour clock parsing, "now" in
//! the configured zone.

use crate::errors::{AppError, AppResult};
use chrono::{Local, NaiveDateTime, NaiveTime, Utc};
use chrono_tz::Tz;

/// Date column format, e.g. `2025/03/14`.
pub const SHEET_DATE_FORMAT: &str = "%Y/%m/%d";

/// Start/End column format, e.g. `02:15:30 PM`.
pub const CLOCK_FORMAT: &str = "%I:%M:%S %p";

pub fn parse_clock_time(t: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(t.trim(), CLOCK_FORMAT).ok()
}

pub fn format_clock_time(t: NaiveTime) -> String {
    t.format(CLOCK_FORMAT).to_string()
}

pub fn format_sheet_date(dt: NaiveDateTime) -> String {
    dt.format(SHEET_DATE_FORMAT).to_string()
}

/// Validate a configured timezone name.
pub fn parse_timezone(name: &str) -> AppResult<Tz> {
    name.trim()
        .parse::<Tz>()
        .map_err(|_| AppError::InvalidTimezone(name.to_string()))
}

/// Wall-clock "now" in the named zone, or in local time when none is set.
pub fn now_in(timezone: Option<&str>) -> AppResult<NaiveDateTime> {
    match timezone {
        Some(name) if !name.trim().is_empty() => {
            let tz = parse_timezone(name)?;
            Ok(Utc::now().with_timezone(&tz).naive_local())
        }
        _ => Ok(Local::now().naive_local()),
    }
}

/// Parse a clock time given on the command line, in sheet format.
pub fn parse_required_clock_time(input: &str) -> AppResult<NaiveTime> {
    parse_clock_time(input).ok_or_else(|| AppError::InvalidTime(input.to_string()))
}
