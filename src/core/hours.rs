//! Hours worked between two sheet clock times.

use crate::utils::time::parse_clock_time;

const SECONDS_PER_DAY: i64 = 24 * 3600;

/// Elapsed hours from `start` to `end`, rounded to two decimals.
///
/// Both values use the sheet clock format (`09:00:00 AM`). A blank or
/// unparsable side yields `None`. An end earlier on the clock than the start
/// is read as a shift that crossed midnight.
pub fn hours_between(start: &str, end: &str) -> Option<f64> {
    if start.trim().is_empty() || end.trim().is_empty() {
        return None;
    }

    let s = parse_clock_time(start)?;
    let e = parse_clock_time(end)?;

    let mut secs = (e - s).num_seconds();
    if secs < 0 {
        secs += SECONDS_PER_DAY;
    }

    Some(round2(secs as f64 / 3600.0))
}

pub fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Hours as written to the sheet: `8.50`, or empty when unknown.
pub fn format_hours(hours: Option<f64>) -> String {
    hours.map(|h| format!("{h:.2}")).unwrap_or_default()
}
