use crate::config::Config;
use crate::core::attendance::read_table;
use crate::core::hours::{format_hours, hours_between};
use crate::errors::AppResult;
use crate::models::attendance::{AttendanceRow, AttendanceTable, EARLY_PICKUP_FLAG};
use crate::models::row_target::RowTarget;
use crate::sheets::{SheetRange, SheetService, ValueRange};
use crate::utils::time::{format_clock_time, format_sheet_date};
use chrono::NaiveDateTime;
use tracing::info;

/// Values the clock writes that come from configuration.
#[derive(Debug, Clone)]
pub struct ClockSettings {
    pub alcohol_check: String,
    pub early_start: String,
    pub early_end: String,
    pub row_target: RowTarget,
}

impl Default for ClockSettings {
    fn default() -> Self {
        Self {
            alcohol_check: "0.00mg".to_string(),
            early_start: "06:00:00 AM".to_string(),
            early_end: "08:30:00 AM".to_string(),
            row_target: RowTarget::Open,
        }
    }
}

impl ClockSettings {
    pub fn from_config(cfg: &Config) -> Self {
        Self {
            alcohol_check: cfg.alcohol_check.clone(),
            early_start: cfg.early_shift.start.clone(),
            early_end: cfg.early_shift.end.clone(),
            row_target: cfg.row_target,
        }
    }
}

/// What a clock-out did.
#[derive(Debug, Clone, PartialEq)]
pub enum ClockOutOutcome {
    /// Nothing to close; no write was made. `read_warning` is set when the
    /// tab could not be read at all.
    NoOpenEntry { read_warning: Option<String> },
    /// End Time and Hours Worked written to sheet row `row`.
    Closed {
        row: usize,
        start_time: String,
        end_time: String,
        hours: String,
    },
}

/// High-level business logic for the clock commands.
pub struct ClockLogic;

impl ClockLogic {
    /// Append an open row stamped with `now`.
    pub fn clock_in(
        service: &dyn SheetService,
        settings: &ClockSettings,
        staff: &str,
        now: NaiveDateTime,
    ) -> AppResult<AttendanceRow> {
        let row = AttendanceRow {
            date: format_sheet_date(now),
            start_time: format_clock_time(now.time()),
            alcohol_check: settings.alcohol_check.clone(),
            ..Default::default()
        };

        service.append_row(&SheetRange::attendance(staff), &row.to_cells())?;
        info!(staff, start = %row.start_time, "clocked in");

        Ok(row)
    }

    /// Close the most recent open row with `now` as End Time.
    pub fn clock_out(
        service: &dyn SheetService,
        settings: &ClockSettings,
        staff: &str,
        now: NaiveDateTime,
    ) -> AppResult<ClockOutOutcome> {
        let read = read_table(service, staff);

        let Some((open_index, open_row)) = read.table.last_open() else {
            return Ok(ClockOutOutcome::NoOpenEntry {
                read_warning: read.warning,
            });
        };

        let row = target_row(&read.table, open_index, settings.row_target);
        let end_time = format_clock_time(now.time());
        let hours = format_hours(hours_between(&open_row.start_time, &end_time));

        service.batch_update(&[
            ValueRange::cell(SheetRange::cell(staff, 'D', row), end_time.clone()),
            ValueRange::cell(SheetRange::cell(staff, 'E', row), hours.clone()),
        ])?;
        info!(staff, row, end = %end_time, hours = %hours, "clocked out");

        Ok(ClockOutOutcome::Closed {
            row,
            start_time: open_row.start_time.clone(),
            end_time,
            hours,
        })
    }

    /// Append the fixed early morning shift for `now`'s date, already closed.
    pub fn early_shift(
        service: &dyn SheetService,
        settings: &ClockSettings,
        staff: &str,
        now: NaiveDateTime,
    ) -> AppResult<AttendanceRow> {
        let row = AttendanceRow {
            date: format_sheet_date(now),
            start_time: settings.early_start.clone(),
            alcohol_check: settings.alcohol_check.clone(),
            end_time: settings.early_end.clone(),
            hours_worked: format_hours(hours_between(&settings.early_start, &settings.early_end)),
            early_pickup: EARLY_PICKUP_FLAG.to_string(),
        };

        service.append_row(&SheetRange::attendance(staff), &row.to_cells())?;
        info!(staff, date = %row.date, "early shift recorded");

        Ok(row)
    }
}

/// Sheet row a clock-out writes to.
pub fn target_row(table: &AttendanceTable, open_index: usize, target: RowTarget) -> usize {
    match target {
        RowTarget::Open => AttendanceTable::sheet_row(open_index),
        RowTarget::Last => AttendanceTable::sheet_row(table.len().saturating_sub(1)),
    }
}
