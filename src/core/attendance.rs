//! Reading a staff tab into an [`AttendanceTable`].

use crate::core::hours::{format_hours, hours_between};
use crate::errors::AppResult;
use crate::models::attendance::{AttendanceRow, AttendanceTable};
use crate::sheets::{SheetRange, SheetService};
use tracing::{debug, warn};

/// Result of a lenient read: the table (possibly empty) and a user-facing
/// warning when the fetch failed.
#[derive(Debug, Default)]
pub struct TableRead {
    pub table: AttendanceTable,
    pub warning: Option<String>,
}

/// Normalize raw tab values. The first row is the header and is skipped.
pub fn normalize(values: &[Vec<String>]) -> AttendanceTable {
    let rows = values
        .iter()
        .skip(1)
        .map(|cells| {
            let mut row = AttendanceRow::from_cells(cells);
            if !row.is_open() && row.hours_worked.trim().is_empty() {
                row.hours_worked = format_hours(hours_between(&row.start_time, &row.end_time));
            }
            row
        })
        .collect();

    AttendanceTable::new(rows)
}

/// Fetch and normalize a staff tab, propagating any failure.
pub fn fetch_table(service: &dyn SheetService, staff: &str) -> AppResult<AttendanceTable> {
    let values = service.get_values(&SheetRange::attendance(staff))?;
    debug!(staff, rows = values.len(), "tab fetched");
    Ok(normalize(&values))
}

/// Fetch a staff tab; on failure return an empty table and a warning.
pub fn read_table(service: &dyn SheetService, staff: &str) -> TableRead {
    match fetch_table(service, staff) {
        Ok(table) => TableRead {
            table,
            warning: None,
        },
        Err(e) => {
            warn!(staff, error = %e, "failed to read staff tab");
            TableRead {
                table: AttendanceTable::default(),
                warning: Some(format!(
                    "Error loading data for {staff}. Make sure their sheet exists."
                )),
            }
        }
    }
}
