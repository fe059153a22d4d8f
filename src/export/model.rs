// src/export/model.rs

use crate::models::attendance::{AttendanceRow, COLUMNS};

/// Header for CSV / XLSX
pub(crate) fn get_headers() -> Vec<&'static str> {
    COLUMNS.to_vec()
}

/// Attendance rows as string tables (XLSX).
pub(crate) fn rows_to_table(rows: &[AttendanceRow]) -> Vec<Vec<String>> {
    rows.iter().map(AttendanceRow::to_cells).collect()
}
