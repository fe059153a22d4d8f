// src/export/logic.rs

use crate::core::attendance::fetch_table;
use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::xlsx::export_xlsx;
use crate::sheets::SheetService;
use crate::ui::messages::warning;
use std::path::Path;

/// High-level export logic.
pub struct ExportLogic;

impl ExportLogic {
    /// Export a staff member's tab.
    ///
    /// - `format`: csv | json | xlsx
    /// - `file`: absolute output path
    ///
    /// Returns the number of rows written (0 when the tab has no entries and
    /// nothing was written).
    pub fn export(
        service: &dyn SheetService,
        staff: &str,
        format: ExportFormat,
        file: &str,
        force: bool,
    ) -> AppResult<usize> {
        let path = Path::new(file);

        if !path.is_absolute() {
            return Err(AppError::Export(format!(
                "output file path must be absolute: {file}"
            )));
        }

        ensure_writable(path, force)?;

        let table = fetch_table(service, staff)?;

        if table.is_empty() {
            warning(format!("No entries found for {staff}."));
            return Ok(0);
        }

        match format {
            ExportFormat::Csv => export_csv(&table.rows, path)?,
            ExportFormat::Json => export_json(&table.rows, path)?,
            ExportFormat::Xlsx => export_xlsx(staff, &table.rows, path)?,
        }

        Ok(table.len())
    }
}
