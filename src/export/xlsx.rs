// src/export/xlsx.rs

use crate::errors::{AppError, AppResult};
use crate::export::model::{get_headers, rows_to_table};
use crate::export::notify_export_success;
use crate::models::attendance::AttendanceRow;
use crate::ui::messages::info;
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, FormatPattern, Workbook};
use std::path::Path;
use unicode_width::UnicodeWidthStr;

/// Hours Worked column, written as a number.
const HOURS_COL: usize = 4;

/// XLSX export with a styled header, banded rows and fitted column widths.
pub(crate) fn export_xlsx(staff: &str, rows: &[AttendanceRow], path: &Path) -> AppResult<()> {
    info(format!("Exporting to XLSX: {}", path.display()));

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet_name(staff)).map_err(to_export_error)?;

    let headers = get_headers();

    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::RGB(0xFFFFFF))
        .set_background_color(Color::RGB(0x2F75B5))
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin);

    for (col, header) in headers.iter().enumerate() {
        worksheet
            .write_with_format(0, col as u16, *header, &header_format)
            .map_err(to_export_error)?;
    }

    worksheet.set_freeze_panes(1, 0).ok();

    let mut col_widths: Vec<usize> = headers.iter().map(|h| UnicodeWidthStr::width(*h)).collect();

    let band1 = Color::RGB(0xEAF3FB);
    let band2 = Color::RGB(0xFFFFFF);

    for (row_index, values) in rows_to_table(rows).iter().enumerate() {
        let row = (row_index + 1) as u32;
        let band_color = if row_index % 2 == 0 { band1 } else { band2 };

        for (col, value) in values.iter().enumerate() {
            let base = Format::new()
                .set_background_color(band_color)
                .set_pattern(FormatPattern::Solid)
                .set_border(FormatBorder::Thin);

            match value.parse::<f64>() {
                Ok(num) if col == HOURS_COL => {
                    let fmt = base.set_align(FormatAlign::Right).set_num_format("0.00");
                    worksheet
                        .write_with_format(row, col as u16, num, &fmt)
                        .map_err(to_export_error)?;
                }
                _ => {
                    worksheet
                        .write_with_format(row, col as u16, value.as_str(), &base)
                        .map_err(to_export_error)?;
                }
            }

            col_widths[col] = col_widths[col].max(UnicodeWidthStr::width(value.as_str()));
        }
    }

    for (c, w) in col_widths.iter().enumerate() {
        worksheet
            .set_column_width(c as u16, *w as f64 + 2.0)
            .map_err(to_export_error)?;
    }

    workbook.save(path).map_err(to_export_error)?;

    notify_export_success("XLSX", path);
    Ok(())
}

/// Worksheet names are limited to 31 characters and cannot contain []:*?/\
fn sheet_name(staff: &str) -> String {
    let cleaned: String = staff
        .chars()
        .filter(|c| !matches!(c, '[' | ']' | ':' | '*' | '?' | '/' | '\\'))
        .take(31)
        .collect();
    if cleaned.trim().is_empty() {
        "Attendance".to_string()
    } else {
        cleaned
    }
}

fn to_export_error<E: std::fmt::Display>(e: E) -> AppError {
    AppError::Export(e.to_string())
}
