//! Spreadsheet service access.
//!
//! The rest of the crate only talks to [`SheetService`]; the Google Sheets
//! implementation lives in [`http`], authentication in [`credentials`].

pub mod credentials;
pub mod http;
pub mod range;

pub use http::HttpSheets;
pub use range::SheetRange;

use crate::errors::AppResult;

/// Values destined for one range of a batched update.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueRange {
    pub range: SheetRange,
    pub values: Vec<Vec<String>>,
}

impl ValueRange {
    /// A single-cell write.
    pub fn cell(range: SheetRange, value: impl Into<String>) -> Self {
        Self {
            range,
            values: vec![vec![value.into()]],
        }
    }
}

/// The three operations the time clock needs from the spreadsheet.
pub trait SheetService {
    /// Read a rectangular range. Rows may be ragged; trailing empty cells are
    /// usually omitted by the service.
    fn get_values(&self, range: &SheetRange) -> AppResult<Vec<Vec<String>>>;

    /// Append one row after the last non-empty row of the range's tab.
    fn append_row(&self, range: &SheetRange, row: &[String]) -> AppResult<()>;

    /// Write several ranges in one request.
    fn batch_update(&self, data: &[ValueRange]) -> AppResult<()>;
}
