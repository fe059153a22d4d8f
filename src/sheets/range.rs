//! A1-notation ranges addressed to a single staff tab.

use std::fmt;

/// First and last column of an attendance tab.
pub const FIRST_COLUMN: char = 'A';
pub const LAST_COLUMN: char = 'F';

/// A rectangular range inside one tab.
///
/// `row == None` selects whole columns (`'Tab'!A:F`), otherwise a single row
/// slice (`'Tab'!D5` or `'Tab'!D5:E5`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetRange {
    pub tab: String,
    pub first_col: char,
    pub last_col: char,
    pub row: Option<usize>,
}

impl SheetRange {
    /// Whole attendance columns A:F of a tab.
    pub fn attendance(tab: &str) -> Self {
        Self::columns(tab, FIRST_COLUMN, LAST_COLUMN)
    }

    pub fn columns(tab: &str, first_col: char, last_col: char) -> Self {
        Self {
            tab: tab.to_string(),
            first_col,
            last_col,
            row: None,
        }
    }

    /// One cell, `row` is the 1-based sheet row.
    pub fn cell(tab: &str, col: char, row: usize) -> Self {
        Self {
            tab: tab.to_string(),
            first_col: col,
            last_col: col,
            row: Some(row),
        }
    }

    /// Tab name quoted for A1 notation; embedded quotes are doubled.
    pub fn quoted_tab(&self) -> String {
        format!("'{}'", self.tab.replace('\'', "''"))
    }

    pub fn to_a1(&self) -> String {
        match self.row {
            None => format!("{}!{}:{}", self.quoted_tab(), self.first_col, self.last_col),
            Some(r) if self.first_col == self.last_col => {
                format!("{}!{}{}", self.quoted_tab(), self.first_col, r)
            }
            Some(r) => format!(
                "{}!{}{}:{}{}",
                self.quoted_tab(),
                self.first_col,
                r,
                self.last_col,
                r
            ),
        }
    }
}

impl fmt::Display for SheetRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_a1())
    }
}

/// Zero-based position of a column letter (A = 0).
pub fn column_index(col: char) -> usize {
    (col.to_ascii_uppercase() as u8).saturating_sub(b'A') as usize
}
