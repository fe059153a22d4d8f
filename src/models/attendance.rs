use serde::Serialize;

/// Column headers of an attendance tab, in sheet order (A..F).
pub const COLUMNS: [&str; 6] = [
    "Date",
    "Start Time",
    "Alcohol Check",
    "End Time",
    "Hours Worked",
    "Early Pick Up",
];

/// Value written in the Early Pick Up column for fixed early shifts.
pub const EARLY_PICKUP_FLAG: &str = "Yes";

/// One attendance row of a staff tab.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AttendanceRow {
    #[serde(rename = "Date")]
    pub date: String, // A, "YYYY/MM/DD"
    #[serde(rename = "Start Time")]
    pub start_time: String, // B, "hh:mm:ss AM"
    #[serde(rename = "Alcohol Check")]
    pub alcohol_check: String, // C
    #[serde(rename = "End Time")]
    pub end_time: String, // D, empty while open
    #[serde(rename = "Hours Worked")]
    pub hours_worked: String, // E
    #[serde(rename = "Early Pick Up")]
    pub early_pickup: String, // F, "Yes" or empty
}

impl AttendanceRow {
    /// Build a row from raw sheet cells: short rows are padded with empty
    /// strings, cells past column F are ignored.
    pub fn from_cells(cells: &[String]) -> Self {
        let cell = |i: usize| cells.get(i).cloned().unwrap_or_default();
        Self {
            date: cell(0),
            start_time: cell(1),
            alcohol_check: cell(2),
            end_time: cell(3),
            hours_worked: cell(4),
            early_pickup: cell(5),
        }
    }

    /// Cells in sheet order, always six of them.
    pub fn to_cells(&self) -> Vec<String> {
        vec![
            self.date.clone(),
            self.start_time.clone(),
            self.alcohol_check.clone(),
            self.end_time.clone(),
            self.hours_worked.clone(),
            self.early_pickup.clone(),
        ]
    }

    /// An open row is an in-progress shift: no End Time yet.
    pub fn is_open(&self) -> bool {
        self.end_time.trim().is_empty()
    }

    pub fn is_early_pickup(&self) -> bool {
        self.early_pickup.trim().eq_ignore_ascii_case(EARLY_PICKUP_FLAG)
    }
}

/// A staff tab normalized to the fixed column set, in sheet order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttendanceTable {
    pub rows: Vec<AttendanceRow>,
}

impl AttendanceTable {
    pub fn new(rows: Vec<AttendanceRow>) -> Self {
        Self { rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// 1-based sheet row of the data row at `index` (row 1 is the header).
    pub fn sheet_row(index: usize) -> usize {
        index + 2
    }

    /// Index and row of the most recent open entry, by sheet order.
    pub fn last_open(&self) -> Option<(usize, &AttendanceRow)> {
        self.rows.iter().enumerate().rev().find(|(_, r)| r.is_open())
    }

    pub fn open_count(&self) -> usize {
        self.rows.iter().filter(|r| r.is_open()).count()
    }

    /// Rows for display: newest date first; within a date, later appends first.
    pub fn recent(&self, limit: Option<usize>) -> Vec<&AttendanceRow> {
        let mut out: Vec<&AttendanceRow> = self.rows.iter().rev().collect();
        out.sort_by(|a, b| b.date.cmp(&a.date));
        if let Some(n) = limit {
            out.truncate(n);
        }
        out
    }
}
