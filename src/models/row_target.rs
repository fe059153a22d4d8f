use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// How clock-out picks the sheet row it writes to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RowTarget {
    /// The row of the most recent open entry.
    #[default]
    Open,
    /// The last row of the tab, whatever its state.
    Last,
}

impl RowTarget {
    pub fn as_str(&self) -> &'static str {
        match self {
            RowTarget::Open => "open",
            RowTarget::Last => "last",
        }
    }
}
