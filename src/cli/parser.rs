use crate::export::ExportFormat;
use crate::models::row_target::RowTarget;
use clap::{Parser, Subcommand};

/// Command-line interface definition for sheetclock
/// Staff time clock backed by one Google Sheets tab per employee
#[derive(Parser)]
#[command(
    name = "sheetclock",
    version = env!("CARGO_PKG_VERSION"),
    about = "A staff time clock: clock in/out into per-employee Google Sheets tabs",
    long_about = None
)]
pub struct Cli {
    /// Use an alternate configuration file
    #[arg(global = true, long = "config", value_name = "FILE")]
    pub config: Option<String>,

    /// Override the spreadsheet id from the configuration
    #[arg(global = true, long = "spreadsheet", value_name = "ID")]
    pub spreadsheet: Option<String>,

    /// Override the journal database path
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the configuration file and the local journal
    Init,

    /// Manage the configuration file (view, check or edit)
    Config {
        /// Print the current configuration
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        /// Report fields missing from the configuration file
        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        /// Add missing fields with their default values
        #[arg(long = "migrate", help = "Add missing configuration fields")]
        migrate: bool,

        /// Edit the configuration file with your preferred editor
        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        /// Editor to use (overrides $EDITOR/$VISUAL)
        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// List or maintain the configured staff members
    Staff {
        /// Add a staff member (their tab must exist in the spreadsheet)
        #[arg(long = "add", value_name = "NAME", conflicts_with = "remove")]
        add: Option<String>,

        /// Remove a staff member from the list (the tab is left untouched)
        #[arg(long = "remove", value_name = "NAME")]
        remove: Option<String>,
    },

    /// Clock in: append an open row with the current date and time
    Start {
        /// Staff member (tab name)
        staff: String,
    },

    /// Clock out: close the most recent open row
    End {
        /// Staff member (tab name)
        staff: String,

        /// Which row receives the end time (default from configuration)
        #[arg(long = "target", value_enum)]
        target: Option<RowTarget>,
    },

    /// Record the fixed early morning shift (already closed)
    Early {
        /// Staff member (tab name)
        staff: String,
    },

    /// Show recent time entries
    List {
        /// Staff member (tab name)
        staff: String,

        /// Number of rows to show (default from configuration)
        #[arg(long, short = 'n')]
        limit: Option<usize>,

        /// Show every row
        #[arg(long, conflicts_with = "limit")]
        all: bool,
    },

    /// Compute hours between two clock times (e.g. "09:00:00 AM" "05:30:00 PM")
    Hours {
        /// Start time (hh:mm:ss AM/PM)
        start: String,

        /// End time (hh:mm:ss AM/PM)
        end: String,
    },

    /// Print the internal action journal
    Log {
        /// Print rows from the internal `log` table
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Export a staff member's entries
    Export {
        /// Staff member (tab name)
        staff: String,

        /// Export format
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        /// Output file path (absolute path required)
        #[arg(long, value_name = "FILE")]
        file: String,

        /// Overwrite output file without confirmation
        #[arg(long, short = 'f')]
        force: bool,
    },
}
