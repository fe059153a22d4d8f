use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::attendance::read_table;
use crate::errors::AppResult;
use crate::models::attendance::COLUMNS;
use crate::sheets::{HttpSheets, SheetService};
use crate::ui::messages::{error, header, info};
use crate::utils::colors::colorize_status;
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List { staff, limit, all } = cmd {
        let staff = cfg.resolve_staff(staff)?;
        let service = HttpSheets::from_config(cfg)?;

        let limit = if *all {
            None
        } else {
            Some(limit.unwrap_or(cfg.recent_rows))
        };

        header(format!("Logged in as: {}", staff));
        render_recent(&service, &staff, limit)?;
    }
    Ok(())
}

/// Print the most recent entries of a tab. Returns the number of open rows.
pub fn render_recent(
    service: &dyn SheetService,
    staff: &str,
    limit: Option<usize>,
) -> AppResult<usize> {
    let read = read_table(service, staff);

    if let Some(w) = &read.warning {
        error(w);
    }

    println!("\nRecent Time Entries\n");

    if read.table.is_empty() {
        info(format!("No entries for {}.", staff));
        return Ok(0);
    }

    print!("{}", build_table(&read.table.recent(limit)).render());

    if let Some(last) = read.table.rows.last() {
        println!(
            "\nLatest entry: {} {}",
            last.date,
            colorize_status(last.is_open(), last.is_early_pickup())
        );
    }

    Ok(read.table.open_count())
}

fn build_table(rows: &[&crate::models::attendance::AttendanceRow]) -> Table {
    let mut table = Table::new(COLUMNS.iter().map(|h| Column::new(h)).collect());
    for row in rows {
        table.add_row(row.to_cells());
    }
    table
}
