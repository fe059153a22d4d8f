use crate::cli::parser::Commands;
use crate::core::hours::{format_hours, hours_between};
use crate::errors::AppResult;
use crate::ui::messages::warning;
use crate::utils::time::parse_required_clock_time;

/// Offline hours calculator.
pub fn handle(cmd: &Commands) -> AppResult<()> {
    if let Commands::Hours { start, end } = cmd {
        // malformed input is an error here; the sheet reader stays lenient
        let s = parse_required_clock_time(start)?;
        let e = parse_required_clock_time(end)?;

        if e < s {
            warning("End is earlier than start; counted as a shift crossing midnight.");
        }

        println!("{}", format_hours(hours_between(start, end)));
    }
    Ok(())
}
