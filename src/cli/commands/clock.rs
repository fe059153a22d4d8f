use crate::cli::commands::list::render_recent;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::clock::{ClockLogic, ClockOutOutcome, ClockSettings};
use crate::db::log::record;
use crate::errors::{AppError, AppResult};
use crate::sheets::{HttpSheets, SheetService};
use crate::ui::messages::{header, success, warning};
use crate::utils::time::now_in;
use chrono::NaiveDateTime;

/// A journal line for an action that changed the sheet.
pub struct Journaled {
    pub operation: &'static str,
    pub message: String,
}

/// Handle `start`, `end` and `early`.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let name = match cmd {
        Commands::Start { staff } | Commands::End { staff, .. } | Commands::Early { staff } => {
            staff
        }
        _ => return Ok(()),
    };

    let staff = cfg.resolve_staff(name)?;
    let service = HttpSheets::from_config(cfg)?;
    let now = now_in(cfg.timezone.as_deref())?;

    header(format!("Logged in as: {}", staff));

    if let Some(entry) = execute(&service, cmd, cfg, &staff, now)? {
        record(&cfg.database_path(), entry.operation, &staff, &entry.message);
    }

    // re-render the tab after every action
    let open = render_recent(&service, &staff, Some(cfg.recent_rows))?;
    if open > 1 {
        warning(format!(
            "{} has {} open entries; `end` closes the most recent one.",
            staff, open
        ));
    }

    Ok(())
}

/// Perform one clock action against `service`, printing its outcome.
pub fn execute(
    service: &dyn SheetService,
    cmd: &Commands,
    cfg: &Config,
    staff: &str,
    now: NaiveDateTime,
) -> AppResult<Option<Journaled>> {
    let mut settings = ClockSettings::from_config(cfg);

    match cmd {
        Commands::Start { .. } => {
            let row = ClockLogic::clock_in(service, &settings, staff, now)?;
            success(format!("Clocked in at {}", row.start_time));
            Ok(Some(Journaled {
                operation: "start",
                message: format!("Clocked in on {} at {}", row.date, row.start_time),
            }))
        }

        Commands::End { target, .. } => {
            if let Some(t) = target {
                settings.row_target = *t;
            }

            match ClockLogic::clock_out(service, &settings, staff, now)? {
                ClockOutOutcome::Closed {
                    row,
                    start_time,
                    end_time,
                    hours,
                } => {
                    let hours_txt = if hours.is_empty() { "--".to_string() } else { hours };
                    success(format!("Clocked out at {} ({} h)", end_time, hours_txt));
                    Ok(Some(Journaled {
                        operation: "end",
                        message: format!(
                            "Row {}: {} -> {} ({} h, target {})",
                            row,
                            start_time,
                            end_time,
                            hours_txt,
                            settings.row_target.as_str()
                        ),
                    }))
                }
                // a failed read is reported by the table re-render
                ClockOutOutcome::NoOpenEntry { .. } => {
                    warning("No open clock-in entry found");
                    Ok(None)
                }
            }
        }

        Commands::Early { .. } => {
            let row = ClockLogic::early_shift(service, &settings, staff, now)?;
            success(format!(
                "Early morning shift recorded for {} ({} -> {})",
                row.date, row.start_time, row.end_time
            ));
            Ok(Some(Journaled {
                operation: "early",
                message: format!("Early shift on {} ({} h)", row.date, row.hours_worked),
            }))
        }

        _ => Err(AppError::Other("not a clock command".into())),
    }
}
