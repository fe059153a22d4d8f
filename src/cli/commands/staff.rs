use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::config_path;
use crate::core::staff::StaffLogic;
use crate::db::log::record;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};

/// Handle the `staff` subcommand: list, or add/remove and save the file.
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Staff { add, remove } = &cli.command {
        let path = config_path(cli);

        if let Some(name) = add {
            let mut updated = Config::load(Some(&path))?;
            let added = StaffLogic::add(&mut updated, name)?;
            updated.save(&path)?;
            success(format!("Added staff member {}.", added));
            record(&cfg.database_path(), "staff_add", &added, "Staff member added");
            return Ok(());
        }

        if let Some(name) = remove {
            let mut updated = Config::load(Some(&path))?;
            let removed = StaffLogic::remove(&mut updated, name)?;
            updated.save(&path)?;
            success(format!("Removed staff member {}.", removed));
            record(
                &cfg.database_path(),
                "staff_remove",
                &removed,
                "Staff member removed",
            );
            return Ok(());
        }

        if cfg.staff.is_empty() {
            info("No staff members configured. Use `sheetclock staff --add NAME`.");
        }
        for name in &cfg.staff {
            println!("{}", name);
        }
    }

    Ok(())
}
