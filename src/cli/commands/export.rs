use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::log::record;
use crate::errors::AppResult;
use crate::export::ExportLogic;
use crate::sheets::HttpSheets;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        staff,
        format,
        file,
        force,
    } = cmd
    {
        let staff = cfg.resolve_staff(staff)?;
        let service = HttpSheets::from_config(cfg)?;

        let written = ExportLogic::export(&service, &staff, *format, file, *force)?;
        if written > 0 {
            record(
                &cfg.database_path(),
                "export",
                &staff,
                &format!("{} rows to {} ({})", written, file, format.as_str()),
            );
        }
    }
    Ok(())
}
