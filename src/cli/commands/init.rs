use crate::cli::parser::Cli;
use crate::config::Config;
use crate::config_path;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{info, warning};

/// Handle the `init` command
///
/// This initializes:
///  - the config directory (if missing)
///  - the configuration file (unless in test mode)
///  - the journal database and its migrations
pub fn handle(cli: &Cli) -> AppResult<()> {
    let path = config_path(cli);

    println!("⚙️  Initializing sheetclock…");

    let db_path = Config::init_all(&path, cli.db.clone(), cli.test)?;

    println!("📄 Config file : {}", path.display());
    println!("🗄️  Journal     : {}", db_path.display());

    let pool = DbPool::open_journal(&db_path)?;
    println!("✅ Journal initialized at {}", db_path.display());

    // journal write is not blocking
    if let Err(e) = ttlog(
        &pool.conn,
        "init",
        "",
        &format!("Journal initialized at {}", db_path.display()),
    ) {
        warning(format!("Failed to write internal log: {}", e));
    }

    let cfg = Config::load(Some(&path))?;
    if cfg.spreadsheet_id.trim().is_empty() {
        info("Set `spreadsheet_id` and `credentials` in the config file before clocking in.");
    }

    println!("🎉 sheetclock initialization completed!");
    Ok(())
}
