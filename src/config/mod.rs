use crate::errors::{AppError, AppResult};
use crate::models::row_target::RowTarget;
use crate::sheets::http::DEFAULT_API_BASE;
use crate::utils::path::expand_tilde;
use crate::utils::time::parse_timezone;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub mod migrate; // use submodule at src/config/migrate.rs

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EarlyShift {
    pub start: String,
    pub end: String,
}

impl Default for EarlyShift {
    fn default() -> Self {
        Self {
            start: "06:00:00 AM".to_string(),
            end: "08:30:00 AM".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub spreadsheet_id: String,
    #[serde(default = "default_credentials")]
    pub credentials: String,
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default = "default_staff")]
    pub staff: Vec<String>,
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub row_target: RowTarget,
    #[serde(default = "default_recent_rows")]
    pub recent_rows: usize,
    #[serde(default = "default_alcohol_check")]
    pub alcohol_check: String,
    #[serde(default)]
    pub early_shift: EarlyShift,
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_credentials() -> String {
    Config::config_dir()
        .join("service_account.json")
        .to_string_lossy()
        .to_string()
}
fn default_database() -> String {
    Config::database_file().to_string_lossy().to_string()
}
fn default_staff() -> Vec<String> {
    ["Jye", "Harry", "Colm", "Rose"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}
fn default_recent_rows() -> usize {
    20
}
fn default_alcohol_check() -> String {
    "0.00mg".to_string()
}
fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}
fn default_timeout_secs() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            spreadsheet_id: String::new(),
            credentials: default_credentials(),
            database: default_database(),
            staff: default_staff(),
            timezone: None,
            row_target: RowTarget::Open,
            recent_rows: default_recent_rows(),
            alcohol_check: default_alcohol_check(),
            early_shift: EarlyShift::default(),
            api_base: default_api_base(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("sheetclock")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".sheetclock")
        }
    }

    /// Return the full path of the default config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("sheetclock.conf")
    }

    /// Return the full path of the default journal database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("sheetclock.sqlite")
    }

    /// Load configuration from `path` (or the default file); defaults when
    /// the file does not exist.
    pub fn load(path: Option<&Path>) -> AppResult<Self> {
        let path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(Self::config_file);

        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&path)
            .map_err(|e| AppError::ConfigLoad(format!("{}: {e}", path.display())))?;
        let cfg: Config = serde_yaml::from_str(&content)
            .map_err(|e| AppError::ConfigLoad(format!("{}: {e}", path.display())))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Write the configuration as YAML to `path`.
    pub fn save(&self, path: &Path) -> AppResult<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let yaml =
            serde_yaml::to_string(self).map_err(|e| AppError::ConfigSave(e.to_string()))?;
        fs::write(path, yaml).map_err(|e| AppError::ConfigSave(format!("{}: {e}", path.display())))
    }

    pub fn validate(&self) -> AppResult<()> {
        if let Some(tz) = &self.timezone
            && !tz.trim().is_empty()
        {
            parse_timezone(tz)?;
        }
        if self.staff.iter().any(|s| s.trim().is_empty()) {
            return Err(AppError::Config("staff names must not be empty".into()));
        }
        Ok(())
    }

    /// Credentials path with `~` expanded.
    pub fn credentials_path(&self) -> PathBuf {
        expand_tilde(&self.credentials)
    }

    /// Journal path with `~` expanded.
    pub fn database_path(&self) -> PathBuf {
        expand_tilde(&self.database)
    }

    /// Match a staff name case-insensitively and return its configured spelling.
    pub fn resolve_staff(&self, name: &str) -> AppResult<String> {
        let wanted = name.trim();
        self.staff
            .iter()
            .find(|s| s.eq_ignore_ascii_case(wanted))
            .cloned()
            .ok_or_else(|| AppError::UnknownStaff(wanted.to_string()))
    }

    /// Initialize configuration file and journal database path.
    ///
    /// Returns the journal database path.
    pub fn init_all(
        config_path: &Path,
        custom_db: Option<String>,
        is_test: bool,
    ) -> AppResult<PathBuf> {
        let dir = config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(Self::config_dir);
        fs::create_dir_all(&dir)?;

        // keep an existing file's settings, only the journal path may change
        let mut config = if config_path.exists() {
            Self::load(Some(config_path))?
        } else {
            Config::default()
        };

        if let Some(name) = custom_db {
            let p = expand_tilde(&name);
            let db_path = if p.is_absolute() { p } else { dir.join(p) };
            config.database = db_path.to_string_lossy().to_string();
        }

        if !is_test {
            config.save(config_path)?;
            println!("✅ Config file: {:?}", config_path);
        }

        Ok(config.database_path())
    }
}
