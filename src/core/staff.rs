use crate::config::Config;
use crate::errors::{AppError, AppResult};

/// Maintenance of the configured staff list.
pub struct StaffLogic;

impl StaffLogic {
    /// Add a staff member; names are unique case-insensitively.
    pub fn add(cfg: &mut Config, name: &str) -> AppResult<String> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::Config("staff name must not be empty".into()));
        }
        if cfg.staff.iter().any(|s| s.eq_ignore_ascii_case(name)) {
            return Err(AppError::DuplicateStaff(name.to_string()));
        }
        cfg.staff.push(name.to_string());
        Ok(name.to_string())
    }

    /// Remove a staff member, returning the configured spelling.
    pub fn remove(cfg: &mut Config, name: &str) -> AppResult<String> {
        let canonical = cfg.resolve_staff(name)?;
        cfg.staff.retain(|s| s != &canonical);
        Ok(canonical)
    }
}
