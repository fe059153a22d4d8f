use super::Config;
use crate::errors::{AppError, AppResult};
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::Path;

/// Read the config file as a raw YAML mapping.
fn read_mapping(path: &Path) -> AppResult<Mapping> {
    let content = fs::read_to_string(path)
        .map_err(|e| AppError::ConfigLoad(format!("{}: {e}", path.display())))?;

    match serde_yaml::from_str::<Value>(&content)
        .map_err(|e| AppError::ConfigLoad(e.to_string()))?
    {
        Value::Mapping(m) => Ok(m),
        Value::Null => Ok(Mapping::new()),
        _ => Err(AppError::ConfigLoad(format!(
            "{}: top level is not a mapping",
            path.display()
        ))),
    }
}

/// Default values for every known key.
fn default_mapping() -> AppResult<Mapping> {
    match serde_yaml::to_value(Config::default())
        .map_err(|e| AppError::Config(e.to_string()))?
    {
        Value::Mapping(m) => Ok(m),
        _ => Err(AppError::Config("default configuration is not a mapping".into())),
    }
}

/// Keys known to this version but absent from the file.
pub fn missing_fields(path: &Path) -> AppResult<Vec<String>> {
    let current = read_mapping(path)?;
    let defaults = default_mapping()?;

    Ok(defaults
        .keys()
        .filter(|k| !current.contains_key(*k))
        .filter_map(|k| k.as_str().map(str::to_string))
        .collect())
}

/// Write every missing key with its default value, keeping existing values.
///
/// Returns the names of the keys that were added.
pub fn add_missing_fields(path: &Path) -> AppResult<Vec<String>> {
    let mut current = read_mapping(path)?;
    let defaults = default_mapping()?;

    let mut added = Vec::new();
    for (k, v) in defaults {
        if !current.contains_key(&k) {
            if let Some(name) = k.as_str() {
                added.push(name.to_string());
            }
            current.insert(k, v);
        }
    }

    if !added.is_empty() {
        let serialized = serde_yaml::to_string(&Value::Mapping(current))
            .map_err(|e| AppError::ConfigSave(e.to_string()))?;
        fs::write(path, serialized)
            .map_err(|e| AppError::ConfigSave(format!("{}: {e}", path.display())))?;
    }

    Ok(added)
}
