//! Command line configuration.
//!
//! Read from `--config FILE`, or from `config.toml` in the platform config
//! directory when that file exists:
//!
//! ```toml
//! [limits]
//! max_range_cells = 10000
//! ```

use directories::ProjectDirs;
use serde::Deserialize;
use sheetcalc_core::Limits;
use std::path::{Path, PathBuf};

use crate::error::{CliError, Result};

#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub limits: Limits,
}

pub(crate) fn default_config_path() -> Option<PathBuf> {
    let proj = ProjectDirs::from("", "", "sheetcalc")?;
    let mut path = proj.config_dir().to_path_buf();
    path.push("config.toml");
    Some(path)
}

/// Load the explicit config file, else the default one if present, else defaults.
pub(crate) fn load_config(explicit: Option<&Path>, no_default_config: bool) -> Result<Config> {
    if let Some(path) = explicit {
        return read_config(path);
    }
    if no_default_config {
        return Ok(Config::default());
    }
    match default_config_path() {
        Some(path) if path.is_file() => read_config(&path),
        _ => Ok(Config::default()),
    }
}

fn read_config(path: &Path) -> Result<Config> {
    let text = std::fs::read_to_string(path)?;
    parse_config(&text).map_err(|message| CliError::Config {
        path: path.to_path_buf(),
        message,
    })
}

fn parse_config(text: &str) -> std::result::Result<Config, String> {
    let config: Config = toml::from_str(text).map_err(|e| e.to_string())?;
    if config.limits.max_range_cells == 0 {
        return Err("limits.max_range_cells must be at least 1".to_string());
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config_reads_limits() {
        let config = parse_config("[limits]\nmax_range_cells = 25\n").unwrap();
        assert_eq!(config.limits.max_range_cells, 25);
    }

    #[test]
    fn test_parse_config_defaults_missing_sections() {
        assert_eq!(parse_config("").unwrap(), Config::default());
        assert_eq!(parse_config("[limits]\n").unwrap(), Config::default());
    }

    #[test]
    fn test_parse_config_rejects_bad_values() {
        assert!(parse_config("[limits]\nmax_range_cells = 0\n").is_err());
        assert!(parse_config("[limits]\nmax_range_cells = \"many\"\n").is_err());
    }

    #[test]
    fn test_default_config_path_names_config_toml() {
        if let Some(path) = default_config_path() {
            assert!(path.ends_with("config.toml"));
            assert!(path.components().any(|c| c.as_os_str() == "sheetcalc"));
            assert_eq!(path, default_config_path().unwrap());
        }
    }
}
