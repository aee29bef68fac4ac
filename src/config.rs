use crate::error::{FwdashError, Result};
use crate::phase::ExecutionPhase;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// The base config directory name under ~/.config/
const CONFIG_DIR_NAME: &str = "fwdash";
const CONFIG_FILE_NAME: &str = "config.toml";

/// User configuration for the dashboard.
///
/// Every field carries a serde default so a partial config file works; a
/// missing file yields `Config::default()`.
///
/// ```toml
/// # Seconds per elapsed-time tick
/// tick_seconds = 1
///
/// # Phase a freshly opened step starts at
/// start_phase = "execution"
///
/// # Number of synthetic testlines in the matrix views
/// testline_count = 41
///
/// # Whether the stages sidebar starts expanded
/// sidebar_expanded = true
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Ticker interval in seconds for the elapsed-time counter.
    #[serde(default = "default_tick_seconds")]
    pub tick_seconds: u64,

    /// Phase a freshly opened step starts at.
    #[serde(default = "default_start_phase")]
    pub start_phase: ExecutionPhase,

    /// Number of synthetic testlines rendered in the matrix and heat map.
    #[serde(default = "default_testline_count")]
    pub testline_count: usize,

    /// Whether the workflow-stages sidebar starts expanded.
    #[serde(default = "default_true")]
    pub sidebar_expanded: bool,
}

fn default_tick_seconds() -> u64 {
    1
}

fn default_start_phase() -> ExecutionPhase {
    ExecutionPhase::Execution
}

fn default_testline_count() -> usize {
    41
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tick_seconds: default_tick_seconds(),
            start_phase: default_start_phase(),
            testline_count: default_testline_count(),
            sidebar_expanded: true,
        }
    }
}

impl Config {
    /// Reject values the dashboard cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.tick_seconds == 0 {
            return Err(FwdashError::Config(
                "tick_seconds must be at least 1".to_string(),
            ));
        }
        if self.testline_count == 0 {
            return Err(FwdashError::Config(
                "testline_count must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Path to ~/.config/fwdash/config.toml.
pub fn config_path() -> Result<PathBuf> {
    let base = dirs::config_dir()
        .ok_or_else(|| FwdashError::Config("could not resolve config directory".to_string()))?;
    Ok(base.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Load the user config, falling back to defaults when the file is absent.
pub fn load_config() -> Result<Config> {
    load_config_from(&config_path()?)
}

/// Load a config from an explicit path. Missing file = defaults.
pub fn load_config_from(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

/// Write a config, creating the parent directory as needed.
pub fn save_config_to(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)
        .map_err(|e| FwdashError::Config(format!("failed to serialize config: {e}")))?;
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.tick_seconds, 1);
        assert_eq!(config.start_phase, ExecutionPhase::Execution);
        assert_eq!(config.testline_count, 41);
        assert!(config.sidebar_expanded);
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let config = load_config_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "tick_seconds = 2\n").unwrap();

        let config = load_config_from(&path).unwrap();
        assert_eq!(config.tick_seconds, 2);
        assert_eq!(config.testline_count, 41);
    }

    #[test]
    fn test_start_phase_parses_kebab_case() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "start_phase = \"review\"\n").unwrap();

        let config = load_config_from(&path).unwrap();
        assert_eq!(config.start_phase, ExecutionPhase::Review);
    }

    #[test]
    fn test_zero_tick_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "tick_seconds = 0\n").unwrap();

        assert!(matches!(
            load_config_from(&path),
            Err(FwdashError::Config(_))
        ));
    }

    #[test]
    fn test_round_trip_through_save() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.testline_count = 25;
        config.sidebar_expanded = false;

        save_config_to(&config, &path).unwrap();
        let loaded = load_config_from(&path).unwrap();
        assert_eq!(loaded, config);
    }
}
