use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Result, SpendError};

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    #[serde(default = "default_reports_dir")]
    pub reports_dir: String,
    #[serde(default = "default_currencies")]
    pub currencies: Vec<String>,
    #[serde(default = "default_stocks")]
    pub stocks: Vec<String>,
}

fn default_data_dir() -> String {
    "data".to_string()
}

fn default_reports_dir() -> String {
    "reports".to_string()
}

fn default_currencies() -> Vec<String> {
    vec!["USD".to_string(), "EUR".to_string()]
}

fn default_stocks() -> Vec<String> {
    ["AAPL", "AMZN", "GOOGL", "MSFT", "TSLA"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            reports_dir: default_reports_dir(),
            currencies: default_currencies(),
            stocks: default_stocks(),
        }
    }
}

impl Settings {
    pub fn default_input_file(&self) -> PathBuf {
        PathBuf::from(&self.data_dir).join("operations.xlsx")
    }
}

fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("spendlens")
}

pub fn settings_path() -> PathBuf {
    config_dir().join("settings.json")
}

/// Load settings from `path`, or from the user config file when `None`.
/// A missing file yields defaults; a malformed one is an error.
pub fn load_settings(path: Option<&Path>) -> Result<Settings> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(settings_path);
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no settings file, using defaults");
        return Ok(Settings::default());
    }
    let content = std::fs::read_to_string(&path)?;
    serde_json::from_str(&content)
        .map_err(|e| SpendError::Settings(format!("{}: {e}", path.display())))
}
