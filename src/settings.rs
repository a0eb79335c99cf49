use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{KickbookError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub user_name: String,
    #[serde(default = "default_seed_sample_data")]
    pub seed_sample_data: bool,
    /// Key presses a notification stays on screen.
    #[serde(default = "default_toast_ttl")]
    pub toast_ttl: u8,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_seed_sample_data() -> bool {
    true
}

fn default_toast_ttl() -> u8 {
    3
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            user_name: String::new(),
            seed_sample_data: default_seed_sample_data(),
            toast_ttl: default_toast_ttl(),
            log_level: default_log_level(),
        }
    }
}

pub fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("kickbook")
}

pub fn settings_path() -> PathBuf {
    config_dir().join("settings.json")
}

pub fn log_dir() -> PathBuf {
    config_dir().join("logs")
}

pub fn load_settings() -> Settings {
    load_settings_from(&settings_path())
}

/// Missing or unreadable files fall back to defaults.
pub fn load_settings_from(path: &Path) -> Settings {
    match std::fs::read_to_string(path) {
        Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
        Err(_) => Settings::default(),
    }
}

pub fn save_settings(settings: &Settings) -> Result<()> {
    save_settings_to(settings, &settings_path())
}

pub fn save_settings_to(settings: &Settings, path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    let json = serde_json::to_string_pretty(settings)
        .map_err(|e| KickbookError::Settings(e.to_string()))?;
    std::fs::write(path, format!("{json}\n"))?;
    Ok(())
}
