//! Configuration loading
//!
//! Reads `~/.config/vertical-search/config.toml`. A missing file yields the
//! defaults; an unreadable or invalid file yields the defaults plus a warning
//! for the caller to surface.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub mod types;

pub use types::{ApiConfig, Config, SearchConfig};

const CONFIG_DIR: &str = "vertical-search";
const CONFIG_FILE: &str = "config.toml";

/// Loaded configuration and any problem encountered while loading it
#[derive(Debug, Clone, Default)]
pub struct ConfigResult {
    pub config: Config,
    pub warning: Option<String>,
}

pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|p| p.join(".config").join(CONFIG_DIR).join(CONFIG_FILE))
}

pub fn load_config() -> ConfigResult {
    let Some(path) = config_path() else {
        return ConfigResult::default();
    };

    load_config_from_path(&path)
}

pub fn load_config_from_path(path: &Path) -> ConfigResult {
    if !path.exists() {
        return ConfigResult::default();
    }

    match fs::read_to_string(path) {
        Ok(contents) => parse_config_toml(&contents),
        Err(e) => ConfigResult {
            config: Config::default(),
            warning: Some(format!("Failed to read {}: {}", path.display(), e)),
        },
    }
}

pub fn parse_config_toml(content: &str) -> ConfigResult {
    match toml::from_str::<Config>(content) {
        Ok(config) => ConfigResult {
            config,
            warning: None,
        },
        Err(e) => ConfigResult {
            config: Config::default(),
            warning: Some(format!("Invalid config, using defaults: {}", e.message())),
        },
    }
}

impl SearchConfig {
    pub fn quiet_window(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
