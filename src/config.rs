//! Application paths and remote-service configuration.
//!
//! Priority for each value: CLI flag → `MEMORIA_*` environment variable →
//! config file (`memoria.json`) → built-in default.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::cli::Args;

/// Configuration for overriding default application paths.
#[derive(Debug, Clone)]
pub struct PathConfig {
    /// Custom config directory (from CLI or ENV).
    pub config_dir: Option<PathBuf>,
}

impl PathConfig {
    /// Priority: CLI args → ENV var (MEMORIA_CONFIG_DIR) → None (defaults).
    pub fn from_env_and_cli(cli_dir: Option<PathBuf>) -> Self {
        let config_dir = cli_dir.or_else(|| {
            std::env::var("MEMORIA_CONFIG_DIR").ok().map(PathBuf::from)
        });
        Self { config_dir }
    }
}

/// Get path to a configuration file.
///
/// Platform paths when no override is set:
/// - Linux: ~/.config/memoria/{name}
/// - macOS: ~/Library/Application Support/memoria/{name}
/// - Windows: %APPDATA%\memoria\{name}
pub fn config_file(name: &str, config: &PathConfig) -> PathBuf {
    get_config_dir(config).join(name)
}

/// Ensure the configuration directory exists.
pub fn ensure_dirs(config: &PathConfig) -> Result<()> {
    let config_dir = get_config_dir(config);
    if !config_dir.exists() {
        std::fs::create_dir_all(&config_dir).with_context(|| {
            format!("Failed to create config directory: {}", config_dir.display())
        })?;
    }
    Ok(())
}

fn get_config_dir(config: &PathConfig) -> PathBuf {
    if let Some(dir) = &config.config_dir {
        return dir.clone();
    }
    if let Some(dir) = dirs_next::config_dir() {
        return dir.join("memoria");
    }
    PathBuf::from(".")
}

/// Record-store connection.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub base_url: String,
    pub api_key: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:54321".to_string(),
            api_key: String::new(),
        }
    }
}

/// Asset-host upload profile (unsigned channel, fixed preset).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UploadConfig {
    pub endpoint: String,
    pub preset: String,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.cloudinary.com/v1_1/demo/image/upload".to_string(),
            preset: "unsigned_memories".to_string(),
        }
    }
}

/// Fixed timeline bounds; one tick is generated for every day in between.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TimelineBounds {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Default for TimelineBounds {
    fn default() -> Self {
        Self {
            start: NaiveDate::from_ymd_opt(2024, 9, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2025, 12, 31).unwrap(),
        }
    }
}

/// Everything the app needs to talk to the outside world.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub service: ServiceConfig,
    pub upload: UploadConfig,
    pub timeline: TimelineBounds,
}

impl AppConfig {
    /// Load `memoria.json` from the config directory, falling back to
    /// defaults when the file does not exist. Environment overrides are
    /// applied afterwards either way.
    pub fn load(paths: &PathConfig) -> Result<Self> {
        let path = config_file("memoria.json", paths);
        let mut config = if path.exists() {
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("Failed to parse {}", path.display()))?
        } else {
            Self::default()
        };
        config.apply_env();
        Ok(config)
    }

    fn apply_env(&mut self) {
        if let Ok(v) = std::env::var("MEMORIA_SERVICE_URL") {
            self.service.base_url = v;
        }
        if let Ok(v) = std::env::var("MEMORIA_SERVICE_KEY") {
            self.service.api_key = v;
        }
        if let Ok(v) = std::env::var("MEMORIA_UPLOAD_URL") {
            self.upload.endpoint = v;
        }
        if let Ok(v) = std::env::var("MEMORIA_UPLOAD_PRESET") {
            self.upload.preset = v;
        }
    }

    /// CLI flags override file and environment values.
    pub fn apply_cli(&mut self, args: &Args) {
        if let Some(start) = args.start_date {
            self.timeline.start = start;
        }
        if let Some(end) = args.end_date {
            self.timeline.end = end;
        }
        if let Some(url) = &args.service_url {
            self.service.base_url = url.clone();
        }
    }
}
