// Configuration: where the joke API lives, how long to wait for it and how
// chatty the logs are. Defaults, then an optional JSON file in the user's
// config directory, then environment variables.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

pub const API_URL_ENV: &str = "HAHASAAS_API_URL";
pub const TIMEOUT_ENV: &str = "HAHASAAS_TIMEOUT_SECS";
pub const LOG_ENV: &str = "HAHASAAS_LOG";

pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_LOG_LEVEL: &str = "warn";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid value {value:?} for {var}: {reason}")]
    InvalidEnv {
        var: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub api_url: String,
    pub timeout_secs: u64,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_url: DEFAULT_API_URL.to_owned(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            log_level: DEFAULT_LOG_LEVEL.to_owned(),
        }
    }
}

impl Config {
    /// `<config_dir>/hahasaas/config.json`, when the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("hahasaas").join("config.json"))
    }

    /// Load from the default file (if present) and the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        let base = match Self::default_path() {
            Some(path) if path.exists() => Self::from_file(&path)?,
            _ => Config::default(),
        };
        base.with_env(|var| std::env::var(var).ok())
    }

    /// Read a JSON config file; missing keys keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let data = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_owned(),
            source,
        })?;
        serde_json::from_str(&data).map_err(|source| ConfigError::Parse {
            path: path.to_owned(),
            source,
        })
    }

    /// Apply overrides from `lookup`, which maps a variable name to its value.
    /// Blank values are ignored.
    pub fn with_env<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        if let Some(url) = get(API_URL_ENV) {
            self.api_url = url.trim().to_owned();
        }
        if let Some(raw) = get(TIMEOUT_ENV) {
            self.timeout_secs = raw.trim().parse().map_err(|e: std::num::ParseIntError| {
                ConfigError::InvalidEnv {
                    var: TIMEOUT_ENV,
                    value: raw.clone(),
                    reason: e.to_string(),
                }
            })?;
        }
        if let Some(level) = get(LOG_ENV) {
            self.log_level = level.trim().to_owned();
        }
        Ok(self)
    }
}
