use crate::core::retry::RetryOptions;
use crate::errors::AppResult;
use crate::utils::path::expand_tilde;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;
use tracing::warn;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub retry: RetryOptions,
    #[serde(default = "default_location_timeout_ms")]
    pub location_timeout_ms: u64,
    #[serde(default = "default_size_tolerance_percent")]
    pub size_tolerance_percent: u8,
    pub cache_dir: PathBuf,
}

fn default_location_timeout_ms() -> u64 {
    8000
}
fn default_size_tolerance_percent() -> u8 {
    10
}

impl Default for Config {
    fn default() -> Self {
        Self {
            retry: RetryOptions::default(),
            location_timeout_ms: default_location_timeout_ms(),
            size_tolerance_percent: default_size_tolerance_percent(),
            cache_dir: Self::cache_dir_default(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("fieldclock")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".fieldclock")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("fieldclock.conf")
    }

    /// Scoped cache directory for downloaded documents
    pub fn cache_dir_default() -> PathBuf {
        dirs::cache_dir()
            .unwrap_or_else(env::temp_dir)
            .join("fieldclock")
            .join("documents")
    }

    /// Load configuration from file, or return defaults if missing or
    /// unparsable. A broken config file must never brick the client.
    pub fn load() -> Self {
        let path = Self::config_file();
        let Ok(content) = fs::read_to_string(&path) else {
            return Config::default();
        };
        match serde_yaml::from_str::<Config>(&content) {
            Ok(mut cfg) => {
                cfg.cache_dir = expand_tilde(&cfg.cache_dir.to_string_lossy());
                cfg
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "config unparsable, using defaults");
                Config::default()
            }
        }
    }

    pub fn save(&self) -> AppResult<()> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;
        let yaml = serde_yaml::to_string(self)
            .map_err(|e| crate::errors::AppError::Other(format!("config serialize: {e}")))?;
        fs::write(Self::config_file(), yaml)?;
        Ok(())
    }
}
