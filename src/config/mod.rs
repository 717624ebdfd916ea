use crate::core::RetryPolicy;
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

pub const ENV_DB: &str = "RTIMECLOCK_DB";
pub const ENV_QUERY_MAX_ATTEMPTS: &str = "RTIMECLOCK_QUERY_MAX_ATTEMPTS";
pub const ENV_QUERY_BACKOFF_MS: &str = "RTIMECLOCK_QUERY_BACKOFF_MS";
pub const ENV_CONNECT_MAX_ATTEMPTS: &str = "RTIMECLOCK_CONNECT_MAX_ATTEMPTS";
pub const ENV_CONNECT_BACKOFF_MS: &str = "RTIMECLOCK_CONNECT_BACKOFF_MS";
pub const ENV_LOG_FORMAT: &str = "RTIMECLOCK_LOG_FORMAT";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = AppError;

    fn from_str(s: &str) -> AppResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(AppError::Config(format!("unknown log format '{other}'"))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
    /// Per-operation policy of the access layer.
    #[serde(default = "RetryPolicy::query_default")]
    pub query_retry: RetryPolicy,
    /// Startup connection policy; independent of `query_retry`.
    #[serde(default = "RetryPolicy::connect_default")]
    pub connect_retry: RetryPolicy,
    #[serde(default)]
    pub log_format: LogFormat,
}

fn default_database() -> String {
    Config::database_file().to_string_lossy().to_string()
}

fn default_busy_timeout_ms() -> u64 {
    5_000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database(),
            busy_timeout_ms: default_busy_timeout_ms(),
            query_retry: RetryPolicy::query_default(),
            connect_retry: RetryPolicy::connect_default(),
            log_format: LogFormat::default(),
        }
    }
}

fn parse_env<T: FromStr>(key: &str, raw: &str) -> AppResult<T> {
    raw.trim()
        .parse()
        .map_err(|_| AppError::Config(format!("invalid value '{raw}' for {key}")))
}

impl Config {
    /// Return the standard configuration directory (`~/.rtimeclock`)
    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".rtimeclock")
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rtimeclock.conf")
    }

    /// Return the default path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("rtimeclock.sqlite")
    }

    pub fn busy_timeout(&self) -> Duration {
        Duration::from_millis(self.busy_timeout_ms)
    }

    /// Load the config file (defaults when missing) and apply environment
    /// overrides.
    pub fn load() -> AppResult<Self> {
        let mut cfg = Self::load_from(&Self::config_file())?;
        cfg.apply_overrides(|key| env::var(key).ok())?;
        Ok(cfg)
    }

    /// Parse a YAML config file; a missing file yields the defaults.
    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
        serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("{}: {e}", path.display())))
    }

    /// Apply environment-style overrides looked up through `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> AppResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(db) = lookup(ENV_DB).filter(|v| !v.trim().is_empty()) {
            self.database = db;
        }
        if let Some(v) = lookup(ENV_QUERY_MAX_ATTEMPTS) {
            self.query_retry.max_attempts = parse_env(ENV_QUERY_MAX_ATTEMPTS, &v)?;
        }
        if let Some(v) = lookup(ENV_QUERY_BACKOFF_MS) {
            self.query_retry.backoff_ms = parse_env(ENV_QUERY_BACKOFF_MS, &v)?;
        }
        if let Some(v) = lookup(ENV_CONNECT_MAX_ATTEMPTS) {
            self.connect_retry.max_attempts = parse_env(ENV_CONNECT_MAX_ATTEMPTS, &v)?;
        }
        if let Some(v) = lookup(ENV_CONNECT_BACKOFF_MS) {
            self.connect_retry.backoff_ms = parse_env(ENV_CONNECT_BACKOFF_MS, &v)?;
        }
        if let Some(v) = lookup(ENV_LOG_FORMAT) {
            self.log_format = v.parse()?;
        }
        Ok(())
    }

    pub fn to_yaml(&self) -> AppResult<String> {
        serde_yaml::to_string(self).map_err(|_| AppError::ConfigSave)
    }

    /// Write the config file (skipped in test mode) and make sure the
    /// database directory exists.
    pub fn init_all(&self, is_test: bool) -> AppResult<()> {
        if !is_test {
            fs::create_dir_all(Self::config_dir())?;
            fs::write(Self::config_file(), self.to_yaml()?).map_err(|_| AppError::ConfigSave)?;
            println!("✅ Config file: {}", Self::config_file().display());
        }

        if let Some(dir) = Path::new(&self.database).parent()
            && !dir.as_os_str().is_empty()
        {
            fs::create_dir_all(dir)?;
        }

        Ok(())
    }
}
