//! Runtime configuration for hosts embedding the core.
//!
//! # Responsibility
//! - Hold the settings a host needs before the store is usable.
//! - Read overrides from `WISHLIST_*` environment variables.
//!
//! # Invariants
//! - `log_dir` is always absolute once a config is constructed.
//! - Unset variables fall back to defaults; set-but-invalid ones are errors.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const ENV_LOG_LEVEL: &str = "WISHLIST_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "WISHLIST_LOG_DIR";
const DEFAULT_LOG_DIR_NAME: &str = "wishlist-logs";

/// Supported log verbosity levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }

    /// `debug` for debug builds, `info` for release builds.
    pub fn build_default() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Info
        }
    }
}

impl Display for LogLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            other => Err(ConfigError::UnsupportedLevel(other.to_string())),
        }
    }
}

/// Configuration error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    UnsupportedLevel(String),
    EmptyLogDir,
    RelativeLogDir(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedLevel(value) => write!(
                f,
                "unsupported log level `{value}`; expected trace|debug|info|warn|error"
            ),
            Self::EmptyLogDir => write!(f, "log_dir cannot be empty"),
            Self::RelativeLogDir(value) => {
                write!(f, "log_dir must be an absolute path, got `{value}`")
            }
        }
    }
}

impl Error for ConfigError {}

/// Settings for one core process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    pub log_level: LogLevel,
    pub log_dir: PathBuf,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::build_default(),
            log_dir: std::env::temp_dir().join(DEFAULT_LOG_DIR_NAME),
        }
    }
}

impl CoreConfig {
    /// Builds a config from explicit values.
    ///
    /// # Errors
    /// - Unsupported level text, or an empty/relative log directory.
    pub fn new(level: &str, log_dir: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            log_level: level.parse()?,
            log_dir: normalize_log_dir(log_dir)?,
        })
    }

    /// Loads `WISHLIST_LOG_LEVEL` / `WISHLIST_LOG_DIR` over the defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env) with an injectable variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            config.log_level = level.parse()?;
        }
        if let Some(dir) = lookup(ENV_LOG_DIR) {
            config.log_dir = normalize_log_dir(&dir)?;
        }
        Ok(config)
    }
}

fn normalize_log_dir(log_dir: &str) -> Result<PathBuf, ConfigError> {
    let trimmed = log_dir.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::EmptyLogDir);
    }
    let path = Path::new(trimmed);
    if !path.is_absolute() {
        return Err(ConfigError::RelativeLogDir(trimmed.to_string()));
    }
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, CoreConfig, LogLevel, ENV_LOG_DIR, ENV_LOG_LEVEL};
    use std::collections::HashMap;

    #[test]
    fn log_level_accepts_known_values() {
        assert_eq!("INFO".parse::<LogLevel>().unwrap(), LogLevel::Info);
        assert_eq!(" warning ".parse::<LogLevel>().unwrap(), LogLevel::Warn);
        assert_eq!(
            "verbose".parse::<LogLevel>().unwrap_err(),
            ConfigError::UnsupportedLevel("verbose".to_string())
        );
    }

    #[test]
    fn new_rejects_relative_log_dir() {
        let err = CoreConfig::new("info", "logs/dev").unwrap_err();
        assert!(err.to_string().contains("absolute"));
        assert_eq!(CoreConfig::new("info", "  ").unwrap_err(), ConfigError::EmptyLogDir);
    }

    #[test]
    fn from_lookup_overrides_defaults() {
        let dir = std::env::temp_dir().join("wishlist-config-test");
        let vars = HashMap::from([
            (ENV_LOG_LEVEL, "error".to_string()),
            (ENV_LOG_DIR, dir.display().to_string()),
        ]);

        let config = CoreConfig::from_lookup(|key| vars.get(key).cloned()).unwrap();
        assert_eq!(config.log_level, LogLevel::Error);
        assert_eq!(config.log_dir, dir);
    }

    #[test]
    fn from_lookup_keeps_defaults_when_unset() {
        let config = CoreConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, CoreConfig::default());
    }
}
