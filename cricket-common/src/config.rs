//! Configuration loading
//!
//! Settings are resolved in priority order:
//! 1. Command-line arguments (clap, each with an environment fallback)
//! 2. TOML config file
//! 3. Compiled defaults
//!
//! Only bootstrap concerns live here: where the database is, where to
//! listen, how loud to log and how large an upload may be.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default HTTP port
pub const DEFAULT_PORT: u16 = 3000;

/// Default bind address
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default database file name inside the data folder
pub const DATABASE_FILE_NAME: &str = "cricket.db";

/// Default cap on a whole request body (50 MiB)
pub const DEFAULT_MAX_BODY_BYTES: usize = 50 * 1024 * 1024;

/// Default cap on a single uploaded file (10 MiB)
pub const DEFAULT_MAX_FILE_BYTES: usize = 10 * 1024 * 1024;

/// Configuration as read from a TOML file
///
/// Every field is optional; anything left out falls through to the
/// compiled defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    /// Path to the SQLite database file
    #[serde(default)]
    pub database_path: Option<PathBuf>,

    /// Bind address
    #[serde(default)]
    pub host: Option<String>,

    /// HTTP server port
    #[serde(default)]
    pub port: Option<u16>,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Upload size limits
    #[serde(default)]
    pub limits: LimitsConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Upload size limits
#[derive(Debug, Clone, Deserialize)]
pub struct LimitsConfig {
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,

    #[serde(default = "default_max_file_bytes")]
    pub max_file_bytes: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_body_bytes: default_max_body_bytes(),
            max_file_bytes: default_max_file_bytes(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_max_body_bytes() -> usize {
    DEFAULT_MAX_BODY_BYTES
}

fn default_max_file_bytes() -> usize {
    DEFAULT_MAX_FILE_BYTES
}

/// Values supplied on the command line (or via their environment fallbacks)
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub config_file: Option<PathBuf>,
    pub database_path: Option<PathBuf>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub log_level: Option<String>,
}

/// Fully resolved service configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// TOML file the settings were read from, if any
    pub config_file: Option<PathBuf>,
    pub database_path: PathBuf,
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub max_body_bytes: usize,
    pub max_file_bytes: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            config_file: None,
            database_path: default_database_path(),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            log_level: default_log_level(),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            max_file_bytes: DEFAULT_MAX_FILE_BYTES,
        }
    }
}

impl ServiceConfig {
    /// Resolve configuration: overrides > TOML file > compiled defaults
    ///
    /// An explicitly named config file must exist. When none is named the
    /// platform locations are probed and a miss just means defaults.
    pub fn resolve(overrides: ConfigOverrides) -> Result<Self> {
        let config_file = match &overrides.config_file {
            Some(path) if !path.exists() => {
                return Err(Error::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            Some(path) => Some(path.clone()),
            None => locate_config_file(),
        };

        let toml_config = match &config_file {
            Some(path) => load_toml_config(path)?,
            None => TomlConfig::default(),
        };

        Ok(Self {
            config_file,
            ..Self::merge(overrides, toml_config)
        })
    }

    /// Layer overrides on top of an already loaded TOML config
    pub fn merge(overrides: ConfigOverrides, toml_config: TomlConfig) -> Self {
        let defaults = Self::default();

        Self {
            config_file: None,
            database_path: overrides
                .database_path
                .or(toml_config.database_path)
                .unwrap_or(defaults.database_path),
            host: overrides
                .host
                .or(toml_config.host)
                .unwrap_or(defaults.host),
            port: overrides
                .port
                .or(toml_config.port)
                .unwrap_or(defaults.port),
            log_level: overrides
                .log_level
                .unwrap_or(toml_config.logging.level),
            max_body_bytes: toml_config.limits.max_body_bytes,
            max_file_bytes: toml_config.limits.max_file_bytes,
        }
    }

    /// `host:port` string suitable for binding a listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Read and parse a TOML config file
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)?;
    let config = toml::from_str::<TomlConfig>(&content)
        .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
    Ok(config)
}

/// Probe the platform config locations
///
/// ~/.config/cricket/config.toml first, then /etc/cricket/config.toml on Linux.
fn locate_config_file() -> Option<PathBuf> {
    let user_config = dirs::config_dir().map(|d| d.join("cricket").join("config.toml"));
    if let Some(path) = user_config {
        if path.exists() {
            return Some(path);
        }
    }

    if cfg!(target_os = "linux") {
        let system_config = PathBuf::from("/etc/cricket/config.toml");
        if system_config.exists() {
            return Some(system_config);
        }
    }

    None
}

/// OS-dependent default database location
pub fn default_database_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("cricket"))
        .unwrap_or_else(|| PathBuf::from("./cricket_data"))
        .join(DATABASE_FILE_NAME)
}
