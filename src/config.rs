use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_API_URL: &str = "https://bfc-inventory-backend.onrender.com/api";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Source of a configuration value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigSource {
    Default,
    File,
    Environment,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::Default => write!(f, "default"),
            ConfigSource::File => write!(f, "file"),
            ConfigSource::Environment => write!(f, "environment"),
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }
}

/// Username and password the login command checks against.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AdminCredentials {
    pub username: Option<String>,
    #[serde(skip_serializing)]
    pub password: Option<String>,
}

impl AdminCredentials {
    pub fn is_configured(&self) -> bool {
        self.username.is_some() && self.password.is_some()
    }
}

/// Application configuration with source tracking
#[derive(Debug, Clone, Serialize)]
pub struct Config {
    /// Base URL of the inventory API; `/categories` is appended
    pub api_url: ConfigValue<String>,
    /// Where the login session is kept
    pub data_dir: ConfigValue<PathBuf>,
    /// Per-request timeout in seconds
    pub timeout_secs: ConfigValue<u64>,
    /// Config file path used (if any)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_file: Option<PathBuf>,
    pub admin: AdminCredentials,
}

/// Internal struct for deserializing config file
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ConfigFile {
    api_url: Option<String>,
    data_dir: Option<PathBuf>,
    timeout_secs: Option<u64>,
    admin: Option<AdminCredentials>,
}

impl Config {
    /// Load configuration with priority: env vars > config file > defaults
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        // Start with defaults
        let mut api_url = ConfigValue::new(DEFAULT_API_URL.to_string(), ConfigSource::Default);
        let mut data_dir = ConfigValue::new(Self::default_data_dir(), ConfigSource::Default);
        let mut timeout_secs = ConfigValue::new(DEFAULT_TIMEOUT_SECS, ConfigSource::Default);
        let mut config_file = None;
        let mut admin = AdminCredentials::default();

        // Try to load from config file
        let path = config_path.unwrap_or_else(Self::default_config_path);
        if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .map_err(|e| ConfigError::ReadError(path.clone(), e))?;
            let file_config: ConfigFile = serde_yaml::from_str(&contents)
                .map_err(|e| ConfigError::ParseError(path.clone(), e))?;

            config_file = Some(path.clone());

            if let Some(url) = file_config.api_url {
                api_url = ConfigValue::new(url, ConfigSource::File);
            }
            if let Some(dir) = file_config.data_dir {
                // Resolve relative paths against config file's directory
                let resolved = if dir.is_relative() {
                    path.parent().map(|p| p.join(&dir)).unwrap_or(dir)
                } else {
                    dir
                };
                data_dir = ConfigValue::new(resolved, ConfigSource::File);
            }
            if let Some(secs) = file_config.timeout_secs {
                timeout_secs = ConfigValue::new(secs, ConfigSource::File);
            }
            if let Some(credentials) = file_config.admin {
                admin = credentials;
            }
        }

        // Apply environment variable overrides
        if let Ok(url) = std::env::var("INVADMIN_API_URL") {
            api_url = ConfigValue::new(url, ConfigSource::Environment);
        }
        if let Ok(dir) = std::env::var("INVADMIN_DATA_DIR") {
            data_dir = ConfigValue::new(PathBuf::from(dir), ConfigSource::Environment);
        }
        if let Ok(secs) = std::env::var("INVADMIN_TIMEOUT_SECS") {
            let secs = secs
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidEnv("INVADMIN_TIMEOUT_SECS", secs))?;
            timeout_secs = ConfigValue::new(secs, ConfigSource::Environment);
        }
        if let Ok(username) = std::env::var("INVADMIN_ADMIN_USERNAME") {
            admin.username = Some(username);
        }
        if let Ok(password) = std::env::var("INVADMIN_ADMIN_PASSWORD") {
            admin.password = Some(password);
        }

        Ok(Self {
            api_url,
            data_dir,
            timeout_secs,
            config_file,
            admin,
        })
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.value)
    }

    /// Default config directory (platform-specific):
    /// - Linux: ~/.config/inventory-admin/
    /// - macOS: ~/Library/Application Support/inventory-admin/
    /// - Windows: %APPDATA%/inventory-admin/
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("inventory-admin")
    }

    /// Default data directory (platform-specific):
    /// - Linux: ~/.local/share/inventory-admin/
    /// - macOS: ~/Library/Application Support/inventory-admin/
    /// - Windows: %APPDATA%/inventory-admin/
    pub fn default_data_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("inventory-admin")
    }

    /// Default config file path (platform-specific config dir + config.yaml)
    pub fn default_config_path() -> PathBuf {
        Self::default_config_dir().join("config.yaml")
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{}': {}", .0.display(), .1)]
    ReadError(PathBuf, #[source] std::io::Error),
    #[error("Failed to parse config file '{}': {}", .0.display(), .1)]
    ParseError(PathBuf, #[source] serde_yaml::Error),
    #[error("Invalid value for {0}: '{1}'")]
    InvalidEnv(&'static str, String),
}
