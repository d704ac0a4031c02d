use serde::{Deserialize, Serialize};
use std::fs;
use thiserror::Error;

/// Environment variable overriding the listening port
pub const PORT_ENV: &str = "SERVERPORT";
/// Environment variable holding the admin password
pub const ADMIN_PASSWORD_ENV: &str = "ADMIN_PASSWORD";

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("failed to read config file '{path}': {source}")]
  Read {
    path: String,
    source: std::io::Error,
  },
  #[error("failed to parse config file '{path}': {source}")]
  Parse {
    path: String,
    source: toml::de::Error,
  },
  #[error("required env var ADMIN_PASSWORD not set")]
  MissingAdminPassword,
}

/// Log configuration
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct LogConfig {
  /// Log file path, if not set, logs will be printed to stdout
  pub file: Option<String>,
  /// Log level, default is "info"
  #[serde(default = "default_log_level")]
  pub level: String,
}

fn default_log_level() -> String {
  "info".to_string()
}

impl Default for LogConfig {
  fn default() -> Self {
    Self {
      file: None,
      level: default_log_level(),
    }
  }
}

/// playerdb configuration
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
  /// HTTP listening address
  #[serde(default = "default_server_addr")]
  pub server_addr: String,

  /// Password for the admin portal. Usually comes from the environment.
  #[serde(default)]
  pub admin_password: Option<String>,

  /// Log configuration
  #[serde(default)]
  pub log: LogConfig,
}

fn default_server_addr() -> String {
  "0.0.0.0:3000".to_string()
}

impl Default for Config {
  fn default() -> Self {
    Self {
      server_addr: default_server_addr(),
      admin_password: None,
      log: LogConfig::default(),
    }
  }
}

impl Config {
  /// Load configuration from TOML file
  pub fn from_file(path: &str) -> Result<Self, ConfigError> {
    let config_str = fs::read_to_string(path).map_err(|source| ConfigError::Read {
      path: path.to_string(),
      source,
    })?;

    toml::from_str(&config_str).map_err(|source| ConfigError::Parse {
      path: path.to_string(),
      source,
    })
  }

  /// Load the file (if any), apply environment overrides and validate
  pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
    let config = match path {
      Some(path) => Self::from_file(path)?,
      None => Self::default(),
    };
    let config = config.with_overrides(
      std::env::var(PORT_ENV).ok(),
      std::env::var(ADMIN_PASSWORD_ENV).ok(),
    );
    config.validate()?;
    Ok(config)
  }

  /// Apply values taken from the environment. Empty values are ignored.
  pub fn with_overrides(mut self, port: Option<String>, admin_password: Option<String>) -> Self {
    if let Some(port) = port.filter(|p| !p.is_empty()) {
      self.server_addr = format!("localhost:{}", port);
    }
    if let Some(password) = admin_password.filter(|p| !p.is_empty()) {
      self.admin_password = Some(password);
    }
    self
  }

  pub fn validate(&self) -> Result<(), ConfigError> {
    match self.admin_password.as_deref() {
      Some(p) if !p.is_empty() => Ok(()),
      _ => Err(ConfigError::MissingAdminPassword),
    }
  }

  /// The validated admin password
  pub fn admin_password(&self) -> Result<&str, ConfigError> {
    self.validate()?;
    Ok(self.admin_password.as_deref().unwrap_or_default())
  }
}
