//! Application configuration.
//!
//! YAML-based configuration with serde defaults, validated on load. Every
//! field has a default, so the service runs with no config file at all.

use std::net::IpAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default worker pool size.
pub const DEFAULT_WORKERS: usize = 10;

/// Default per-probe timeout (1 second).
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(1);

/// Default host list file, relative to the working directory.
pub const DEFAULT_HOSTS_FILE: &str = "servers";

fn default_workers() -> usize {
    DEFAULT_WORKERS
}

fn default_probe_timeout() -> Duration {
    DEFAULT_PROBE_TIMEOUT
}

fn default_hosts_file() -> PathBuf {
    PathBuf::from(DEFAULT_HOSTS_FILE)
}

/// Configuration error types.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    /// Failed to parse YAML configuration.
    #[error("failed to parse YAML config: {0}")]
    ParseError(#[from] serde_yaml::Error),

    /// Configuration validation failed.
    #[error("config validation error: {0}")]
    ValidationError(String),
}

/// Web server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server bind address (default: "0.0.0.0").
    pub bind: String,

    /// Server port (default: 8080).
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

/// Probe pool configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeConfig {
    /// Number of concurrent probe workers (default: 10).
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Per-probe timeout (default: 1s).
    #[serde(default = "default_probe_timeout", with = "humantime_serde")]
    pub timeout: Duration,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
            timeout: DEFAULT_PROBE_TIMEOUT,
        }
    }
}

/// Top-level application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Web server configuration.
    #[serde(default)]
    pub server: ServerConfig,

    /// Path to the newline-delimited host list (default: "servers").
    #[serde(default = "default_hosts_file")]
    pub hosts_file: PathBuf,

    /// Probe pool configuration.
    #[serde(default)]
    pub probe: ProbeConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            hosts_file: default_hosts_file(),
            probe: ProbeConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a YAML file.
    ///
    /// # Errors
    /// Returns `ConfigError` if the file cannot be read, parsed, or validated.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    /// Returns `ConfigError::ValidationError` if any field is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server.bind.parse::<IpAddr>().map_err(|_| {
            ConfigError::ValidationError(format!(
                "invalid server bind address: '{}'",
                self.server.bind
            ))
        })?;

        if self.server.port == 0 {
            return Err(ConfigError::ValidationError(
                "server port must be non-zero".to_string(),
            ));
        }

        if self.probe.workers == 0 {
            return Err(ConfigError::ValidationError(
                "probe workers must be positive".to_string(),
            ));
        }

        if self.probe.timeout.is_zero() {
            return Err(ConfigError::ValidationError(
                "probe timeout must be positive".to_string(),
            ));
        }

        Ok(())
    }
}
