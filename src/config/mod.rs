//! Configuration module
//!
//! Layered configuration for the Acumatica connection: an optional TOML
//! file overridden by `ACU_*` environment variables.

use serde::Deserialize;
use std::fmt;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Endpoint name used when `ACU_ENDPOINT` is not set.
pub const DEFAULT_ENDPOINT: &str = "Default";

/// Contract version used when `ACU_VERSION` is not set.
pub const DEFAULT_API_VERSION: &str = "25.200.001";

/// Request timeout used when `ACU_TIMEOUT_MS` is not set.
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required setting: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },

    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

/// Partial configuration as read from file and environment.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    pub base_url: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub company: Option<String>,
    pub endpoint: Option<String>,
    pub version: Option<String>,
    pub timeout_ms: Option<u64>,
}

impl Config {
    /// Load configuration from the default locations.
    ///
    /// Reads the file named by `ACU_CONFIG` (or `./acumatica-mcp.toml` when
    /// present), then applies `ACU_*` environment variable overrides.
    pub fn load_default() -> Result<Self, ConfigError> {
        let mut config = match std::env::var("ACU_CONFIG") {
            Ok(path) => Self::from_file(&path)?,
            Err(_) => {
                if Path::new("acumatica-mcp.toml").exists() {
                    Self::from_file("acumatica-mcp.toml")?
                } else {
                    Self::default()
                }
            }
        };
        config.apply_env()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_string(),
            source,
        })?;
        Self::from_toml_str(&contents, path)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml_str(contents: &str, path: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|source| ConfigError::Parse {
            path: path.to_string(),
            source,
        })
    }

    /// Apply `ACU_*` environment variable overrides.
    fn apply_env(&mut self) -> Result<(), ConfigError> {
        if let Ok(value) = std::env::var("ACU_BASE_URL") {
            self.base_url = Some(value);
        }
        if let Ok(value) = std::env::var("ACU_USERNAME") {
            self.username = Some(value);
        }
        if let Ok(value) = std::env::var("ACU_PASSWORD") {
            self.password = Some(value);
        }
        if let Ok(value) = std::env::var("ACU_COMPANY") {
            self.company = Some(value);
        }
        if let Ok(value) = std::env::var("ACU_ENDPOINT") {
            self.endpoint = Some(value);
        }
        if let Ok(value) = std::env::var("ACU_VERSION") {
            self.version = Some(value);
        }
        if let Ok(raw) = std::env::var("ACU_TIMEOUT_MS") {
            match raw.parse::<u64>() {
                Ok(ms) => self.timeout_ms = Some(ms),
                Err(_) => {
                    return Err(ConfigError::Invalid {
                        name: "ACU_TIMEOUT_MS",
                        value: raw,
                    });
                }
            }
        }
        Ok(())
    }

    /// Validate into a runtime configuration, applying defaults.
    pub fn to_runtime(self) -> Result<RuntimeConfig, ConfigError> {
        let base_url = require(self.base_url, "ACU_BASE_URL")?
            .trim_end_matches('/')
            .to_string();
        let username = require(self.username, "ACU_USERNAME")?;
        let password = require(self.password, "ACU_PASSWORD")?;
        let company = require(self.company, "ACU_COMPANY")?;

        let timeout_ms = self.timeout_ms.unwrap_or(DEFAULT_TIMEOUT_MS);
        if timeout_ms == 0 {
            return Err(ConfigError::Invalid {
                name: "ACU_TIMEOUT_MS",
                value: timeout_ms.to_string(),
            });
        }

        Ok(RuntimeConfig {
            base_url,
            username,
            password,
            company,
            endpoint: self.endpoint.unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            version: self.version.unwrap_or_else(|| DEFAULT_API_VERSION.to_string()),
            timeout: Duration::from_millis(timeout_ms),
        })
    }
}

fn require(value: Option<String>, name: &'static str) -> Result<String, ConfigError> {
    match value {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(ConfigError::Missing(name)),
    }
}

/// Validated configuration used by the running server.
#[derive(Clone)]
pub struct RuntimeConfig {
    /// Instance root, e.g. `https://erp.example.com`. No trailing slash.
    pub base_url: String,
    pub username: String,
    pub password: String,
    pub company: String,
    /// Endpoint name under `/entity`, e.g. `Default`.
    pub endpoint: String,
    /// Contract version, e.g. `25.200.001`.
    pub version: String,
    pub timeout: Duration,
}

impl fmt::Debug for RuntimeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuntimeConfig")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("company", &self.company)
            .field("endpoint", &self.endpoint)
            .field("version", &self.version)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_config() -> Config {
        Config {
            base_url: Some("https://erp.example.com".to_string()),
            username: Some("admin".to_string()),
            password: Some("secret".to_string()),
            company: Some("Company".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_to_runtime_applies_defaults() {
        let runtime = minimal_config().to_runtime().unwrap();
        assert_eq!(runtime.endpoint, "Default");
        assert_eq!(runtime.version, "25.200.001");
        assert_eq!(runtime.timeout, Duration::from_millis(30_000));
    }

    #[test]
    fn test_to_runtime_trims_trailing_slash() {
        let config = Config {
            base_url: Some("https://erp.example.com/".to_string()),
            ..minimal_config()
        };
        let runtime = config.to_runtime().unwrap();
        assert_eq!(runtime.base_url, "https://erp.example.com");
    }

    #[test]
    fn test_to_runtime_requires_credentials() {
        let config = Config {
            password: None,
            ..minimal_config()
        };
        let err = config.to_runtime().unwrap_err();
        assert!(matches!(err, ConfigError::Missing("ACU_PASSWORD")));
    }

    #[test]
    fn test_to_runtime_rejects_empty_values() {
        let config = Config {
            base_url: Some(String::new()),
            ..minimal_config()
        };
        let err = config.to_runtime().unwrap_err();
        assert!(matches!(err, ConfigError::Missing("ACU_BASE_URL")));
    }

    #[test]
    fn test_to_runtime_rejects_zero_timeout() {
        let config = Config {
            timeout_ms: Some(0),
            ..minimal_config()
        };
        let err = config.to_runtime().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                name: "ACU_TIMEOUT_MS",
                ..
            }
        ));
    }

    #[test]
    fn test_from_toml_str() {
        let config = Config::from_toml_str(
            r#"
            base_url = "https://erp.example.com"
            username = "admin"
            password = "secret"
            company = "Company"
            timeout_ms = 10000
            "#,
            "test.toml",
        )
        .unwrap();

        let runtime = config.to_runtime().unwrap();
        assert_eq!(runtime.username, "admin");
        assert_eq!(runtime.timeout, Duration::from_millis(10_000));
    }

    #[test]
    fn test_from_toml_str_rejects_bad_toml() {
        let err = Config::from_toml_str("base_url = ", "test.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_runtime_debug_redacts_password() {
        let runtime = minimal_config().to_runtime().unwrap();
        let debug = format!("{:?}", runtime);
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("secret"));
    }
}
