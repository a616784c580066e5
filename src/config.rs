use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::services::ServiceTable;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub services: ServiceTable,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Base URL of the REST API, e.g. https://backup.example.com/webconsole/api
    pub url: String,
    pub token: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    #[serde(default)]
    pub accept_invalid_certs: bool,
}

pub(crate) fn default_timeout_seconds() -> u64 {
    30
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;

        toml::from_str(&contents).context("Failed to parse config file")
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let server = ServerConfig {
            url: std::env::var("RECOVERY_API_URL")
                .context("RECOVERY_API_URL environment variable not set")?,
            token: std::env::var("RECOVERY_API_TOKEN")
                .context("RECOVERY_API_TOKEN environment variable not set")?,
            timeout_seconds: std::env::var("RECOVERY_API_TIMEOUT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or_else(default_timeout_seconds),
            accept_invalid_certs: std::env::var("RECOVERY_API_INSECURE")
                .map(|s| matches!(s.to_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
        };

        Ok(Self {
            server,
            services: ServiceTable::default(),
        })
    }

    /// Create a sample configuration file
    pub fn create_sample<P: AsRef<Path>>(path: P) -> Result<()> {
        let sample = Self {
            server: ServerConfig {
                url: "https://backup.example.com/webconsole/api".to_string(),
                token: "your-auth-token-here".to_string(),
                timeout_seconds: default_timeout_seconds(),
                accept_invalid_certs: false,
            },
            services: ServiceTable::default(),
        };

        let toml_string =
            toml::to_string_pretty(&sample).context("Failed to serialize sample config")?;
        fs::write(path.as_ref(), toml_string)
            .with_context(|| format!("Failed to write sample config to {:?}", path.as_ref()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_config_round_trips_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rtctl.toml");

        Config::create_sample(&path).unwrap();
        let config = Config::from_file(&path).unwrap();

        assert_eq!(config.server.url, "https://backup.example.com/webconsole/api");
        assert_eq!(config.server.timeout_seconds, 30);
        assert!(!config.server.accept_invalid_certs);
        assert_eq!(config.services.recovery_targets, "/V4/recoveryTargets");
    }

    #[test]
    fn test_services_section_is_optional() {
        let config: Config = toml::from_str(
            r#"
            [server]
            url = "https://cs01/webconsole/api"
            token = "abc"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.timeout_seconds, 30);
        assert_eq!(config.services.recovery_target, "/V4/recoveryTargets/{id}");
    }

    #[test]
    fn test_from_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let result = Config::from_file(dir.path().join("absent.toml"));
        assert!(result.is_err());
    }
}
