use serde::{Deserialize, Serialize};
use anyhow::Result;
use std::path::Path;
use std::time::Duration;
use tokio::fs;

use crate::prober::{RetryPolicy, DEFAULT_MAX_ATTEMPTS};
use crate::util::parse_host_port;

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ProbeConfig {
    /// Either a bare host or `host:port`.
    pub host: String,
    pub port: Option<u16>,
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    #[serde(default = "default_attempt_timeout_ms")]
    pub attempt_timeout_ms: u64,
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

fn default_max_attempts() -> u32 {
    DEFAULT_MAX_ATTEMPTS
}

fn default_attempt_timeout_ms() -> u64 {
    1000
}

fn default_retry_delay_ms() -> u64 {
    200
}

fn default_log_level() -> String {
    "info".to_string()
}

impl ProbeConfig {
    /// Reads the file named by `PROBE_CONFIG`, falling back to `probe.json`.
    pub async fn from_env() -> Result<Self> {
        let config_file = std::env::var("PROBE_CONFIG")
            .unwrap_or_else(|_| "probe.json".to_string());
        Self::load(&config_file).await
    }

    pub async fn load(file_path: &str) -> Result<Self> {
        if !Path::new(file_path).exists() {
            return Err(anyhow::anyhow!("Config file not found: {}", file_path));
        }

        let content = fs::read_to_string(file_path).await?;
        let config: ProbeConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(anyhow::anyhow!("host must not be empty"));
        }
        self.target()?;
        if self.max_attempts == 0 {
            return Err(anyhow::anyhow!("max_attempts must be at least 1"));
        }
        self.validate_log_level()
    }

    /// Resolves the `(host, port)` pair, a port embedded in `host` wins.
    pub fn target(&self) -> Result<(String, u16)> {
        match parse_host_port(&self.host, self.port) {
            (host, Some(port)) => Ok((host, port)),
            (host, None) => Err(anyhow::anyhow!("No port given for host {}", host)),
        }
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.max_attempts,
            attempt_timeout: Duration::from_millis(self.attempt_timeout_ms),
            retry_delay: Duration::from_millis(self.retry_delay_ms),
        }
    }

    /// Get the log level as a tracing::Level
    pub fn get_tracing_level(&self) -> Result<tracing::Level> {
        match self.log_level.to_lowercase().as_str() {
            "trace" => Ok(tracing::Level::TRACE),
            "debug" => Ok(tracing::Level::DEBUG),
            "info" => Ok(tracing::Level::INFO),
            "warn" | "warning" => Ok(tracing::Level::WARN),
            "error" => Ok(tracing::Level::ERROR),
            _ => Err(anyhow::anyhow!("Invalid log level: {}. Valid levels are: trace, debug, info, warn, error", self.log_level))
        }
    }

    pub fn validate_log_level(&self) -> Result<()> {
        self.get_tracing_level().map(|_| ())
    }
}
