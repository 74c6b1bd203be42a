//! Configuration management for Pulsechat
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files, environment variables, and CLI overrides.

use crate::dashboard::DashboardData;
use crate::error::{PulsechatError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure for Pulsechat
///
/// This structure holds all configuration needed for the assistant engine,
/// including latency simulation bounds, attachment limits, router behavior,
/// and the optional dashboard context consumed by response templates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Simulated thinking-time settings
    #[serde(default)]
    pub latency: LatencyConfig,

    /// Attachment staging settings
    #[serde(default)]
    pub attachments: AttachmentsConfig,

    /// Intent router settings
    #[serde(default)]
    pub router: RouterConfig,

    /// Dashboard context supplied by the hosting page, if any
    ///
    /// When absent, response templates fall back to their literal defaults.
    #[serde(default)]
    pub dashboard: Option<DashboardData>,
}

/// Latency simulation configuration
///
/// The simulated delay is `clamp(chars * per_char_ms, min_ms, max_ms)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LatencyConfig {
    /// Milliseconds of delay per character of user input
    #[serde(default = "default_per_char_ms")]
    pub per_char_ms: u64,

    /// Lower bound on the simulated delay (milliseconds)
    #[serde(default = "default_min_delay_ms")]
    pub min_ms: u64,

    /// Upper bound on the simulated delay (milliseconds)
    #[serde(default = "default_max_delay_ms")]
    pub max_ms: u64,
}

fn default_per_char_ms() -> u64 {
    50
}

fn default_min_delay_ms() -> u64 {
    800
}

fn default_max_delay_ms() -> u64 {
    2500
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self {
            per_char_ms: default_per_char_ms(),
            min_ms: default_min_delay_ms(),
            max_ms: default_max_delay_ms(),
        }
    }
}

/// Attachment staging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttachmentsConfig {
    /// Maximum size of a single attachment (bytes)
    ///
    /// Files strictly larger than this are rejected with a warning;
    /// a file of exactly this size is accepted.
    #[serde(default = "default_max_attachment_size")]
    pub max_size_bytes: u64,
}

fn default_max_attachment_size() -> u64 {
    10 * 1024 * 1024 // 10 MiB
}

impl Default for AttachmentsConfig {
    fn default() -> Self {
        Self {
            max_size_bytes: default_max_attachment_size(),
        }
    }
}

/// Intent router configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouterConfig {
    /// Per-route handler timeout (seconds)
    ///
    /// A collaborator call that exceeds this bound is treated as a handler
    /// failure so a stalled collaborator cannot wedge the send gate.
    #[serde(default = "default_handler_timeout")]
    pub handler_timeout_secs: u64,

    /// Seed for the fallback response phrasing RNG
    ///
    /// When set, fallback responses are deterministic. Left unset in normal
    /// operation so phrasing varies between sends.
    #[serde(default)]
    pub fallback_seed: Option<u64>,
}

fn default_handler_timeout() -> u64 {
    30
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            handler_timeout_secs: default_handler_timeout(),
            fallback_seed: None,
        }
    }
}

impl Config {
    /// Load configuration from file with environment variable overrides
    ///
    /// # Arguments
    ///
    /// * `path` - Path to configuration file
    ///
    /// # Returns
    ///
    /// Returns the loaded and merged configuration
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but cannot be read or parsed
    pub fn load(path: &str) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::warn!("Config file not found at {}, using defaults", path);
            Self::default()
        };

        config.apply_env_vars();

        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| PulsechatError::Config(format!("Failed to read config file: {}", e)))?;
        serde_yaml::from_str(&contents)
            .map_err(|e| PulsechatError::Config(format!("Failed to parse config: {}", e)).into())
    }

    fn apply_env_vars(&mut self) {
        if let Ok(per_char) = std::env::var("PULSECHAT_LATENCY_PER_CHAR_MS") {
            if let Ok(value) = per_char.parse() {
                self.latency.per_char_ms = value;
            } else {
                tracing::warn!("Invalid PULSECHAT_LATENCY_PER_CHAR_MS: {}", per_char);
            }
        }

        if let Ok(min_ms) = std::env::var("PULSECHAT_LATENCY_MIN_MS") {
            if let Ok(value) = min_ms.parse() {
                self.latency.min_ms = value;
            } else {
                tracing::warn!("Invalid PULSECHAT_LATENCY_MIN_MS: {}", min_ms);
            }
        }

        if let Ok(max_ms) = std::env::var("PULSECHAT_LATENCY_MAX_MS") {
            if let Ok(value) = max_ms.parse() {
                self.latency.max_ms = value;
            } else {
                tracing::warn!("Invalid PULSECHAT_LATENCY_MAX_MS: {}", max_ms);
            }
        }

        if let Ok(max_size) = std::env::var("PULSECHAT_MAX_ATTACHMENT_BYTES") {
            if let Ok(value) = max_size.parse() {
                self.attachments.max_size_bytes = value;
            } else {
                tracing::warn!("Invalid PULSECHAT_MAX_ATTACHMENT_BYTES: {}", max_size);
            }
        }

        if let Ok(timeout) = std::env::var("PULSECHAT_HANDLER_TIMEOUT_SECS") {
            if let Ok(value) = timeout.parse() {
                self.router.handler_timeout_secs = value;
            } else {
                tracing::warn!("Invalid PULSECHAT_HANDLER_TIMEOUT_SECS: {}", timeout);
            }
        }

        if let Ok(seed) = std::env::var("PULSECHAT_FALLBACK_SEED") {
            if let Ok(value) = seed.parse() {
                self.router.fallback_seed = Some(value);
            } else {
                tracing::warn!("Invalid PULSECHAT_FALLBACK_SEED: {}", seed);
            }
        }
    }

    /// Validate the configuration
    ///
    /// Ensures all configuration values are within acceptable ranges.
    ///
    /// # Returns
    ///
    /// Returns Ok if configuration is valid
    ///
    /// # Errors
    ///
    /// Returns error if any validation check fails
    pub fn validate(&self) -> Result<()> {
        if self.latency.max_ms < self.latency.min_ms {
            return Err(PulsechatError::Config(
                "latency.max_ms must be greater than or equal to latency.min_ms".to_string(),
            )
            .into());
        }

        if self.attachments.max_size_bytes == 0 {
            return Err(PulsechatError::Config(
                "attachments.max_size_bytes must be greater than 0".to_string(),
            )
            .into());
        }

        if self.router.handler_timeout_secs == 0 {
            return Err(PulsechatError::Config(
                "router.handler_timeout_secs must be greater than 0".to_string(),
            )
            .into());
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            latency: LatencyConfig::default(),
            attachments: AttachmentsConfig::default(),
            router: RouterConfig::default(),
            dashboard: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.latency.per_char_ms, 50);
        assert_eq!(config.latency.min_ms, 800);
        assert_eq!(config.latency.max_ms, 2500);
        assert_eq!(config.attachments.max_size_bytes, 10 * 1024 * 1024);
        assert_eq!(config.router.handler_timeout_secs, 30);
        assert!(config.dashboard.is_none());
    }

    #[test]
    fn test_config_validation_success() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_inverted_latency_bounds() {
        let mut config = Config::default();
        config.latency.min_ms = 3000;
        config.latency.max_ms = 1000;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_zero_attachment_limit() {
        let mut config = Config::default();
        config.attachments.max_size_bytes = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_zero_handler_timeout() {
        let mut config = Config::default();
        config.router.handler_timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_from_yaml() {
        let yaml = r#"
latency:
  per_char_ms: 25
  min_ms: 400
  max_ms: 1200

attachments:
  max_size_bytes: 5242880

router:
  handler_timeout_secs: 10
  fallback_seed: 42

dashboard:
  total_revenue: "$128,430"
  total_users: "4,512"
"#;

        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.latency.per_char_ms, 25);
        assert_eq!(config.latency.min_ms, 400);
        assert_eq!(config.latency.max_ms, 1200);
        assert_eq!(config.attachments.max_size_bytes, 5_242_880);
        assert_eq!(config.router.handler_timeout_secs, 10);
        assert_eq!(config.router.fallback_seed, Some(42));

        let dashboard = config.dashboard.unwrap();
        assert_eq!(dashboard.total_revenue.as_deref(), Some("$128,430"));
        assert_eq!(dashboard.total_users.as_deref(), Some("4,512"));
        assert!(dashboard.active_projects.is_none());
    }

    #[test]
    fn test_config_partial_yaml_uses_defaults() {
        let yaml = r#"
latency:
  min_ms: 100
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.latency.min_ms, 100);
        assert_eq!(config.latency.max_ms, 2500);
        assert_eq!(config.latency.per_char_ms, 50);
        assert_eq!(config.attachments.max_size_bytes, 10 * 1024 * 1024);
    }

    #[test]
    fn test_load_nonexistent_file_uses_defaults() {
        let config = Config::load("nonexistent.yaml").unwrap();
        assert_eq!(config.latency.min_ms, 800);
        assert_eq!(config.attachments.max_size_bytes, 10 * 1024 * 1024);
    }

    #[test]
    fn test_latency_config_defaults() {
        let config = LatencyConfig::default();
        assert_eq!(config.per_char_ms, 50);
        assert_eq!(config.min_ms, 800);
        assert_eq!(config.max_ms, 2500);
    }

    #[test]
    fn test_router_config_defaults() {
        let config = RouterConfig::default();
        assert_eq!(config.handler_timeout_secs, 30);
        assert!(config.fallback_seed.is_none());
    }
}
