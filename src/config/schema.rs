//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the service.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the external data service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServiceConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Where the data directory comes from and which files it holds.
    pub data_source: DataSourceConfig,

    /// Bounds for the prediction row limit.
    pub predictions: PredictionLimits,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Data directory settings.
///
/// The directory itself is never stored here: it is read from the
/// environment variable named by `env_var` on every request.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DataSourceConfig {
    /// Name of the environment variable holding the data directory.
    pub env_var: String,

    /// Mount point used when translating drive-letter paths on POSIX hosts.
    pub mount_root: String,

    /// Line-delimited JSON metrics log.
    pub metrics_file: String,

    /// CSV prediction table.
    pub predictions_file: String,

    /// JSON probe document.
    pub probe_file: String,
}

pub const DEFAULT_ENV_VAR: &str = "AIM_EXTERNAL_DATA_PATH";

impl Default for DataSourceConfig {
    fn default() -> Self {
        Self {
            env_var: DEFAULT_ENV_VAR.to_string(),
            mount_root: "/mnt".to_string(),
            metrics_file: "metrics.jsonl".to_string(),
            predictions_file: "preds_val.csv".to_string(),
            probe_file: "probe_ethnicity.json".to_string(),
        }
    }
}

/// Closed bound and default for `max_prediction_rows`.
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
#[serde(default)]
pub struct PredictionLimits {
    /// Applied when the request carries no row limit.
    pub default_rows: usize,

    /// Smallest accepted row limit.
    pub min_rows: usize,

    /// Largest accepted row limit.
    pub max_rows: usize,
}

impl Default for PredictionLimits {
    fn default() -> Self {
        Self {
            default_rows: 500,
            min_rows: 1,
            max_rows: 5000,
        }
    }
}

impl PredictionLimits {
    /// Returns true if `rows` lies within `[min_rows, max_rows]`.
    pub fn contains(&self, rows: usize) -> bool {
        (self.min_rows..=self.max_rows).contains(&rows)
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Human-readable or JSON log lines.
    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config: ServiceConfig = toml::from_str("").unwrap();
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
        assert_eq!(config.data_source.env_var, DEFAULT_ENV_VAR);
        assert_eq!(config.predictions.default_rows, 500);
        assert_eq!(config.observability.log_format, LogFormat::Pretty);
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config: ServiceConfig = toml::from_str(
            r#"
            [data_source]
            env_var = "MY_DATA"

            [observability]
            log_format = "json"
            "#,
        )
        .unwrap();
        assert_eq!(config.data_source.env_var, "MY_DATA");
        assert_eq!(config.data_source.metrics_file, "metrics.jsonl");
        assert_eq!(config.observability.log_format, LogFormat::Json);
        assert_eq!(config.observability.log_level, "info");
    }

    #[test]
    fn test_limits_are_inclusive() {
        let limits = PredictionLimits::default();
        assert!(limits.contains(1));
        assert!(limits.contains(5000));
        assert!(!limits.contains(0));
        assert!(!limits.contains(5001));
    }
}
