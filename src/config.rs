//! Configuration types for signal-scraper

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub extractor: ExtractorConfig,
    #[serde(default)]
    pub filter: FilterConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Signal extraction configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Leverage cap applied to extracted signals
    #[serde(default = "default_max_leverage")]
    pub max_leverage: u32,

    /// Source tag used when the caller does not supply one
    #[serde(default = "default_source")]
    pub default_source: String,
}

fn default_max_leverage() -> u32 {
    100
}
fn default_source() -> String {
    "generic".to_string()
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            max_leverage: 100,
            default_source: "generic".to_string(),
        }
    }
}

/// Post-extraction filter configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Minimum confidence score to forward a signal
    #[serde(default = "default_min_confidence")]
    pub min_confidence: Decimal,

    /// Maximum signals forwarded per source per hour (unset = unlimited)
    #[serde(default = "default_max_signals_per_hour")]
    pub max_signals_per_hour: Option<usize>,

    /// Source tags accepted (empty = all)
    #[serde(default)]
    pub supported_sources: Vec<String>,

    /// Reject signals whose stop loss or targets are on the wrong side of entry
    #[serde(default)]
    pub reject_inconsistent_levels: bool,
}

fn default_min_confidence() -> Decimal {
    Decimal::new(7, 1) // 0.7
}
fn default_max_signals_per_hour() -> Option<usize> {
    Some(10)
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            min_confidence: Decimal::new(7, 1),
            max_signals_per_hour: Some(10),
            supported_sources: Vec::new(),
            reject_inconsistent_levels: false,
        }
    }
}

/// Telemetry configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub log_format: LogFormat,

    /// Port for the Prometheus exporter (unset = disabled)
    #[serde(default)]
    pub metrics_port: Option<u16>,
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable format
    #[default]
    Pretty,
    /// JSON format for log aggregation
    Json,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_port: None,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}
