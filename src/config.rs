//! Configuration types for goldboard

use rust_decimal::Decimal;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

/// Public spot-price endpoint polled by default
pub const DEFAULT_SOURCE_URL: &str = "https://api.metals.live/v1/spot/gold";

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub simulator: SimulatorConfig,
    #[serde(default)]
    pub scheduler: SchedulerConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Upstream spot-price source configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    /// Endpoint returning `{ "price": number, "change"?: number }`
    #[serde(default = "default_source_url")]
    pub url: String,

    /// HTTP client timeout (seconds)
    #[serde(default = "default_source_timeout_secs")]
    pub timeout_secs: u64,

    /// Grams in one troy ounce
    #[serde(default = "default_grams_per_troy_ounce")]
    pub grams_per_troy_ounce: Decimal,

    /// Upstream currency to target currency (USD -> EUR)
    #[serde(default = "default_conversion_rate")]
    pub conversion_rate: Decimal,
}

fn default_source_url() -> String {
    DEFAULT_SOURCE_URL.to_string()
}
fn default_source_timeout_secs() -> u64 {
    10
}
fn default_grams_per_troy_ounce() -> Decimal {
    Decimal::new(311035, 4) // 31.1035
}
fn default_conversion_rate() -> Decimal {
    Decimal::new(85, 2) // 0.85
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: default_source_url(),
            timeout_secs: default_source_timeout_secs(),
            grams_per_troy_ounce: default_grams_per_troy_ounce(),
            conversion_rate: default_conversion_rate(),
        }
    }
}

impl SourceConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Fallback price simulator configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SimulatorConfig {
    /// Price the feed starts from before the first tick (EUR per gram)
    #[serde(default = "default_seed_price")]
    pub seed_price: Decimal,

    /// Maximum absolute step per simulated tick
    #[serde(default = "default_band")]
    pub band: Decimal,

    /// Minimum admissible price
    #[serde(default = "default_floor")]
    pub floor: Decimal,
}

fn default_seed_price() -> Decimal {
    Decimal::new(8525, 2) // 85.25
}
fn default_band() -> Decimal {
    Decimal::new(75, 2) // 0.75
}
fn default_floor() -> Decimal {
    Decimal::new(80, 0)
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            seed_price: default_seed_price(),
            band: default_band(),
            floor: default_floor(),
        }
    }
}

/// When the tick loop is started
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StartMode {
    /// Start on the first subscription
    #[default]
    Lazy,
    /// Start as soon as the scheduler is constructed
    Eager,
}

/// Tick scheduler configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SchedulerConfig {
    /// Interval between ticks (seconds)
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,

    /// Upper bound on a single upstream fetch (seconds)
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,

    #[serde(default)]
    pub start: StartMode,
}

fn default_interval_secs() -> u64 {
    30
}
fn default_fetch_timeout_secs() -> u64 {
    5
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
            fetch_timeout_secs: default_fetch_timeout_secs(),
            start: StartMode::Lazy,
        }
    }
}

impl SchedulerConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable format
    #[default]
    Pretty,
    /// JSON format for log aggregation
    Json,
}

/// Telemetry configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub log_format: LogFormat,
    /// Prometheus exporter port; no exporter when unset
    pub metrics_port: Option<u16>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: LogFormat::Pretty,
            metrics_port: None,
        }
    }
}

/// Invalid configuration, detected at startup
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Simulator floor must be positive, got {0}")]
    NonPositiveFloor(Decimal),
    #[error("Simulator band must not be negative, got {0}")]
    NegativeBand(Decimal),
    #[error("Seed price {seed} is below the floor {floor}")]
    SeedBelowFloor { seed: Decimal, floor: Decimal },
    #[error("{0} must be greater than zero")]
    ZeroDuration(&'static str),
    #[error("{0} must be positive")]
    NonPositiveConversion(&'static str),
}

impl SimulatorConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.floor <= Decimal::ZERO {
            return Err(ConfigError::NonPositiveFloor(self.floor));
        }
        if self.band < Decimal::ZERO {
            return Err(ConfigError::NegativeBand(self.band));
        }
        if self.seed_price < self.floor {
            return Err(ConfigError::SeedBelowFloor {
                seed: self.seed_price,
                floor: self.floor,
            });
        }
        Ok(())
    }
}

impl SchedulerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.interval_secs == 0 {
            return Err(ConfigError::ZeroDuration("scheduler.interval_secs"));
        }
        if self.fetch_timeout_secs == 0 {
            return Err(ConfigError::ZeroDuration("scheduler.fetch_timeout_secs"));
        }
        Ok(())
    }
}

impl SourceConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout_secs == 0 {
            return Err(ConfigError::ZeroDuration("source.timeout_secs"));
        }
        if self.grams_per_troy_ounce <= Decimal::ZERO {
            return Err(ConfigError::NonPositiveConversion(
                "source.grams_per_troy_ounce",
            ));
        }
        if self.conversion_rate <= Decimal::ZERO {
            return Err(ConfigError::NonPositiveConversion("source.conversion_rate"));
        }
        Ok(())
    }
}

/// Failure to load a configuration file
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error(transparent)]
    Invalid(#[from] ConfigError),
}

impl LoadError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, LoadError::Io(e) if e.kind() == std::io::ErrorKind::NotFound)
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self, LoadError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every section for values the feed cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.source.validate()?;
        self.simulator.validate()?;
        self.scheduler.validate()?;
        Ok(())
    }
}
