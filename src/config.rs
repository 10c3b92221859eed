//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use crate::engine::{EngineResult, EngineSettings, Period, ProfitSplit, SeriesParams};
use crate::table::DEFAULT_PAGE_SIZE;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub engine: EngineConfig,

    #[serde(default)]
    pub table: TableConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Metrics engine configuration
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// Fixed seed for repeatable series (random when absent)
    #[serde(default)]
    pub seed: Option<u64>,

    #[serde(default)]
    pub default_period: Period,

    #[serde(default = "default_revenue")]
    pub revenue: SeriesParams,

    #[serde(default = "default_orders")]
    pub orders: SeriesParams,

    #[serde(default = "default_profit_ratio")]
    pub profit_ratio: f64,
}

fn default_revenue() -> SeriesParams {
    SeriesParams::REVENUE
}

fn default_orders() -> SeriesParams {
    SeriesParams::ORDERS
}

fn default_profit_ratio() -> f64 {
    0.35
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: None,
            default_period: Period::default(),
            revenue: default_revenue(),
            orders: default_orders(),
            profit_ratio: default_profit_ratio(),
        }
    }
}

impl EngineConfig {
    /// Validated engine settings
    pub fn settings(&self) -> EngineResult<EngineSettings> {
        let settings = EngineSettings {
            revenue: self.revenue,
            orders: self.orders,
            profit_split: ProfitSplit::new(self.profit_ratio)?,
        };
        settings.validate()?;
        Ok(settings)
    }
}

/// Table display configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TableConfig {
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,

    pub file: Option<String>,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: None,
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_overrides(env_var)
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        Self::load_with_overrides(path, env_var)
    }

    /// First config file present in the default locations
    pub fn default_path() -> Option<PathBuf> {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("pulseboard").join("config.toml")),
            Some(PathBuf::from("/etc/pulseboard/config.toml")),
            Some(PathBuf::from("./pulseboard.toml")),
        ];

        config_paths.into_iter().flatten().find(|path| path.exists())
    }

    /// Load from the first default location, or from the environment alone
    ///
    /// A config file that exists but fails to load is an error; it is never
    /// replaced by defaults.
    pub fn load_default() -> Result<Self, ConfigError> {
        match Self::default_path() {
            Some(path) => {
                let config = Self::load_with_env(&path)?;
                tracing::info!("Loaded config from {:?}", path);
                Ok(config)
            }
            None => {
                tracing::info!("Using default config with environment overrides");
                Self::from_env()
            }
        }
    }

    fn from_overrides(var: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Config::default();
        config.apply_overrides(var)?;
        config.validate()?;
        Ok(config)
    }

    fn load_with_overrides(
        path: &Path,
        var: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_overrides(var)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the engine or table cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.engine
            .settings()
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;

        if self.table.page_size == 0 {
            return Err(ConfigError::Invalid(
                "table.page_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Apply `PULSEBOARD_*` overrides looked up through `var`
    fn apply_overrides(
        &mut self,
        var: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        // Engine overrides
        if let Some(seed) = var("PULSEBOARD_SEED") {
            self.engine.seed = Some(parse_override("PULSEBOARD_SEED", &seed)?);
        }
        if let Some(period) = var("PULSEBOARD_PERIOD") {
            self.engine.default_period = parse_override("PULSEBOARD_PERIOD", &period)?;
        }

        // Table overrides
        if let Some(size) = var("PULSEBOARD_PAGE_SIZE") {
            self.table.page_size = parse_override("PULSEBOARD_PAGE_SIZE", &size)?;
        }

        // Logging overrides
        if let Some(level) = var("PULSEBOARD_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = var("PULSEBOARD_LOG_FORMAT") {
            self.logging.format = format;
        }
        Ok(())
    }
}

fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

fn parse_override<T>(key: &str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| ConfigError::Invalid(format!("{key}={value:?}: {e}")))
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Pulseboard Configuration
#
# Environment variables override these settings:
# - PULSEBOARD_SEED
# - PULSEBOARD_PERIOD
# - PULSEBOARD_PAGE_SIZE
# - PULSEBOARD_LOG_LEVEL
# - PULSEBOARD_LOG_FORMAT

[engine]
# Fixed seed for repeatable series; omit for fresh values on every run
# seed = 42

# Period used when none is given: 7d, 30d, 90d or 12m
default_period = "12m"

# Share of revenue reported as profit (0.0 - 1.0)
profit_ratio = 0.35

# Monthly revenue series: starting value, compound monthly growth, noise width
[engine.revenue]
base_value = 125000.0
growth_rate = 0.035
variance = 0.12

# Monthly order count series
[engine.orders]
base_value = 850.0
growth_rate = 0.03
variance = 0.15

[table]
# Rows per page in table output
page_size = 10

[logging]
# Log level: trace, debug, info, warn, error
level = "warn"

# Log format: pretty (for development) or json (for production)
format = "pretty"

# Optional log file path
# file = "/var/log/pulseboard/pulseboard.log"
"#
    .to_string()
}
