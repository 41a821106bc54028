//! Application configuration management.

use serde::Deserialize;

use crate::error::AppError;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Report window and range limits.
    pub statistics: StatisticsConfig,
    /// Logging configuration.
    pub logging: LogConfig,
}

/// Windows and bounds used by the statistics engine.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct StatisticsConfig {
    /// Days covered by the dashboard category and trend sections.
    pub dashboard_days: u32,
    /// Number of categories listed per kind on the dashboard.
    pub top_categories: usize,
    /// Trend length when the caller gives no explicit range.
    pub trend_default_days: u32,
    /// Longest trend a caller may request.
    pub trend_max_days: u32,
    /// Calendar months in the rolling monthly trend.
    pub monthly_trend_months: u32,
    /// Look-back window for the recent entry count.
    pub recent_window_days: u32,
    /// Window length for category period comparison defaults.
    pub compare_window_days: u32,
    /// Longest custom range folded into daily buckets.
    pub max_range_days: u32,
}

impl Default for StatisticsConfig {
    fn default() -> Self {
        Self {
            dashboard_days: 7,
            top_categories: 5,
            trend_default_days: 30,
            trend_max_days: 365,
            monthly_trend_months: 6,
            recent_window_days: 7,
            compare_window_days: 30,
            max_range_days: 366,
        }
    }
}

impl StatisticsConfig {
    /// Maximum accepted value for `dashboard_days`.
    pub const MAX_DASHBOARD_DAYS: u32 = 30;

    /// Checks that every window is usable.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` naming the first offending field.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.dashboard_days == 0 || self.dashboard_days > Self::MAX_DASHBOARD_DAYS {
            return Err(AppError::Config(format!(
                "statistics.dashboard_days must be within 1..={}, got {}",
                Self::MAX_DASHBOARD_DAYS,
                self.dashboard_days
            )));
        }
        if self.top_categories == 0 {
            return Err(AppError::Config(
                "statistics.top_categories must be positive".to_string(),
            ));
        }
        if self.trend_default_days == 0 || self.trend_default_days > self.trend_max_days {
            return Err(AppError::Config(format!(
                "statistics.trend_default_days must be within 1..={}, got {}",
                self.trend_max_days, self.trend_default_days
            )));
        }
        if self.trend_max_days > self.max_range_days {
            return Err(AppError::Config(
                "statistics.trend_max_days cannot exceed statistics.max_range_days".to_string(),
            ));
        }
        if self.monthly_trend_months == 0 || self.monthly_trend_months > 120 {
            return Err(AppError::Config(format!(
                "statistics.monthly_trend_months must be within 1..=120, got {}",
                self.monthly_trend_months
            )));
        }
        if self.recent_window_days == 0 || self.compare_window_days == 0 {
            return Err(AppError::Config(
                "statistics look-back windows must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Default `EnvFilter` directive when `RUST_LOG` is unset.
    pub filter: String,
    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "tally=info".to_string(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// Sources, later overriding earlier: `config/default`, `config/{RUN_MODE}`,
    /// then `TALLY_`-prefixed environment variables with `__` as the nesting
    /// separator (e.g. `TALLY_STATISTICS__DASHBOARD_DAYS=14`).
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded or fails validation.
    pub fn load() -> Result<Self, AppError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());
        Self::build(&run_mode, None)
    }

    /// Builds the configuration, reading `env` instead of the process
    /// environment when given.
    fn build(run_mode: &str, env: Option<config::Map<String, String>>) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(
                config::Environment::with_prefix("TALLY")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .source(env),
            )
            .build()?;

        let config: Self = config.try_deserialize()?;
        config.statistics.validate()?;
        Ok(config)
    }
}
