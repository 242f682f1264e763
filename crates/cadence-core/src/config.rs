use anyhow::Result;
use config::{Config, ConfigBuilder, builder::DefaultState};
use serde::Deserialize;

use crate::constants::{DEFAULT_LOOKAHEAD_DAYS, DEFAULT_TIMEZONE};
use crate::error::{CoreError, CoreResult};

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub schedule: ScheduleConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleConfig {
    /// IANA name used to display occurrences when an event has no zone of its own.
    pub timezone: String,
    /// How far ahead `cadence` lists upcoming occurrences.
    pub lookahead_days: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

/// Nested keys use a double underscore, so `SCHEDULE__LOOKAHEAD_DAYS` sets
/// `schedule.lookahead_days`.
fn environment() -> config::Environment {
    config::Environment::default()
        .convert_case(config::Case::Snake)
        .separator("__")
        .ignore_empty(true)
        .try_parsing(true)
}

fn defaults() -> Result<ConfigBuilder<DefaultState>> {
    Ok(Config::builder()
        .set_default("schedule.timezone", DEFAULT_TIMEZONE)?
        .set_default("schedule.lookahead_days", DEFAULT_LOOKAHEAD_DAYS)?
        .set_default("logging.level", "info")?)
}

impl Settings {
    /// ## Summary
    /// Loads configuration into a `Settings`: defaults, then an optional
    /// `config.toml`, then environment variables (`SCHEDULE__TIMEZONE`,
    /// `SCHEDULE__LOOKAHEAD_DAYS`, `LOGGING__LEVEL`). Later sources win.
    ///
    /// ## Errors
    /// Returns an error if building the configuration or deserializing it fails.
    pub fn load() -> Result<Self> {
        Self::from_environment(environment())
    }

    fn from_environment(environment: config::Environment) -> Result<Self> {
        Ok(defaults()?
            .add_source(config::File::with_name("config.toml").required(false))
            .add_source(environment)
            .build()?
            .try_deserialize::<Settings>()?)
    }

    /// ## Summary
    /// Checks values that deserialize cleanly but cannot be used.
    ///
    /// ## Errors
    /// Returns `CoreError::InvalidSetting` for an empty timezone name or a zero look-ahead window.
    pub fn validate(&self) -> CoreResult<()> {
        if self.schedule.timezone.trim().is_empty() {
            return Err(CoreError::InvalidSetting {
                key: "schedule.timezone",
                reason: "must not be empty".to_string(),
            });
        }
        if self.schedule.lookahead_days == 0 {
            return Err(CoreError::InvalidSetting {
                key: "schedule.lookahead_days",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

/// ## Summary
/// Loads configuration from environment variables and `.env` file.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config() -> Result<Settings> {
    dotenvy::dotenv().ok();

    Settings::load()
}
