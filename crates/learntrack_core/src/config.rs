//! Environment-driven runtime configuration.
//!
//! # Responsibility
//! - Resolve data directory, log level, calendar-day policy and trend window.
//! - Keep resolution testable through an injected variable lookup.
//!
//! # Invariants
//! - Blank variables are treated as unset.
//! - Invalid values are rejected with the offending variable name; they never
//!   fall back silently.

use crate::logging::default_log_level;
use crate::model::calendar::DayPolicy;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const ENV_DATA_DIR: &str = "LEARNTRACK_DATA_DIR";
pub const ENV_LOG_LEVEL: &str = "LEARNTRACK_LOG_LEVEL";
pub const ENV_UTC_OFFSET_MINUTES: &str = "LEARNTRACK_UTC_OFFSET_MINUTES";
pub const ENV_TREND_WINDOW: &str = "LEARNTRACK_TREND_WINDOW";

pub const DEFAULT_TREND_WINDOW: usize = 4;
const DB_FILE_NAME: &str = "learntrack.sqlite3";
const LOG_DIR_NAME: &str = "logs";
const APP_DIR_NAME: &str = "learntrack";

/// Rejected configuration value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    pub variable: &'static str,
    pub value: String,
    pub reason: &'static str,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid {} value `{}`: {}",
            self.variable, self.value, self.reason
        )
    }
}

impl Error for ConfigError {}

/// Resolved core configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    pub data_dir: PathBuf,
    pub log_level: String,
    pub day_policy: DayPolicy,
    pub trend_window: usize,
}

impl CoreConfig {
    /// Resolves configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolves configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let data_dir = read(ENV_DATA_DIR)
            .map(PathBuf::from)
            .unwrap_or_else(|| default_data_dir(&read));

        let log_level = read(ENV_LOG_LEVEL).unwrap_or_else(|| default_log_level().to_string());

        let day_policy = match read(ENV_UTC_OFFSET_MINUTES) {
            Some(raw) => raw
                .parse::<i32>()
                .ok()
                .and_then(DayPolicy::from_offset_minutes)
                .ok_or(ConfigError {
                    variable: ENV_UTC_OFFSET_MINUTES,
                    value: raw,
                    reason: "expected whole minutes within +/-1440",
                })?,
            None => DayPolicy::Utc,
        };

        let trend_window = match read(ENV_TREND_WINDOW) {
            Some(raw) => raw
                .parse::<usize>()
                .ok()
                .filter(|window| *window > 0)
                .ok_or(ConfigError {
                    variable: ENV_TREND_WINDOW,
                    value: raw,
                    reason: "expected a positive integer",
                })?,
            None => DEFAULT_TREND_WINDOW,
        };

        Ok(Self {
            data_dir,
            log_level,
            day_policy,
            trend_window,
        })
    }

    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(DB_FILE_NAME)
    }

    pub fn log_dir(&self) -> PathBuf {
        self.data_dir.join(LOG_DIR_NAME)
    }
}

fn default_data_dir(read: &dyn Fn(&str) -> Option<String>) -> PathBuf {
    if let Some(xdg_data_home) = read("XDG_DATA_HOME") {
        return PathBuf::from(xdg_data_home).join(APP_DIR_NAME);
    }
    if let Some(home) = read("HOME") {
        return PathBuf::from(home)
            .join(".local")
            .join("share")
            .join(APP_DIR_NAME);
    }
    PathBuf::from(format!(".{APP_DIR_NAME}"))
}

#[cfg(test)]
mod tests {
    use super::{
        CoreConfig, DEFAULT_TREND_WINDOW, ENV_DATA_DIR, ENV_TREND_WINDOW, ENV_UTC_OFFSET_MINUTES,
    };
    use crate::model::calendar::DayPolicy;
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn resolve(vars: &[(&str, &str)]) -> Result<CoreConfig, super::ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        CoreConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_follow_home_directory() {
        let config = resolve(&[("HOME", "/home/coach")]).expect("defaults resolve");
        assert_eq!(
            config.data_dir,
            PathBuf::from("/home/coach/.local/share/learntrack")
        );
        assert_eq!(config.day_policy, DayPolicy::Utc);
        assert_eq!(config.trend_window, DEFAULT_TREND_WINDOW);
        assert!(config.db_path().ends_with("learntrack.sqlite3"));
    }

    #[test]
    fn explicit_variables_override_defaults() {
        let config = resolve(&[
            (ENV_DATA_DIR, " /srv/learntrack "),
            ("XDG_DATA_HOME", "/ignored"),
            (ENV_UTC_OFFSET_MINUTES, "480"),
            (ENV_TREND_WINDOW, "6"),
        ])
        .expect("explicit config resolves");

        assert_eq!(config.data_dir, PathBuf::from("/srv/learntrack"));
        assert_eq!(config.day_policy.offset_minutes(), 480);
        assert_eq!(config.trend_window, 6);
        assert_eq!(config.log_dir(), PathBuf::from("/srv/learntrack/logs"));
    }

    #[test]
    fn invalid_values_name_the_variable() {
        let err = resolve(&[(ENV_TREND_WINDOW, "0")]).expect_err("zero window rejected");
        assert_eq!(err.variable, ENV_TREND_WINDOW);

        let err = resolve(&[(ENV_UTC_OFFSET_MINUTES, "east")]).expect_err("non-numeric offset");
        assert_eq!(err.variable, ENV_UTC_OFFSET_MINUTES);
        assert!(err.to_string().contains("east"));
    }
}
