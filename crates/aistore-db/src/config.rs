//! Application configuration.
//!
//! Configuration is loaded from environment variables with fallback to defaults.
//!
//! | Variable              | Default                    |
//! |-----------------------|----------------------------|
//! | `DB_PATH`             | `./data/database.sqlite`   |
//! | `DB_MAX_CONNECTIONS`  | `5`                        |
//! | `REPORT_DEFAULT_DAYS` | `30`                       |
//! | `DASHBOARD_DAYS`      | `7`                        |

use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use aistore_core::ReportConfig;

use crate::pool::DbConfig;

/// Longest window a default report or dashboard may span.
const MAX_DAYS: u32 = 3660;

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// SQLite database file
    pub db_path: PathBuf,

    /// Pool size
    pub db_max_connections: u32,

    /// Reporting defaults handed to the report service
    pub report: ReportConfig,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from any key lookup (environment, test map).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = AppConfig {
            db_path: lookup("DB_PATH")
                .unwrap_or_else(|| "./data/database.sqlite".to_string())
                .into(),

            db_max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", 5)?,

            report: ReportConfig {
                default_window_days: parse_or(&lookup, "REPORT_DEFAULT_DAYS", 30)?,
                dashboard_days: parse_or(&lookup, "DASHBOARD_DAYS", 7)?,
            },
        };

        if config.db_max_connections == 0 {
            return Err(ConfigError::InvalidValue("DB_MAX_CONNECTIONS".to_string()));
        }
        for (key, days) in [
            ("REPORT_DEFAULT_DAYS", config.report.default_window_days),
            ("DASHBOARD_DAYS", config.report.dashboard_days),
        ] {
            if days == 0 || days > MAX_DAYS {
                return Err(ConfigError::InvalidValue(key.to_string()));
            }
        }

        Ok(config)
    }

    /// Pool settings for [`crate::Database::new`].
    pub fn db_config(&self) -> DbConfig {
        DbConfig::new(&self.db_path).max_connections(self.db_max_connections)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(key.to_string())),
        None => Ok(default),
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}
