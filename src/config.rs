use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

use crate::blinds::BlindConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value {value:?} for {key}")]
    Invalid { key: &'static str, value: String },
}

/// Process configuration, read from the environment
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// JSON league file, used unless `database_url` is set
    pub league_path: PathBuf,
    /// PostgreSQL connection string
    pub database_url: Option<String>,
    /// Address the WebSocket server listens on
    pub bind_addr: String,
    pub blinds: BlindConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            league_path: PathBuf::from("game.db.json"),
            database_url: None,
            bind_addr: "0.0.0.0:5000".to_string(),
            blinds: BlindConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup, falling back
    /// to the defaults for missing keys.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let base_minutes = parse_var(&lookup, "POKER_BLIND_BASE_MINUTES")?
            .unwrap_or(defaults.blinds.base_minutes);
        let unit = match parse_var::<u64, _>(&lookup, "POKER_BLIND_UNIT_SECS")? {
            Some(0) => {
                return Err(ConfigError::Invalid {
                    key: "POKER_BLIND_UNIT_SECS",
                    value: "0".to_string(),
                })
            }
            Some(secs) => Duration::from_secs(secs),
            None => defaults.blinds.unit,
        };

        Ok(Self {
            league_path: lookup("POKER_DB_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.league_path),
            database_url: lookup("DATABASE_URL").filter(|url| !url.is_empty()),
            bind_addr: lookup("POKER_BIND_ADDR").unwrap_or(defaults.bind_addr),
            blinds: BlindConfig {
                base_minutes,
                unit,
                ..defaults.blinds
            },
        })
    }
}

fn parse_var<T, F>(lookup: &F, key: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    let Some(value) = lookup(key) else {
        return Ok(None);
    };

    let parsed = value.trim().parse::<T>();
    match parsed {
        Ok(parsed) => Ok(Some(parsed)),
        Err(_) => Err(ConfigError::Invalid { key, value }),
    }
}
