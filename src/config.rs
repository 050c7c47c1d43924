//! Server configuration, read once from the process environment.

use std::str::FromStr;

/// Highest final score the submission gate accepts when `SCORE_CEILING` is unset.
pub const DEFAULT_SCORE_CEILING: i64 = 450;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub db_path: String,
    pub host: String,
    pub port: u16,
    pub score_ceiling: i64,
    /// `None` disables the admin surface entirely.
    pub admin_secret: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            db_path: "whack-board.db".into(),
            host: "0.0.0.0".into(),
            port: 3000,
            score_ceiling: DEFAULT_SCORE_CEILING,
            admin_secret: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup; missing keys fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Config::default();
        Ok(Config {
            db_path: lookup("DATABASE_PATH").unwrap_or(defaults.db_path),
            host: lookup("HOST").unwrap_or(defaults.host),
            port: parse_or(&lookup, "PORT", defaults.port)?,
            score_ceiling: parse_or(&lookup, "SCORE_CEILING", defaults.score_ceiling)?,
            admin_secret: lookup("ADMIN_SECRET").filter(|s| !s.is_empty()),
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value: raw }),
    }
}
