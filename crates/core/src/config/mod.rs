//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (SEJM_*)
//! 2. TOML config file (if SEJM_CONFIG_FILE set)
//! 3. Built-in defaults

use std::path::PathBuf;
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Deserializer, Serialize};

mod duration;
mod validation;

pub use duration::parse_duration;
pub use validation::ConfigError;

/// Default deadline for a single upstream call.
pub const DEFAULT_API_TIMEOUT: Duration = Duration::from_secs(5);

/// Default maximum age of a cached year.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (SEJM_*)
/// 2. TOML config file (if SEJM_CONFIG_FILE set)
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Path to SQLite cache database.
    ///
    /// Set via SEJM_DB_PATH environment variable.
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,

    /// Base URL of the ELI registry API.
    ///
    /// Set via SEJM_BASE_URL environment variable.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// User-Agent string for registry requests.
    ///
    /// Set via SEJM_USER_AGENT environment variable.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Deadline for a single registry call, e.g. `5s` or `1500ms`.
    ///
    /// Set via SEJM_API_TIMEOUT environment variable. Malformed values fall
    /// back to the default with a warning.
    #[serde(default = "default_api_timeout", deserialize_with = "lenient_text")]
    pub api_timeout: String,

    /// Maximum age of a cached year before it is fetched again, e.g. `24h`.
    ///
    /// Set via SEJM_CACHE_TTL environment variable. Malformed values fall
    /// back to the default with a warning.
    #[serde(default = "default_cache_ttl", deserialize_with = "lenient_text")]
    pub cache_ttl: String,
}

fn default_db_path() -> PathBuf {
    PathBuf::from("sejm.db")
}

fn default_base_url() -> String {
    "https://api.sejm.gov.pl/eli".into()
}

fn default_user_agent() -> String {
    "ustawka/0.1".into()
}

fn default_api_timeout() -> String {
    "5s".into()
}

fn default_cache_ttl() -> String {
    "24h".into()
}

/// Stand-in for a duration setting given as an array or table.
const NOT_A_DURATION: &str = "<not a duration>";

/// Accept any value for a duration setting so that a bad value reaches the
/// fallback logic instead of failing the whole load.
fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Int(i64),
        Float(f64),
        Flag(bool),
        Other(serde::de::IgnoredAny),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Int(n) => n.to_string(),
        Raw::Float(f) => f.to_string(),
        Raw::Flag(b) => b.to_string(),
        Raw::Other(_) => NOT_A_DURATION.to_string(),
    })
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            base_url: default_base_url(),
            user_agent: default_user_agent(),
            api_timeout: default_api_timeout(),
            cache_ttl: default_cache_ttl(),
        }
    }
}

impl AppConfig {
    /// Load configuration from all sources with layered precedence.
    ///
    /// Priority (highest wins):
    /// 1. Environment variables prefixed with `SEJM_`
    /// 2. TOML file from `SEJM_CONFIG_FILE` (if set)
    /// 3. Built-in defaults via `Default::default()`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("SEJM_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(
            Env::prefixed("SEJM_")
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        );

        Self::from_figment(&figment)
    }

    /// Extract and validate configuration from an assembled figment.
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }

    /// Upstream call deadline, falling back to 5s when the setting is malformed.
    pub fn api_timeout(&self) -> Duration {
        resolve_duration("api_timeout", &self.api_timeout, DEFAULT_API_TIMEOUT)
    }

    /// Cache TTL, falling back to 24h when the setting is malformed.
    pub fn cache_ttl(&self) -> Duration {
        resolve_duration("cache_ttl", &self.cache_ttl, DEFAULT_CACHE_TTL)
    }
}

fn resolve_duration(field: &str, raw: &str, default: Duration) -> Duration {
    match parse_duration(raw) {
        Ok(value) => {
            if value != default {
                tracing::info!(field, value = ?value, "using custom duration");
            }
            value
        }
        Err(e) => {
            tracing::warn!(field, value = raw, default = ?default, error = %e, "invalid duration, using default");
            default
        }
    }
}
