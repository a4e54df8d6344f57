//! Configuration loading from environment.
//!
//! Settings come from the process environment, optionally seeded from a
//! dotenv-format file. Values already present in the environment win.

use std::fmt;
use std::path::Path;
use std::sync::OnceLock;
use std::time::Duration;

use chrono::NaiveDate;
use rates_client::{DEFAULT_HISTORICAL_PATH, DEFAULT_LIVE_PATH, RatesClient};
use rates_types::{ApiError, ApiKey, Credential};

pub const ENV_CONFIG_FILE: &str = "RATES_CONFIG_FILE";
pub const ENV_BASE_URL: &str = "RATES_BASE_URL";
pub const ENV_LIVE_PATH: &str = "RATES_LIVE_PATH";
pub const ENV_HISTORICAL_PATH: &str = "RATES_HISTORICAL_PATH";
pub const ENV_API_KEY: &str = "RATES_API_KEY";
pub const ENV_EXCEEDED_API_KEY: &str = "RATES_EXCEEDED_API_KEY";
pub const ENV_INVALID_API_KEY: &str = "RATES_INVALID_API_KEY";
pub const ENV_HISTORICAL_DATE: &str = "RATES_HISTORICAL_DATE";
pub const ENV_TIMEOUT_SECS: &str = "RATES_TIMEOUT_SECS";

pub const DEFAULT_BASE_URL: &str = "https://api.apilayer.com/currency_data";
pub const DEFAULT_INVALID_API_KEY: &str = "QuDPaIT8HjOGelzpvDXl0ZCwq87opwR5";
pub const DEFAULT_HISTORICAL_DATE: &str = "2023-10-20";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("{key}: {reason}")]
    Invalid { key: &'static str, reason: String },

    #[error("Failed to load config file {path}: {reason}")]
    File { path: String, reason: String },
}

/// Values cases resolve at run time.
#[derive(Clone, PartialEq, Eq)]
pub struct Fixtures {
    pub valid_key: String,
    pub exceeded_key: String,
    pub invalid_key: String,
    /// A date the historical endpoint has data for, `YYYY-MM-DD`.
    pub historical_date: String,
}

impl Fixtures {
    /// Concrete key for a credential variant. Missing keys resolve to an
    /// empty string, which the service rejects like any unknown key.
    pub fn api_key(&self, credential: Credential) -> ApiKey {
        match credential {
            Credential::Valid => ApiKey::new(self.valid_key.clone()),
            Credential::Invalid => ApiKey::new(self.invalid_key.clone()),
            Credential::ExceededQuota => ApiKey::new(self.exceeded_key.clone()),
            Credential::Absent => ApiKey::absent(),
        }
    }
}

impl fmt::Debug for Fixtures {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fixtures")
            .field("valid_key", &ApiKey::new(self.valid_key.clone()))
            .field("exceeded_key", &ApiKey::new(self.exceeded_key.clone()))
            .field("invalid_key", &ApiKey::new(self.invalid_key.clone()))
            .field("historical_date", &self.historical_date)
            .finish()
    }
}

/// Suite configuration. Built once, read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuiteConfig {
    pub base_url: String,
    pub live_path: String,
    pub historical_path: String,
    pub timeout: Duration,
    pub fixtures: Fixtures,
}

static GLOBAL: OnceLock<Result<SuiteConfig, ConfigError>> = OnceLock::new();

impl SuiteConfig {
    /// Process-wide configuration, loaded on first use from
    /// `RATES_CONFIG_FILE`, `.env` and the environment.
    pub fn global() -> Result<&'static SuiteConfig, ConfigError> {
        GLOBAL
            .get_or_init(|| {
                let file = std::env::var(ENV_CONFIG_FILE).ok();
                Self::load(file.as_deref().map(Path::new))
            })
            .as_ref()
            .map_err(Clone::clone)
    }

    /// Seeds the environment from `file` (if given) and `.env`, then reads it.
    pub fn load(file: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = file {
            dotenvy::from_path(path).map_err(|e| ConfigError::File {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;
        }
        dotenvy::dotenv().ok();
        Self::from_env()
    }

    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup(ENV_BASE_URL).unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        if base_url.trim().is_empty() {
            return Err(ConfigError::Invalid {
                key: ENV_BASE_URL,
                reason: "must not be empty".into(),
            });
        }

        let live_path = lookup(ENV_LIVE_PATH).unwrap_or_else(|| DEFAULT_LIVE_PATH.to_string());
        let historical_path =
            lookup(ENV_HISTORICAL_PATH).unwrap_or_else(|| DEFAULT_HISTORICAL_PATH.to_string());

        let timeout = match lookup(ENV_TIMEOUT_SECS) {
            Some(raw) => parse_timeout_seconds(&raw)?,
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        let historical_date =
            lookup(ENV_HISTORICAL_DATE).unwrap_or_else(|| DEFAULT_HISTORICAL_DATE.to_string());
        NaiveDate::parse_from_str(historical_date.trim(), "%Y-%m-%d").map_err(|e| {
            ConfigError::Invalid {
                key: ENV_HISTORICAL_DATE,
                reason: format!("{historical_date:?} is not a YYYY-MM-DD date ({e})"),
            }
        })?;

        let valid_key = lookup(ENV_API_KEY).unwrap_or_default();
        if valid_key.is_empty() {
            tracing::warn!("{} is not set; cases using a valid key will fail", ENV_API_KEY);
        }
        let exceeded_key = lookup(ENV_EXCEEDED_API_KEY).unwrap_or_default();
        if exceeded_key.is_empty() {
            tracing::warn!(
                "{} is not set; quota-exceeded cases will fail",
                ENV_EXCEEDED_API_KEY
            );
        }

        Ok(Self {
            base_url: base_url.trim().to_string(),
            live_path,
            historical_path,
            timeout,
            fixtures: Fixtures {
                valid_key,
                exceeded_key,
                invalid_key: lookup(ENV_INVALID_API_KEY)
                    .unwrap_or_else(|| DEFAULT_INVALID_API_KEY.to_string()),
                historical_date: historical_date.trim().to_string(),
            },
        })
    }

    /// Builds the HTTP adapter described by this configuration.
    pub fn client(&self) -> Result<RatesClient, ApiError> {
        RatesClient::new(&self.base_url)
            .with_paths(&self.live_path, &self.historical_path)
            .with_timeout(self.timeout)
    }
}

/// Parses a positive timeout in whole seconds.
fn parse_timeout_seconds(raw: &str) -> Result<Duration, ConfigError> {
    let secs: u64 = raw.trim().parse().map_err(|_| ConfigError::Invalid {
        key: ENV_TIMEOUT_SECS,
        reason: "must be a positive integer number of seconds".into(),
    })?;
    if secs == 0 {
        return Err(ConfigError::Invalid {
            key: ENV_TIMEOUT_SECS,
            reason: "must be greater than zero".into(),
        });
    }
    Ok(Duration::from_secs(secs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_nothing_is_set() {
        let config = SuiteConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.live_path, "/live");
        assert_eq!(config.historical_path, "/historical");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.fixtures.invalid_key, DEFAULT_INVALID_API_KEY);
        assert_eq!(config.fixtures.historical_date, "2023-10-20");
    }

    #[test]
    fn test_missing_keys_degrade_to_empty_credentials() {
        let config = SuiteConfig::from_lookup(lookup(&[])).unwrap();
        let key = config.fixtures.api_key(Credential::Valid);
        assert_eq!(key.expose(), Some(""));
        let key = config.fixtures.api_key(Credential::ExceededQuota);
        assert_eq!(key.expose(), Some(""));
        assert_eq!(config.fixtures.api_key(Credential::Absent).expose(), None);
    }

    #[test]
    fn test_overrides_are_applied() {
        let config = SuiteConfig::from_lookup(lookup(&[
            (ENV_BASE_URL, " http://127.0.0.1:8080 "),
            (ENV_LIVE_PATH, "/v1/live"),
            (ENV_API_KEY, "good"),
            (ENV_EXCEEDED_API_KEY, "spent"),
            (ENV_INVALID_API_KEY, "bogus"),
            (ENV_HISTORICAL_DATE, "2020-02-29"),
            (ENV_TIMEOUT_SECS, "5"),
        ]))
        .unwrap();
        assert_eq!(config.base_url, "http://127.0.0.1:8080");
        assert_eq!(config.live_path, "/v1/live");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(
            config.fixtures.api_key(Credential::Invalid).expose(),
            Some("bogus")
        );
        assert_eq!(config.fixtures.historical_date, "2020-02-29");
    }

    #[test]
    fn test_rejects_bad_timeout() {
        let err = SuiteConfig::from_lookup(lookup(&[(ENV_TIMEOUT_SECS, "soon")])).unwrap_err();
        assert!(err.to_string().contains(ENV_TIMEOUT_SECS));
        let err = SuiteConfig::from_lookup(lookup(&[(ENV_TIMEOUT_SECS, "0")])).unwrap_err();
        assert!(err.to_string().contains("greater than zero"));
    }

    #[test]
    fn test_rejects_calendar_invalid_fixture_date() {
        let err =
            SuiteConfig::from_lookup(lookup(&[(ENV_HISTORICAL_DATE, "1999-02-29")])).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                key: ENV_HISTORICAL_DATE,
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_empty_base_url() {
        assert!(SuiteConfig::from_lookup(lookup(&[(ENV_BASE_URL, "  ")])).is_err());
    }

    #[test]
    fn test_debug_output_hides_keys() {
        let config =
            SuiteConfig::from_lookup(lookup(&[(ENV_API_KEY, "supersecretkey")])).unwrap();
        let debug = format!("{:?}", config);
        assert!(!debug.contains("supersecretkey"));
        assert!(debug.contains("supe***"));
    }

    #[test]
    fn test_client_uses_configured_paths() {
        let config = SuiteConfig::from_lookup(lookup(&[
            (ENV_BASE_URL, "http://localhost:4000/"),
            (ENV_HISTORICAL_PATH, "hist"),
        ]))
        .unwrap();
        let client = config.client().unwrap();
        assert_eq!(
            client.url(rates_types::Endpoint::Historical),
            "http://localhost:4000/hist"
        );
    }
}
