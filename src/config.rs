//! Runtime configuration loaded from environment variables.
//!
//! - `TRADEDESK_API_URL` - account backend base URL (default: http://localhost:8080/)
//! - `TRADEDESK_LOG_FORMAT` - `compact` (default) or `json`
//! - `RUST_LOG` - tracing filter, see [`crate::util::logging`]

use std::sync::OnceLock;

use thiserror::Error;
use url::Url;

pub const DEFAULT_API_URL: &str = "http://localhost:8080/";

static ACTIVE: OnceLock<AppConfig> = OnceLock::new();

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid URL in {0}: {1}")]
    InvalidUrl(&'static str, url::ParseError),
    #[error("invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub api_base_url: Url,
    pub log_format: LogFormat,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        #[cfg(not(target_arch = "wasm32"))]
        if let Err(err) = dotenvy::dotenv() {
            if !err.not_found() {
                eprintln!("ignoring malformed .env file: {err}");
            }
        }

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw_url = lookup("TRADEDESK_API_URL")
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let api_base_url = parse_base_url(raw_url.trim())
            .map_err(|err| ConfigError::InvalidUrl("TRADEDESK_API_URL", err))?;

        let log_format = match lookup("TRADEDESK_LOG_FORMAT")
            .map(|value| value.trim().to_ascii_lowercase())
            .as_deref()
        {
            None | Some("") | Some("compact") => LogFormat::Compact,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(ConfigError::InvalidValue(
                    "TRADEDESK_LOG_FORMAT",
                    other.to_string(),
                ))
            }
        };

        Ok(Self {
            api_base_url,
            log_format,
        })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: Url::parse(DEFAULT_API_URL).unwrap_or_else(|_| unreachable!()),
            log_format: LogFormat::Compact,
        }
    }
}

/// Makes `config` the process-wide configuration. Later calls are ignored.
pub fn install(config: AppConfig) {
    if ACTIVE.set(config).is_err() {
        tracing::debug!("configuration already installed");
    }
}

pub fn active() -> AppConfig {
    ACTIVE.get().cloned().unwrap_or_default()
}

/// `Url::join` drops the last path segment unless the base ends in `/`.
pub fn parse_base_url(raw: &str) -> Result<Url, url::ParseError> {
    if raw.ends_with('/') {
        Url::parse(raw)
    } else {
        Url::parse(&format!("{raw}/"))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.api_base_url.as_str(), DEFAULT_API_URL);
    }

    #[test]
    fn base_url_gets_trailing_slash() {
        let config =
            AppConfig::from_lookup(lookup(&[("TRADEDESK_API_URL", "https://api.example.com/v1")]))
                .unwrap();
        assert_eq!(config.api_base_url.as_str(), "https://api.example.com/v1/");
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            AppConfig::from_lookup(lookup(&[("TRADEDESK_API_URL", "not a url")])),
            Err(ConfigError::InvalidUrl(..))
        ));
        assert!(matches!(
            AppConfig::from_lookup(lookup(&[("TRADEDESK_LOG_FORMAT", "xml")])),
            Err(ConfigError::InvalidValue(..))
        ));
    }

    #[test]
    fn json_log_format() {
        let config = AppConfig::from_lookup(lookup(&[("TRADEDESK_LOG_FORMAT", "JSON")])).unwrap();
        assert_eq!(config.log_format, LogFormat::Json);
    }
}
