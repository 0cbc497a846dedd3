//! Runtime configuration read from the environment

use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(200);
pub const DEFAULT_PORT: u16 = 8501;
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(60 * 60);

/// Invalid environment value
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var} must be {expected}, got {value:?}")]
    Invalid {
        var: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Settings for the outbound summarize service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Base URL; `/api/summarize` is appended
    pub base_url: String,
    pub timeout: Duration,
    /// Skip TLS certificate verification. Off unless explicitly enabled.
    pub insecure_tls: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            insecure_tls: false,
        }
    }
}

impl ApiConfig {
    pub fn summarize_endpoint(&self) -> String {
        format!("{}/api/summarize", self.base_url.trim_end_matches('/'))
    }
}

/// Whole-application configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub port: u16,
    /// Idle time after which a browser session is dropped
    pub session_ttl: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            port: DEFAULT_PORT,
            session_ttl: DEFAULT_SESSION_TTL,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup (tests pass a map)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(url) = lookup("PUBMED_API_URL").filter(|u| !u.trim().is_empty()) {
            config.api.base_url = url.trim().to_string();
        }

        if let Some(raw) = lookup("PUBMED_API_TIMEOUT_SECS") {
            config.api.timeout = parse_secs("PUBMED_API_TIMEOUT_SECS", &raw)?;
        }

        if let Some(raw) = lookup("PUBMED_API_INSECURE_TLS") {
            config.api.insecure_tls = parse_bool(&raw).ok_or_else(|| ConfigError::Invalid {
                var: "PUBMED_API_INSECURE_TLS",
                expected: "true or false",
                value: raw.clone(),
            })?;
        }

        if let Some(raw) = lookup("PUBMED_CHAT_PORT") {
            config.port = raw.trim().parse().map_err(|_| ConfigError::Invalid {
                var: "PUBMED_CHAT_PORT",
                expected: "a port number",
                value: raw.clone(),
            })?;
        }

        if let Some(raw) = lookup("PUBMED_SESSION_TTL_SECS") {
            config.session_ttl = parse_secs("PUBMED_SESSION_TTL_SECS", &raw)?;
        }

        Ok(config)
    }
}

fn parse_secs(var: &'static str, raw: &str) -> Result<Duration, ConfigError> {
    raw.trim()
        .parse()
        .ok()
        .filter(|s| *s > 0)
        .map(Duration::from_secs)
        .ok_or_else(|| ConfigError::Invalid {
            var,
            expected: "a positive number of seconds",
            value: raw.to_string(),
        })
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
