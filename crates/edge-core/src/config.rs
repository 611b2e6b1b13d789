//! Proxy configuration sourced from the hosting environment.

use serde::{Deserialize, Serialize};

/// Variable holding the cache service REST endpoint.
pub const CACHE_URL_VAR: &str = "upstash_redis_rest_url";
/// Variable holding the cache service access token.
pub const CACHE_TOKEN_VAR: &str = "upstash_redis_rest_token";
/// Variable overriding the upstream document store project.
pub const FIRESTORE_PROJECT_VAR: &str = "firestore_project";
/// Variable setting the minimum log level.
pub const LOG_LEVEL_VAR: &str = "log_level";
/// Variable setting the log output format.
pub const LOG_FORMAT_VAR: &str = "log_format";

/// Every variable the proxy reads, in lookup order.
pub const CONFIG_VARS: [&str; 5] = [
    CACHE_URL_VAR,
    CACHE_TOKEN_VAR,
    FIRESTORE_PROJECT_VAR,
    LOG_LEVEL_VAR,
    LOG_FORMAT_VAR,
];

/// Project served when no override is configured.
pub const DEFAULT_FIRESTORE_PROJECT: &str = "shiv-portfolio-47ce9";

/// Errors raised while loading configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required variable: {0}")]
    Missing(&'static str),

    #[error("invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },

    #[error("failed to read configuration: {0}")]
    Source(String),
}

/// Configuration for a proxy instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxyConfig {
    /// Cache service REST endpoint.
    #[serde(rename = "upstash_redis_rest_url", default)]
    pub cache_url: String,
    /// Cache service bearer token.
    #[serde(rename = "upstash_redis_rest_token", default)]
    pub cache_token: String,
    /// Upstream document store project identifier.
    #[serde(default = "default_project")]
    pub firestore_project: String,
    /// Minimum log level name.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Log output format name.
    #[serde(default = "default_log_format")]
    pub log_format: String,
}

fn default_project() -> String {
    DEFAULT_FIRESTORE_PROJECT.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

impl ProxyConfig {
    /// Create a configuration with the two required values.
    pub fn new(cache_url: impl Into<String>, cache_token: impl Into<String>) -> Self {
        Self {
            cache_url: cache_url.into(),
            cache_token: cache_token.into(),
            firestore_project: default_project(),
            log_level: default_log_level(),
            log_format: default_log_format(),
        }
    }

    /// Set the upstream project.
    pub fn with_firestore_project(mut self, project: impl Into<String>) -> Self {
        self.firestore_project = project.into();
        self
    }

    /// Build from `(name, value)` pairs such as Spin variables.
    ///
    /// Unknown names are ignored; empty values count as unset.
    pub fn from_variables<I, K, V>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let map: serde_json::Map<String, serde_json::Value> = vars
            .into_iter()
            .map(|(k, v)| -> (String, String) { (k.into(), v.into()) })
            .filter(|(k, v)| CONFIG_VARS.contains(&k.as_str()) && !v.trim().is_empty())
            .map(|(k, v)| (k, serde_json::Value::String(v.trim().to_string())))
            .collect();

        let config: ProxyConfig = serde_json::from_value(serde_json::Value::Object(map))
            .map_err(|e| ConfigError::Source(e.to_string()))?;

        config.validated()
    }

    /// Check required values and normalize the endpoint.
    pub fn validated(mut self) -> Result<Self, ConfigError> {
        if self.cache_url.is_empty() {
            return Err(ConfigError::Missing(CACHE_URL_VAR));
        }
        if self.cache_token.is_empty() {
            return Err(ConfigError::Missing(CACHE_TOKEN_VAR));
        }
        if !(self.cache_url.starts_with("https://") || self.cache_url.starts_with("http://")) {
            return Err(ConfigError::Invalid {
                name: CACHE_URL_VAR,
                reason: format!("expected an http(s) URL, got {}", self.cache_url),
            });
        }
        if self.firestore_project.contains('/') {
            return Err(ConfigError::Invalid {
                name: FIRESTORE_PROJECT_VAR,
                reason: "project id must not contain '/'".to_string(),
            });
        }

        self.cache_url = self.cache_url.trim_end_matches('/').to_string();
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_variables_required_only() {
        let config = ProxyConfig::from_variables([
            (CACHE_URL_VAR, "https://eu1-cache.upstash.io/"),
            (CACHE_TOKEN_VAR, "secret"),
        ])
        .unwrap();

        assert_eq!(config.cache_url, "https://eu1-cache.upstash.io");
        assert_eq!(config.cache_token, "secret");
        assert_eq!(config.firestore_project, DEFAULT_FIRESTORE_PROJECT);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.log_format, "json");
    }

    #[test]
    fn test_from_variables_overrides() {
        let config = ProxyConfig::from_variables([
            (CACHE_URL_VAR, "https://cache.example"),
            (CACHE_TOKEN_VAR, "t"),
            (FIRESTORE_PROJECT_VAR, "other-project"),
            (LOG_LEVEL_VAR, "debug"),
            (LOG_FORMAT_VAR, "human"),
            ("unrelated", "ignored"),
        ])
        .unwrap();

        assert_eq!(config.firestore_project, "other-project");
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.log_format, "human");
    }

    #[test]
    fn test_missing_url() {
        let err = ProxyConfig::from_variables([(CACHE_TOKEN_VAR, "t")]).unwrap_err();
        assert_eq!(err, ConfigError::Missing(CACHE_URL_VAR));
    }

    #[test]
    fn test_missing_token() {
        let err =
            ProxyConfig::from_variables([(CACHE_URL_VAR, "https://cache.example")]).unwrap_err();
        assert_eq!(err, ConfigError::Missing(CACHE_TOKEN_VAR));
    }

    #[test]
    fn test_blank_value_counts_as_missing() {
        let err = ProxyConfig::from_variables([
            (CACHE_URL_VAR, "https://cache.example"),
            (CACHE_TOKEN_VAR, "   "),
        ])
        .unwrap_err();
        assert_eq!(err, ConfigError::Missing(CACHE_TOKEN_VAR));
    }

    #[test]
    fn test_invalid_scheme() {
        let err = ProxyConfig::from_variables([
            (CACHE_URL_VAR, "redis://cache.example"),
            (CACHE_TOKEN_VAR, "t"),
        ])
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name, .. } if name == CACHE_URL_VAR));
    }

    #[test]
    fn test_invalid_project() {
        let err = ProxyConfig::new("https://cache.example", "t")
            .with_firestore_project("a/b")
            .validated()
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name, .. } if name == FIRESTORE_PROJECT_VAR));
    }
}
