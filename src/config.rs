use anyhow::{Context, Result};
use std::time::Duration;

pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Settings for the narrative-generation service.
#[derive(Debug, Clone)]
pub struct InsightConfig {
    /// `None` leaves the service unconfigured; insights then always fall back.
    pub api_key: Option<String>,
    pub model: String,
    /// Base URL, without the `/models/...` suffix.
    pub endpoint: String,
    pub timeout: Duration,
}

impl Default for InsightConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl InsightConfig {
    /// Read configuration from the environment.
    ///
    ///   API_KEY (or GEMINI_API_KEY)   service credential
    ///   AGECOMPUTE_MODEL              model name
    ///   AGECOMPUTE_ENDPOINT           API base URL
    ///   AGECOMPUTE_TIMEOUT_SECS       request timeout in seconds
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let api_key = non_blank("API_KEY").or_else(|| non_blank("GEMINI_API_KEY"));

        let timeout = match lookup("AGECOMPUTE_TIMEOUT_SECS") {
            Some(raw) => {
                let secs = raw
                    .trim()
                    .parse::<u64>()
                    .with_context(|| format!("AGECOMPUTE_TIMEOUT_SECS is not a number: {raw:?}"))?;
                Duration::from_secs(secs)
            }
            None => defaults.timeout,
        };

        Ok(Self {
            api_key,
            model: lookup("AGECOMPUTE_MODEL").unwrap_or(defaults.model),
            endpoint: lookup("AGECOMPUTE_ENDPOINT")
                .map(|e| e.trim_end_matches('/').to_string())
                .unwrap_or(defaults.endpoint),
            timeout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_set() {
        let config = InsightConfig::from_lookup(lookup_from(&[])).unwrap();
        assert!(config.api_key.is_none());
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn reads_overrides() {
        let config = InsightConfig::from_lookup(lookup_from(&[
            ("GEMINI_API_KEY", "secret"),
            ("AGECOMPUTE_MODEL", "gemini-2.5-flash"),
            ("AGECOMPUTE_ENDPOINT", "http://localhost:8080/v1/"),
            ("AGECOMPUTE_TIMEOUT_SECS", "3"),
        ]))
        .unwrap();

        assert_eq!(config.api_key.as_deref(), Some("secret"));
        assert_eq!(config.model, "gemini-2.5-flash");
        assert_eq!(config.endpoint, "http://localhost:8080/v1");
        assert_eq!(config.timeout, Duration::from_secs(3));
    }

    #[test]
    fn api_key_takes_precedence_and_blank_is_unset() {
        let config =
            InsightConfig::from_lookup(lookup_from(&[("API_KEY", "a"), ("GEMINI_API_KEY", "b")]))
                .unwrap();
        assert_eq!(config.api_key.as_deref(), Some("a"));

        let config = InsightConfig::from_lookup(lookup_from(&[("API_KEY", "  ")])).unwrap();
        assert!(config.api_key.is_none());
    }

    #[test]
    fn blank_api_key_defers_to_gemini_key() {
        let config = InsightConfig::from_lookup(lookup_from(&[
            ("API_KEY", ""),
            ("GEMINI_API_KEY", "from-gemini"),
        ]))
        .unwrap();
        assert_eq!(config.api_key.as_deref(), Some("from-gemini"));
    }

    #[test]
    fn rejects_bad_timeout() {
        let err = InsightConfig::from_lookup(lookup_from(&[("AGECOMPUTE_TIMEOUT_SECS", "soon")]))
            .unwrap_err();
        assert!(err.to_string().contains("AGECOMPUTE_TIMEOUT_SECS"));
    }
}
