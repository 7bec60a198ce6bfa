use anyhow::{Context, Result};
use std::env;
use std::time::Duration;

pub const DEFAULT_NEWS_API_URL: &str = "https://newsapi.org/v2";
pub const DEFAULT_LOG_FILTER: &str = "news_picker=info,tower_http=debug,axum::rejection=info";
pub const DEFAULT_SOURCES: [&str; 4] = [
    "the-washington-post",
    "the-new-york-times",
    "cnn",
    "bbc-news",
];
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub news: NewsConfig,
}

/// Settings for the upstream headlines API
#[derive(Clone)]
pub struct NewsConfig {
    pub api_key: String,
    pub base_url: String,
    pub sources: Vec<String>,
    pub timeout: Duration,
}

// Keeps the API key out of startup logs.
impl std::fmt::Debug for NewsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewsConfig")
            .field("api_key", &"***")
            .field("base_url", &self.base_url)
            .field("sources", &self.sources)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from any key lookup, e.g. a map in tests.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            Some(port) => port
                .trim()
                .parse()
                .with_context(|| format!("PORT must be a valid number, got {port:?}"))?,
            None => 8080,
        };

        let timeout_secs = match lookup("NEWS_TIMEOUT_SECS") {
            Some(secs) => secs
                .trim()
                .parse()
                .with_context(|| {
                    format!("NEWS_TIMEOUT_SECS must be a valid number, got {secs:?}")
                })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            news: NewsConfig {
                api_key: lookup("NEWS_API_KEY").unwrap_or_default(),
                base_url: lookup("NEWS_API_URL")
                    .filter(|url| !url.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_NEWS_API_URL.to_string()),
                sources: parse_sources(lookup("NEWS_SOURCES").as_deref()),
                timeout: Duration::from_secs(timeout_secs),
            },
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn server_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

/// Split a comma-separated source list, falling back to the defaults when
/// nothing usable is given.
fn parse_sources(raw: Option<&str>) -> Vec<String> {
    let sources: Vec<String> = raw
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect();

    if sources.is_empty() {
        DEFAULT_SOURCES.iter().map(|s| s.to_string()).collect()
    } else {
        sources
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.bind_address(), "0.0.0.0:8080");
        assert_eq!(config.server_url(), "http://0.0.0.0:8080");
        assert_eq!(config.news.base_url, DEFAULT_NEWS_API_URL);
        assert_eq!(config.news.sources, DEFAULT_SOURCES);
        assert_eq!(config.news.timeout, Duration::from_secs(10));
        assert!(config.news.api_key.is_empty());
    }

    #[test]
    fn test_sources_are_split_and_trimmed() {
        let config = config_from(&[("NEWS_SOURCES", " cnn, bbc-news ,,")]).unwrap();
        assert_eq!(config.news.sources, vec!["cnn", "bbc-news"]);
    }

    #[test]
    fn test_blank_sources_fall_back_to_defaults() {
        let config = config_from(&[("NEWS_SOURCES", " , ")]).unwrap();
        assert_eq!(config.news.sources, DEFAULT_SOURCES);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "3000"),
            ("NEWS_API_KEY", "secret"),
            ("NEWS_API_URL", "http://localhost:9999/v2"),
            ("NEWS_TIMEOUT_SECS", "3"),
        ])
        .unwrap();
        assert_eq!(config.bind_address(), "127.0.0.1:3000");
        assert_eq!(config.news.api_key, "secret");
        assert_eq!(config.news.base_url, "http://localhost:9999/v2");
        assert_eq!(config.news.timeout, Duration::from_secs(3));
    }

    #[test]
    fn test_invalid_port() {
        assert!(config_from(&[("PORT", "eighty")]).is_err());
    }

    #[test]
    fn test_debug_masks_api_key() {
        let config = config_from(&[("NEWS_API_KEY", "super-secret")]).unwrap();
        let printed = format!("{:?}", config);
        assert!(!printed.contains("super-secret"));
    }
}
