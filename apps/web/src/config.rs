use anyhow::{Context, Result};

pub const DEFAULT_API_BASE_URL: &str = "/api";
pub const DEFAULT_PROXY_TARGET: &str = "https://dsg-api-test.k2-app.com";
pub const DEFAULT_PROXY_PATH: &str = "/ats/search/all";

/// Application configuration loaded from environment variables.
/// Every option has a default; only a malformed `PORT` fails startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Prefix for every job search request, e.g. `/api` or `https://host/search`.
    pub api_base_url: String,
    /// Origin used to resolve a relative `api_base_url`.
    pub app_origin: String,
    /// Upstream host the `/api` proxy forwards to.
    pub proxy_target: String,
    /// Path on the upstream host that replaces the `/api` prefix.
    pub proxy_path: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let port = get("PORT")
            .unwrap_or_else(|| "8080".to_string())
            .parse::<u16>()
            .context("PORT must be a valid port number")?;

        Ok(Config {
            api_base_url: get("API_BASE_URL").unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
            app_origin: get("APP_ORIGIN").unwrap_or_else(|| format!("http://127.0.0.1:{port}")),
            proxy_target: get("PROXY_TARGET").unwrap_or_else(|| DEFAULT_PROXY_TARGET.to_string()),
            proxy_path: get("PROXY_PATH").unwrap_or_else(|| DEFAULT_PROXY_PATH.to_string()),
            port,
            rust_log: get("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_nothing_set() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.api_base_url, "/api");
        assert_eq!(config.port, 8080);
        assert_eq!(config.app_origin, "http://127.0.0.1:8080");
        assert_eq!(config.proxy_target, DEFAULT_PROXY_TARGET);
        assert_eq!(config.proxy_path, DEFAULT_PROXY_PATH);
        assert_eq!(config.rust_log, "info");
    }

    #[test]
    fn test_empty_base_url_falls_back_to_default() {
        let config = config_from(&[("API_BASE_URL", "")]).unwrap();
        assert_eq!(config.api_base_url, "/api");
    }

    #[test]
    fn test_overrides_are_used() {
        let config = config_from(&[
            ("API_BASE_URL", "https://jobs.example.com/search"),
            ("PORT", "3000"),
        ])
        .unwrap();
        assert_eq!(config.api_base_url, "https://jobs.example.com/search");
        assert_eq!(config.port, 3000);
        assert_eq!(config.app_origin, "http://127.0.0.1:3000");
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let err = config_from(&[("PORT", "not-a-port")]).unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }
}
