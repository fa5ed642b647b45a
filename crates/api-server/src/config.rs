use std::time::Duration;

use anyhow::Context;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_SOCIAL_CARD_API_URL: &str = "http://localhost:5000";
pub const DEFAULT_OG_IMAGE_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 5;
pub const DEFAULT_SITE_DOMAIN: &str = "stocksignal.app";

/// Runtime settings, read from the environment (and `.env` via dotenvy).
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub social_card_api_url: String,
    pub og_image_api_url: String,
    pub upstream_timeout: Duration,
    pub site_domain: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            social_card_api_url: DEFAULT_SOCIAL_CARD_API_URL.to_string(),
            og_image_api_url: DEFAULT_OG_IMAGE_API_URL.to_string(),
            upstream_timeout: Duration::from_secs(DEFAULT_UPSTREAM_TIMEOUT_SECS),
            site_domain: DEFAULT_SITE_DOMAIN.to_string(),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Blank values count as unset.
    ///
    /// `ANALYSIS_API_URL` points both backends at one deployment; the
    /// per-surface variables still win over it.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Self::default();

        let shared = get("ANALYSIS_API_URL");
        let social_card_api_url = get("SOCIAL_CARD_API_URL")
            .or_else(|| shared.clone())
            .unwrap_or(defaults.social_card_api_url);
        let og_image_api_url = get("OG_IMAGE_API_URL")
            .or(shared)
            .unwrap_or(defaults.og_image_api_url);

        let port = match get("PORT") {
            Some(v) => v.parse().with_context(|| format!("Invalid PORT: {v}"))?,
            None => defaults.port,
        };
        let upstream_timeout = match get("UPSTREAM_TIMEOUT_SECS") {
            Some(v) => {
                let secs: u64 = v
                    .parse()
                    .with_context(|| format!("Invalid UPSTREAM_TIMEOUT_SECS: {v}"))?;
                anyhow::ensure!(secs > 0, "UPSTREAM_TIMEOUT_SECS must be positive");
                Duration::from_secs(secs)
            }
            None => defaults.upstream_timeout,
        };

        Ok(Self {
            host: get("HOST").unwrap_or(defaults.host),
            port,
            social_card_api_url,
            og_image_api_url,
            upstream_timeout,
            site_domain: get("SITE_DOMAIN").unwrap_or(defaults.site_domain),
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> anyhow::Result<ServerConfig> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let c = config(&[]).unwrap();
        assert_eq!(c.port, 3000);
        assert_eq!(c.social_card_api_url, "http://localhost:5000");
        assert_eq!(c.og_image_api_url, "http://localhost:8000");
        assert_eq!(c.upstream_timeout, Duration::from_secs(5));
        assert_eq!(c.site_domain, "stocksignal.app");
        assert_eq!(c.bind_addr(), "0.0.0.0:3000");
    }

    #[test]
    fn test_shared_url_applies_to_both_backends() {
        let c = config(&[("ANALYSIS_API_URL", "http://analysis:9000")]).unwrap();
        assert_eq!(c.social_card_api_url, "http://analysis:9000");
        assert_eq!(c.og_image_api_url, "http://analysis:9000");
    }

    #[test]
    fn test_specific_url_beats_shared() {
        let c = config(&[
            ("ANALYSIS_API_URL", "http://analysis:9000"),
            ("OG_IMAGE_API_URL", "http://images:8000"),
        ])
        .unwrap();
        assert_eq!(c.social_card_api_url, "http://analysis:9000");
        assert_eq!(c.og_image_api_url, "http://images:8000");
    }

    #[test]
    fn test_blank_values_fall_back_to_defaults() {
        let c = config(&[("SITE_DOMAIN", "  "), ("PORT", "")]).unwrap();
        assert_eq!(c.site_domain, "stocksignal.app");
        assert_eq!(c.port, 3000);
    }

    #[test]
    fn test_invalid_numbers_are_errors() {
        assert!(config(&[("PORT", "http")]).is_err());
        assert!(config(&[("UPSTREAM_TIMEOUT_SECS", "0")]).is_err());
        assert!(config(&[("UPSTREAM_TIMEOUT_SECS", "soon")]).is_err());
    }
}
