//! Adapter configuration: listen address and the middleware applied to every route
//!
//! Read from the environment (an optional `.env` file is loaded first):
//!   PORT                     listen port (default 5000)
//!   WACC_BIND_ADDR           listen host (default 0.0.0.0)
//!   WACC_CORS_ALLOW_ORIGINS  `*` for an open policy, else comma-separated origins
//!   WACC_SECURITY_HEADERS    `standard` or `off`

use anyhow::{bail, Context};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

pub const DEFAULT_PORT: u16 = 5000;

/// Cross-origin policy applied uniformly at the router boundary
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsPolicy {
    /// Any origin may call the API
    Open,
    /// Only the listed origins
    AllowList(Vec<String>),
}

impl CorsPolicy {
    fn parse(raw: &str) -> Self {
        let origins: Vec<String> = raw
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        if origins.is_empty() || origins.iter().any(|o| o == "*") {
            CorsPolicy::Open
        } else {
            CorsPolicy::AllowList(origins)
        }
    }

    /// Value for `Access-Control-Allow-Origin` given the request's `Origin`
    pub fn allow_origin_for(&self, request_origin: Option<&str>) -> Option<String> {
        match self {
            CorsPolicy::Open => Some("*".to_string()),
            CorsPolicy::AllowList(origins) => request_origin
                .filter(|origin| origins.iter().any(|o| o == origin))
                .map(str::to_string),
        }
    }
}

/// Response hardening headers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecurityHeaders {
    StandardHardening,
    Disabled,
}

impl SecurityHeaders {
    fn parse(raw: &str) -> anyhow::Result<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "standard" | "on" | "true" => Ok(SecurityHeaders::StandardHardening),
            "off" | "none" | "false" => Ok(SecurityHeaders::Disabled),
            other => bail!("Unknown WACC_SECURITY_HEADERS value: {}", other),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdapterConfig {
    pub listen_addr: SocketAddr,
    pub cors: CorsPolicy,
    pub security_headers: SecurityHeaders,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), DEFAULT_PORT),
            cors: CorsPolicy::Open,
            security_headers: SecurityHeaders::StandardHardening,
        }
    }
}

impl AdapterConfig {
    /// Load from the process environment
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup; unset keys take their defaults
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .with_context(|| format!("Invalid PORT: {}", raw))?,
            None => DEFAULT_PORT,
        };

        let host = match lookup("WACC_BIND_ADDR") {
            Some(raw) => raw
                .trim()
                .parse::<IpAddr>()
                .with_context(|| format!("Invalid WACC_BIND_ADDR: {}", raw))?,
            None => defaults.listen_addr.ip(),
        };

        let cors = lookup("WACC_CORS_ALLOW_ORIGINS")
            .map(|raw| CorsPolicy::parse(&raw))
            .unwrap_or(defaults.cors);

        let security_headers = match lookup("WACC_SECURITY_HEADERS") {
            Some(raw) => SecurityHeaders::parse(&raw)?,
            None => defaults.security_headers,
        };

        Ok(Self {
            listen_addr: SocketAddr::new(host, port),
            cors,
            security_headers,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AdapterConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, AdapterConfig::default());
        assert_eq!(config.listen_addr.port(), 5000);
        assert_eq!(config.cors, CorsPolicy::Open);
        assert_eq!(config.security_headers, SecurityHeaders::StandardHardening);
    }

    #[test]
    fn test_overrides() {
        let config = AdapterConfig::from_lookup(lookup_from(&[
            ("PORT", "8080"),
            ("WACC_BIND_ADDR", "127.0.0.1"),
            ("WACC_CORS_ALLOW_ORIGINS", "https://a.example, https://b.example,"),
            ("WACC_SECURITY_HEADERS", "off"),
        ]))
        .unwrap();

        assert_eq!(config.listen_addr, "127.0.0.1:8080".parse().unwrap());
        assert_eq!(
            config.cors,
            CorsPolicy::AllowList(vec!["https://a.example".into(), "https://b.example".into()])
        );
        assert_eq!(config.security_headers, SecurityHeaders::Disabled);
    }

    #[test]
    fn test_wildcard_anywhere_is_open() {
        let config =
            AdapterConfig::from_lookup(lookup_from(&[("WACC_CORS_ALLOW_ORIGINS", "https://a.example,*")]))
                .unwrap();
        assert_eq!(config.cors, CorsPolicy::Open);
    }

    #[test]
    fn test_invalid_values_fail() {
        assert!(AdapterConfig::from_lookup(lookup_from(&[("PORT", "http")])).is_err());
        assert!(AdapterConfig::from_lookup(lookup_from(&[("PORT", "70000")])).is_err());
        assert!(AdapterConfig::from_lookup(lookup_from(&[("WACC_BIND_ADDR", "localhost")])).is_err());
        assert!(AdapterConfig::from_lookup(lookup_from(&[("WACC_SECURITY_HEADERS", "max")])).is_err());
    }

    #[test]
    fn test_allow_origin_for() {
        assert_eq!(CorsPolicy::Open.allow_origin_for(None), Some("*".to_string()));

        let policy = CorsPolicy::AllowList(vec!["https://a.example".into()]);
        assert_eq!(
            policy.allow_origin_for(Some("https://a.example")),
            Some("https://a.example".to_string())
        );
        assert_eq!(policy.allow_origin_for(Some("https://evil.example")), None);
        assert_eq!(policy.allow_origin_for(None), None);
    }
}
