//! Runtime configuration.
//!
//! Read from `STOP_BOARD_*` environment variables; anything unset falls
//! back to a default suitable for running next to a local transit API.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::api::{ApiConfig, CacheConfig};

/// Default static asset directory.
const DEFAULT_STATIC_DIR: &str = "static";

/// Errors from reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {key}={value}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Configuration for the departure board server.
#[derive(Debug, Clone)]
pub struct BoardConfig {
    /// Transit API client settings
    pub api: ApiConfig,
    /// Departure lookup cache settings
    pub cache: CacheConfig,
    /// Address to serve the widget on
    pub listen: SocketAddr,
    /// Directory served under `/static`
    pub static_dir: PathBuf,
    /// JSON stop catalogue for the search control
    pub stops_file: Option<PathBuf>,
    /// Serve built-in demo data instead of calling the transit API
    pub demo: bool,
}

impl BoardConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`, which maps a variable name to
    /// its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(url) = lookup("STOP_BOARD_API_URL") {
            config.api = config.api.with_base_url(url);
        }

        if let Some(secs) = lookup("STOP_BOARD_TIMEOUT_SECS") {
            let secs = parse_secs("STOP_BOARD_TIMEOUT_SECS", &secs)?;
            config.api = config.api.with_timeout(Duration::from_secs(secs));
        }

        if let Some(secs) = lookup("STOP_BOARD_CACHE_TTL_SECS") {
            config.cache.ttl = Duration::from_secs(parse_secs("STOP_BOARD_CACHE_TTL_SECS", &secs)?);
        }

        if let Some(addr) = lookup("STOP_BOARD_LISTEN") {
            config.listen = addr.parse().map_err(|e: std::net::AddrParseError| {
                ConfigError::Invalid {
                    key: "STOP_BOARD_LISTEN",
                    value: addr.clone(),
                    reason: e.to_string(),
                }
            })?;
        }

        if let Some(dir) = lookup("STOP_BOARD_STATIC_DIR") {
            config.static_dir = PathBuf::from(dir);
        }

        config.stops_file = lookup("STOP_BOARD_STOPS_FILE")
            .filter(|p| !p.is_empty())
            .map(PathBuf::from);

        if let Some(flag) = lookup("STOP_BOARD_DEMO") {
            config.demo = parse_flag("STOP_BOARD_DEMO", &flag)?;
        }

        Ok(config)
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            cache: CacheConfig::default(),
            listen: SocketAddr::from(([127, 0, 0, 1], 3000)),
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
            stops_file: None,
            demo: false,
        }
    }
}

fn parse_secs(key: &'static str, value: &str) -> Result<u64, ConfigError> {
    value.trim().parse().map_err(|e: std::num::ParseIntError| ConfigError::Invalid {
        key,
        value: value.to_string(),
        reason: e.to_string(),
    })
}

fn parse_flag(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "" | "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid {
            key,
            value: value.to_string(),
            reason: "expected a boolean".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn from_vars(vars: &[(&str, &str)]) -> Result<BoardConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        BoardConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let config = from_vars(&[]).unwrap();

        assert_eq!(config.api.base_url, "http://127.0.0.1:5000");
        assert_eq!(config.api.timeout, None);
        assert_eq!(config.cache.ttl, Duration::from_secs(10));
        assert_eq!(config.listen.to_string(), "127.0.0.1:3000");
        assert_eq!(config.static_dir, PathBuf::from("static"));
        assert!(config.stops_file.is_none());
        assert!(!config.demo);
    }

    #[test]
    fn overrides() {
        let config = from_vars(&[
            ("STOP_BOARD_API_URL", "http://transit.local:8080"),
            ("STOP_BOARD_TIMEOUT_SECS", "15"),
            ("STOP_BOARD_CACHE_TTL_SECS", "0"),
            ("STOP_BOARD_LISTEN", "0.0.0.0:8000"),
            ("STOP_BOARD_STATIC_DIR", "/srv/board"),
            ("STOP_BOARD_STOPS_FILE", "stops.json"),
            ("STOP_BOARD_DEMO", "yes"),
        ])
        .unwrap();

        assert_eq!(config.api.base_url, "http://transit.local:8080");
        assert_eq!(config.api.timeout, Some(Duration::from_secs(15)));
        assert!(!config.cache.is_enabled());
        assert_eq!(config.listen.port(), 8000);
        assert_eq!(config.static_dir, PathBuf::from("/srv/board"));
        assert_eq!(config.stops_file, Some(PathBuf::from("stops.json")));
        assert!(config.demo);
    }

    #[test]
    fn invalid_values_are_reported() {
        let err = from_vars(&[("STOP_BOARD_TIMEOUT_SECS", "soon")]).unwrap_err();
        assert!(err.to_string().starts_with("invalid STOP_BOARD_TIMEOUT_SECS=soon"));

        let err = from_vars(&[("STOP_BOARD_LISTEN", "localhost")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "STOP_BOARD_LISTEN", .. }));

        let err = from_vars(&[("STOP_BOARD_DEMO", "maybe")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "STOP_BOARD_DEMO", .. }));
    }

    #[test]
    fn blank_stops_file_is_unset() {
        let config = from_vars(&[("STOP_BOARD_STOPS_FILE", "")]).unwrap();
        assert!(config.stops_file.is_none());
    }
}
