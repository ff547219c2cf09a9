//! HTTP transport configuration.

use serde::{Deserialize, Serialize};

use crate::core::config::parse_optional;
use crate::core::error::Result;

/// HTTP transport configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Port number to listen on.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Host address to bind to.
    #[serde(default = "default_host")]
    pub host: String,

    /// Enable CORS for browser clients.
    #[serde(default = "default_cors")]
    pub enable_cors: bool,
}

fn default_port() -> u16 {
    8080
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_cors() -> bool {
    true
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
            enable_cors: default_cors(),
        }
    }
}

impl HttpConfig {
    /// Load transport config from `PORT`, `HOST` and `CORS_ENABLED`.
    pub fn from_lookup<F>(lookup: &F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = parse_optional(lookup, "PORT")?.unwrap_or_else(default_port);
        let host = lookup("HOST").unwrap_or_else(default_host);
        let enable_cors = lookup("CORS_ENABLED")
            .map(|v| v.to_lowercase() != "false" && v != "0")
            .unwrap_or_else(default_cors);

        Ok(Self {
            port,
            host,
            enable_cors,
        })
    }

    /// Bind address in `host:port` form.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get a description of this transport for logging.
    pub fn description(&self) -> String {
        format!("HTTP on {}", self.address())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_lookup_defaults() {
        let config = HttpConfig::from_lookup(&|_: &str| None).unwrap();
        assert_eq!(config.address(), "0.0.0.0:8080");
        assert!(config.enable_cors);
    }

    #[test]
    fn test_from_lookup_overrides() {
        let lookup = |key: &str| match key {
            "PORT" => Some("9100".to_string()),
            "HOST" => Some("127.0.0.1".to_string()),
            "CORS_ENABLED" => Some("false".to_string()),
            _ => None,
        };
        let config = HttpConfig::from_lookup(&lookup).unwrap();
        assert_eq!(config.address(), "127.0.0.1:9100");
        assert!(!config.enable_cors);
    }

    #[test]
    fn test_invalid_port() {
        let lookup = |key: &str| (key == "PORT").then(|| "eighty".to_string());
        let err = HttpConfig::from_lookup(&lookup).unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }
}
