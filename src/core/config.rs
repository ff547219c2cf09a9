//! Configuration management for the server.
//!
//! Settings are read once at startup from the process environment (after an
//! optional `.env` file) and stay immutable for the life of the process.

use serde::{Deserialize, Serialize};

use super::error::{Error, Result};
use super::transport::HttpConfig;

/// Default Azure DevOps REST API version.
pub const DEFAULT_API_VERSION: &str = "7.1-preview.3";

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "INFO";

/// Main configuration structure for the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Azure DevOps connection settings.
    pub ado: AdoConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// HTTP transport configuration.
    pub transport: HttpConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: "ado-mcp-server".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Connection settings for the Azure DevOps REST API.
#[derive(Clone, Serialize, Deserialize)]
pub struct AdoConfig {
    /// Organization URL, e.g. `https://dev.azure.com/contoso`.
    pub organization: String,

    /// Project name or id.
    pub project: String,

    /// Personal access token, sent as the basic-auth password.
    #[serde(skip_serializing)]
    pub pat: String,

    /// REST API version pinned in the `Accept` header.
    pub api_version: String,

    /// Cap on retries of rate-limited (429) calls. `None` = no cap.
    pub max_rate_limit_retries: Option<u32>,
}

/// Custom Debug implementation to redact the token from logs.
impl std::fmt::Debug for AdoConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdoConfig")
            .field("organization", &self.organization)
            .field("project", &self.project)
            .field("pat", &"[REDACTED]")
            .field("api_version", &self.api_version)
            .field("max_rate_limit_retries", &self.max_rate_limit_retries)
            .finish()
    }
}

impl AdoConfig {
    /// Create connection settings with the default API version.
    ///
    /// Fails when the organization, project or token is empty.
    pub fn new(
        organization: impl Into<String>,
        project: impl Into<String>,
        pat: impl Into<String>,
    ) -> Result<Self> {
        let config = Self {
            organization: organization.into(),
            project: project.into(),
            pat: pat.into(),
            api_version: DEFAULT_API_VERSION.to_string(),
            max_rate_limit_retries: None,
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("organization", &self.organization),
            ("project", &self.project),
            ("pat", &self.pat),
        ] {
            if value.trim().is_empty() {
                return Err(Error::config(format!("{name} must not be empty")));
            }
        }
        Ok(())
    }

    /// Base URL of project-scoped endpoints: `<organization>/<project>`.
    pub fn base_url(&self) -> String {
        format!(
            "{}/{}",
            self.organization.trim_end_matches('/'),
            self.project
        )
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "INFO", "debug", "trace").
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// A `.env` file in the working directory is read first if present.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// Required: `ADO_ORG`, `ADO_PROJECT`, `ADO_PAT`. Optional:
    /// `ADO_API_VERSION`, `ADO_MAX_RATE_LIMIT_RETRIES`, `LOG_LEVEL`, plus the
    /// transport variables read by [`HttpConfig::from_lookup`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let organization = required(&lookup, "ADO_ORG")?;
        let project = required(&lookup, "ADO_PROJECT")?;
        let pat = required(&lookup, "ADO_PAT")?;

        let mut ado = AdoConfig::new(organization, project, pat)?;
        if let Some(version) = lookup("ADO_API_VERSION") {
            ado.api_version = version;
        }
        ado.max_rate_limit_retries = parse_optional(&lookup, "ADO_MAX_RATE_LIMIT_RETRIES")?;

        let logging = LoggingConfig {
            level: lookup("LOG_LEVEL").unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
        };

        Ok(Self {
            server: ServerConfig::default(),
            ado,
            logging,
            transport: HttpConfig::from_lookup(&lookup)?,
        })
    }
}

/// Read a variable that must be present and non-empty.
fn required<F>(lookup: &F, key: &str) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| Error::config(format!("{key} environment variable is required")))
}

/// Parse an optional variable, failing on values that do not parse.
pub(crate) fn parse_optional<F, T>(lookup: &F, key: &str) -> Result<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| Error::config(format!("{key} has an invalid value: {raw:?}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    const BASE: [(&str, &str); 3] = [
        ("ADO_ORG", "https://dev.azure.com/testorg"),
        ("ADO_PROJECT", "TestProject"),
        ("ADO_PAT", "test-pat-token"),
    ];

    fn with_base(extra: &[(&'static str, &'static str)]) -> Vec<(&'static str, &'static str)> {
        BASE.iter().chain(extra.iter()).copied().collect()
    }

    #[test]
    fn test_missing_org() {
        let err = Config::from_lookup(lookup_from(&[])).unwrap_err();
        assert!(err.to_string().contains("ADO_ORG"));
    }

    #[test]
    fn test_missing_project() {
        let err = Config::from_lookup(lookup_from(&BASE[..1])).unwrap_err();
        assert!(err.to_string().contains("ADO_PROJECT"));
    }

    #[test]
    fn test_missing_pat() {
        let err = Config::from_lookup(lookup_from(&BASE[..2])).unwrap_err();
        assert!(err.to_string().contains("ADO_PAT"));
    }

    #[test]
    fn test_empty_pat_is_missing() {
        let vars = [BASE[0], BASE[1], ("ADO_PAT", "")];
        let err = Config::from_lookup(lookup_from(&vars)).unwrap_err();
        assert!(err.to_string().contains("ADO_PAT"));
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup_from(&BASE)).unwrap();
        assert_eq!(config.ado.organization, "https://dev.azure.com/testorg");
        assert_eq!(config.ado.project, "TestProject");
        assert_eq!(config.ado.pat, "test-pat-token");
        assert_eq!(config.ado.api_version, "7.1-preview.3");
        assert_eq!(config.ado.max_rate_limit_retries, None);
        assert_eq!(config.transport.port, 8080);
        assert_eq!(config.logging.level, "INFO");
    }

    #[test]
    fn test_custom_values() {
        let vars = with_base(&[
            ("ADO_API_VERSION", "7.2-preview.1"),
            ("PORT", "9000"),
            ("LOG_LEVEL", "DEBUG"),
            ("ADO_MAX_RATE_LIMIT_RETRIES", "5"),
        ]);
        let config = Config::from_lookup(lookup_from(&vars)).unwrap();
        assert_eq!(config.ado.api_version, "7.2-preview.1");
        assert_eq!(config.transport.port, 9000);
        assert_eq!(config.logging.level, "DEBUG");
        assert_eq!(config.ado.max_rate_limit_retries, Some(5));
    }

    #[test]
    fn test_invalid_rate_limit_cap() {
        let vars = with_base(&[("ADO_MAX_RATE_LIMIT_RETRIES", "lots")]);
        let err = Config::from_lookup(lookup_from(&vars)).unwrap_err();
        assert!(err.to_string().contains("ADO_MAX_RATE_LIMIT_RETRIES"));
    }

    #[test]
    fn test_ado_config_rejects_empty() {
        assert!(AdoConfig::new("", "p", "t").is_err());
        assert!(AdoConfig::new("https://x", "p", "  ").is_err());
        assert!(AdoConfig::new("https://x", "p", "t").is_ok());
    }

    #[test]
    fn test_base_url_trims_trailing_slash() {
        let config = AdoConfig::new("https://dev.azure.com/org/", "Proj", "t").unwrap();
        assert_eq!(config.base_url(), "https://dev.azure.com/org/Proj");
    }

    #[test]
    fn test_pat_redacted_in_debug() {
        let config = AdoConfig::new("https://x", "p", "super_secret_token").unwrap();
        let debug_str = format!("{:?}", config);
        assert!(debug_str.contains("REDACTED"));
        assert!(!debug_str.contains("super_secret_token"));
    }
}
