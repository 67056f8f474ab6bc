//! HTTP client configuration
//!
//! Loaded from TOML, where durations are always strings:
//!
//! ```toml
//! timeout = "30s"
//! connect_timeout = "5s"
//! insecure_skip_verify = false
//! max_conns_per_host = 8
//! ```
//!
//! ## Priority Order (highest to lowest)
//!
//! 1. CLI flags (applied by the caller)
//! 2. Environment variables (`FUNKS_HTTP_TIMEOUT`, `FUNKS_HTTP_INSECURE`,
//!    `FUNKS_HTTP_MAX_CONNS_PER_HOST`)
//! 3. Config file
//! 4. Defaults

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::duration::Duration;
use crate::error::{FunksError, Result};
use crate::http::HttpClient;

pub const ENV_TIMEOUT: &str = "FUNKS_HTTP_TIMEOUT";
pub const ENV_INSECURE: &str = "FUNKS_HTTP_INSECURE";
pub const ENV_MAX_CONNS_PER_HOST: &str = "FUNKS_HTTP_MAX_CONNS_PER_HOST";

/// Default request timeout (30 seconds)
const DEFAULT_TIMEOUT: Duration = Duration::from_nanos(30_000_000_000);

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ClientConfig {
    /// Whole-request timeout (zero disables it)
    #[serde(with = "crate::duration::text")]
    pub timeout: Duration,

    /// TCP connect timeout
    #[serde(
        with = "crate::duration::text::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub connect_timeout: Option<Duration>,

    /// Accept invalid TLS certificates
    pub insecure_skip_verify: bool,

    /// In-flight requests allowed per host (0 = unlimited)
    pub max_conns_per_host: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            connect_timeout: None,
            insecure_skip_verify: false,
            max_conns_per_host: 0,
        }
    }
}

impl ClientConfig {
    /// Parse a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        debug!(path = %path.display(), "loading client config");
        Self::from_toml_str(&content)
    }

    /// Serialize to TOML
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| FunksError::Config {
            reason: format!("Failed to serialize config: {}", e),
        })
    }

    /// Merge with environment variables
    ///
    /// Environment variables take precedence over file values. Variables
    /// that are set but empty are ignored.
    pub fn with_env(mut self) -> Result<Self> {
        if let Some(value) = env_value(ENV_TIMEOUT) {
            self.timeout = Duration::parse(&value).map_err(|e| FunksError::Config {
                reason: format!("{}: {}", ENV_TIMEOUT, e),
            })?;
        }

        if let Some(value) = env_value(ENV_INSECURE) {
            self.insecure_skip_verify = parse_bool(&value).ok_or_else(|| FunksError::Config {
                reason: format!("{}: expected true/false, got '{}'", ENV_INSECURE, value),
            })?;
        }

        if let Some(value) = env_value(ENV_MAX_CONNS_PER_HOST) {
            self.max_conns_per_host = value.parse().map_err(|_| FunksError::Config {
                reason: format!(
                    "{}: expected a non-negative integer, got '{}'",
                    ENV_MAX_CONNS_PER_HOST, value
                ),
            })?;
        }

        Ok(self)
    }

    /// Build an HTTP client with these settings
    pub fn build_client(&self) -> Result<HttpClient> {
        HttpClient::from_config(self)
    }
}

fn env_value(name: &str) -> Option<String> {
    let value = std::env::var(name).ok()?;
    let value = value.trim();
    if value.is_empty() {
        warn!(name, "environment variable is empty, ignoring");
        return None;
    }
    debug!(name, value, "config override from environment");
    Some(value.to_string())
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serial_test::serial;
    use std::env;
    use tempfile::TempDir;

    fn clear_env() {
        env::remove_var(ENV_TIMEOUT);
        env::remove_var(ENV_INSECURE);
        env::remove_var(ENV_MAX_CONNS_PER_HOST);
    }

    #[test]
    fn defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.timeout.to_string(), "30s");
        assert_eq!(config.connect_timeout, None);
        assert!(!config.insecure_skip_verify);
        assert_eq!(config.max_conns_per_host, 0);
    }

    #[test]
    fn empty_document_gives_defaults() {
        assert_eq!(ClientConfig::from_toml_str("").unwrap(), ClientConfig::default());
    }

    #[test]
    fn parse_full_document() {
        let config = ClientConfig::from_toml_str(
            r#"
timeout = "1m30s"
connect_timeout = "500ms"
insecure_skip_verify = true
max_conns_per_host = 8
"#,
        )
        .unwrap();

        assert_eq!(
            config,
            ClientConfig {
                timeout: Duration::from_nanos(90_000_000_000),
                connect_timeout: Some(Duration::from_nanos(500_000_000)),
                insecure_skip_verify: true,
                max_conns_per_host: 8,
            }
        );
    }

    #[test]
    fn numeric_timeout_is_rejected() {
        let err = ClientConfig::from_toml_str("timeout = 30").unwrap_err();
        assert!(matches!(err, FunksError::TomlParse(_)));
    }

    #[test]
    fn invalid_timeout_reports_parse_error() {
        let err = ClientConfig::from_toml_str("timeout = \"30\"").unwrap_err();
        assert!(err.to_string().contains("missing unit"), "{err}");
    }

    #[test]
    fn toml_roundtrip() {
        let config = ClientConfig {
            timeout: Duration::from_nanos(2_500_000_000),
            connect_timeout: Some(Duration::SECOND),
            insecure_skip_verify: true,
            max_conns_per_host: 2,
        };
        let text = config.to_toml_string().unwrap();
        assert!(text.contains("timeout = \"2.5s\""), "{text}");
        assert_eq!(ClientConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("client.toml");
        fs::write(&path, "timeout = \"10s\"\nmax_conns_per_host = 1\n").unwrap();

        let config = ClientConfig::load(&path).unwrap();
        assert_eq!(config.timeout, Duration::from_nanos(10_000_000_000));
        assert_eq!(config.max_conns_per_host, 1);
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let err = ClientConfig::load(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, FunksError::Io(_)));
    }

    #[test]
    #[serial]
    fn env_overrides_file_values() {
        clear_env();
        env::set_var(ENV_TIMEOUT, "2s");
        env::set_var(ENV_INSECURE, "true");
        env::set_var(ENV_MAX_CONNS_PER_HOST, "3");

        let config = ClientConfig::default().with_env().unwrap();
        clear_env();

        assert_eq!(config.timeout, Duration::from_nanos(2_000_000_000));
        assert!(config.insecure_skip_verify);
        assert_eq!(config.max_conns_per_host, 3);
    }

    #[test]
    #[serial]
    fn empty_env_is_ignored() {
        clear_env();
        env::set_var(ENV_TIMEOUT, "");

        let config = ClientConfig::default().with_env().unwrap();
        clear_env();

        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    #[serial]
    fn malformed_env_is_config_error() {
        clear_env();
        env::set_var(ENV_TIMEOUT, "soon");
        let err = ClientConfig::default().with_env().unwrap_err();
        clear_env();
        assert!(matches!(err, FunksError::Config { .. }));
        assert!(err.to_string().contains(ENV_TIMEOUT));

        env::set_var(ENV_MAX_CONNS_PER_HOST, "-1");
        let err = ClientConfig::default().with_env().unwrap_err();
        clear_env();
        assert!(matches!(err, FunksError::Config { .. }));
    }

    #[test]
    fn parse_bool_variants() {
        assert_eq!(parse_bool("TRUE"), Some(true));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }
}
