//! Configuration loading
//!
//! Each setting is resolved in priority order:
//! 1. Command-line argument / environment variable (collected by the binary)
//! 2. TOML config file
//! 3. Compiled default
//!
//! The upstream API key has no default. A missing key is a startup error.

use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::{Error, Result};

pub const DEFAULT_UPSTREAM_URL: &str = "https://imdb236.p.rapidapi.com/imdb/top-box-office";
pub const DEFAULT_UPSTREAM_HOST: &str = "imdb236.p.rapidapi.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;
pub const DEFAULT_BIND: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8000;

/// Environment variable naming an explicit config file
pub const CONFIG_PATH_ENV: &str = "BOXOFFICE_CONFIG";

/// Contents of `config.toml`. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    pub api_key: Option<String>,
    pub upstream_url: Option<String>,
    pub upstream_host: Option<String>,
    pub timeout_secs: Option<u64>,
    pub bind: Option<String>,
    pub port: Option<u16>,
}

impl TomlConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

/// Values supplied on the command line or through the environment
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub api_key: Option<String>,
    pub upstream_url: Option<String>,
    pub upstream_host: Option<String>,
    pub timeout_secs: Option<u64>,
    pub bind: Option<String>,
    pub port: Option<u16>,
}

/// Settings for the upstream provider client
#[derive(Clone, PartialEq, Eq)]
pub struct UpstreamConfig {
    pub base_url: String,
    /// Sent as `x-rapidapi-host`
    pub host: String,
    /// Sent as `x-rapidapi-key`
    pub api_key: String,
    pub timeout: Duration,
}

// Keeps the credential out of logs.
impl fmt::Debug for UpstreamConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpstreamConfig")
            .field("base_url", &self.base_url)
            .field("host", &self.host)
            .field("api_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Fully resolved service configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub bind: String,
    pub port: u16,
    pub upstream: UpstreamConfig,
}

impl ServiceConfig {
    /// Merge overrides, file values and defaults
    pub fn resolve(overrides: ConfigOverrides, file: TomlConfig) -> Result<Self> {
        let api_key = overrides
            .api_key
            .or(file.api_key)
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .ok_or_else(|| {
                Error::Config(
                    "upstream API key not set (use --api-key, RAPID_API_KEY or api_key in config.toml)"
                        .to_string(),
                )
            })?;

        let timeout_secs = overrides
            .timeout_secs
            .or(file.timeout_secs)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        if timeout_secs == 0 {
            return Err(Error::Config("timeout_secs must be greater than zero".to_string()));
        }

        let base_url = overrides
            .upstream_url
            .or(file.upstream_url)
            .unwrap_or_else(|| DEFAULT_UPSTREAM_URL.to_string());
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(Error::Config(format!(
                "upstream_url must be an http(s) URL: {}",
                base_url
            )));
        }

        Ok(Self {
            bind: overrides
                .bind
                .or(file.bind)
                .unwrap_or_else(|| DEFAULT_BIND.to_string()),
            port: overrides.port.or(file.port).unwrap_or(DEFAULT_PORT),
            upstream: UpstreamConfig {
                base_url,
                host: overrides
                    .upstream_host
                    .or(file.upstream_host)
                    .unwrap_or_else(|| DEFAULT_UPSTREAM_HOST.to_string()),
                api_key,
                timeout: Duration::from_secs(timeout_secs),
            },
        })
    }
}

/// Locate the config file.
///
/// Priority: explicit path, then `BOXOFFICE_CONFIG`, then
/// `<config_dir>/boxoffice/config.toml`.
pub fn resolve_config_path(cli_arg: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = cli_arg {
        return Some(path.to_path_buf());
    }

    if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
        if !path.trim().is_empty() {
            return Some(PathBuf::from(path));
        }
    }

    dirs::config_dir().map(|d| d.join("boxoffice").join("config.toml"))
}

/// Load the TOML config file.
///
/// An explicitly named file must exist. The implicit default location may be
/// missing, in which case an empty config is returned.
pub fn load_toml_config(cli_arg: Option<&Path>) -> Result<TomlConfig> {
    let explicit = cli_arg.is_some()
        || std::env::var(CONFIG_PATH_ENV).is_ok_and(|p| !p.trim().is_empty());

    let Some(path) = resolve_config_path(cli_arg) else {
        tracing::debug!("No config directory on this platform, using defaults");
        return Ok(TomlConfig::default());
    };

    if !path.exists() {
        if explicit {
            return Err(Error::Config(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        tracing::debug!("No config file at {}, using defaults", path.display());
        return Ok(TomlConfig::default());
    }

    let content = std::fs::read_to_string(&path)?;
    let config = TomlConfig::from_toml_str(&content)?;
    tracing::info!("Loaded config file {}", path.display());
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_key() -> ConfigOverrides {
        ConfigOverrides {
            api_key: Some("secret".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_defaults_applied() {
        let config = ServiceConfig::resolve(with_key(), TomlConfig::default()).unwrap();
        assert_eq!(config.bind, DEFAULT_BIND);
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.upstream.base_url, DEFAULT_UPSTREAM_URL);
        assert_eq!(config.upstream.host, DEFAULT_UPSTREAM_HOST);
        assert_eq!(config.upstream.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn test_missing_api_key_is_config_error() {
        let result = ServiceConfig::resolve(ConfigOverrides::default(), TomlConfig::default());
        assert!(matches!(result, Err(Error::Config(_))));

        let blank = ConfigOverrides {
            api_key: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(ServiceConfig::resolve(blank, TomlConfig::default()).is_err());
    }

    #[test]
    fn test_overrides_beat_file() {
        let file = TomlConfig {
            api_key: Some("from-file".to_string()),
            port: Some(9000),
            timeout_secs: Some(10),
            ..Default::default()
        };
        let overrides = ConfigOverrides {
            port: Some(9100),
            ..with_key()
        };

        let config = ServiceConfig::resolve(overrides, file).unwrap();
        assert_eq!(config.upstream.api_key, "secret");
        assert_eq!(config.port, 9100);
        assert_eq!(config.upstream.timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let overrides = ConfigOverrides {
            timeout_secs: Some(0),
            ..with_key()
        };
        assert!(ServiceConfig::resolve(overrides, TomlConfig::default()).is_err());
    }

    #[test]
    fn test_non_http_url_rejected() {
        let overrides = ConfigOverrides {
            upstream_url: Some("ftp://example.com".to_string()),
            ..with_key()
        };
        assert!(ServiceConfig::resolve(overrides, TomlConfig::default()).is_err());
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = ServiceConfig::resolve(with_key(), TomlConfig::default()).unwrap();
        let debug = format!("{:?}", config);
        assert!(!debug.contains("secret"));
        assert!(debug.contains("<redacted>"));
    }
}
