//! Common error types for the box-office service

use thiserror::Error;

/// Common result type for configuration and startup operations
pub type Result<T> = std::result::Result<T, Error>;

/// Startup and configuration errors
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML config file could not be parsed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Errors produced while fetching or reading the upstream payload.
///
/// These are the only failures the pipeline reports. Query and formatting
/// steps are total and never produce an error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Provider rejected the configured credential
    #[error("Upstream rejected credentials (HTTP {0})")]
    Unauthorized(u16),

    /// Provider unreachable or answered with a non-success status
    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    /// No complete answer within the configured timeout
    #[error("Upstream request timed out after {0} ms")]
    Timeout(u64),

    /// Payload is not JSON or not a list of entries
    #[error("Upstream payload malformed: {0}")]
    UpstreamMalformed(String),
}

impl FetchError {
    /// Stable machine-readable name of the error kind
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Unauthorized(_) => "unauthorized",
            FetchError::UpstreamUnavailable(_) => "upstream_unavailable",
            FetchError::Timeout(_) => "timeout",
            FetchError::UpstreamMalformed(_) => "upstream_malformed",
        }
    }
}
