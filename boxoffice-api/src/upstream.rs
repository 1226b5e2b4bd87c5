//! Upstream provider client
//!
//! One GET per call, no retries. Every failure comes back as a `FetchError`;
//! the configured timeout bounds the whole exchange including the body.

use boxoffice_common::config::UpstreamConfig;
use boxoffice_common::normalize::RawPayload;
use boxoffice_common::FetchError;
use reqwest::StatusCode;

const USER_AGENT: &str = concat!("boxoffice-api/", env!("CARGO_PKG_VERSION"));
const API_KEY_HEADER: &str = "x-rapidapi-key";
const API_HOST_HEADER: &str = "x-rapidapi-host";

/// HTTP client for the movie data provider
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    http_client: reqwest::Client,
    config: UpstreamConfig,
}

impl UpstreamClient {
    pub fn new(config: UpstreamConfig) -> boxoffice_common::Result<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                boxoffice_common::Error::Config(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self {
            http_client,
            config,
        })
    }

    /// Fetch the raw movie list.
    ///
    /// `genre` is forwarded as the `genre` query parameter. The provider may
    /// ignore it, so callers still filter locally.
    pub async fn fetch(&self, genre: Option<&str>) -> Result<RawPayload, FetchError> {
        let mut request = self
            .http_client
            .get(&self.config.base_url)
            .header(API_KEY_HEADER, &self.config.api_key)
            .header(API_HOST_HEADER, &self.config.host);

        if let Some(genre) = genre.map(str::trim).filter(|g| !g.is_empty()) {
            request = request.query(&[("genre", genre)]);
        }

        tracing::debug!(url = %self.config.base_url, genre = ?genre, "Querying upstream provider");

        let response = request.send().await.map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(self.status_error(status, &error_text));
        }

        let body = response.bytes().await.map_err(|e| self.transport_error(e))?;

        serde_json::from_slice(&body)
            .map_err(|e| FetchError::UpstreamMalformed(format!("invalid JSON body: {}", e)))
    }

    fn timeout_ms(&self) -> u64 {
        u64::try_from(self.config.timeout.as_millis()).unwrap_or(u64::MAX)
    }

    fn transport_error(&self, error: reqwest::Error) -> FetchError {
        if error.is_timeout() {
            FetchError::Timeout(self.timeout_ms())
        } else {
            FetchError::UpstreamUnavailable(error.to_string())
        }
    }

    fn status_error(&self, status: StatusCode, body: &str) -> FetchError {
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                FetchError::Unauthorized(status.as_u16())
            }
            StatusCode::REQUEST_TIMEOUT => FetchError::Timeout(self.timeout_ms()),
            _ => {
                let detail: String = body.chars().take(200).collect();
                FetchError::UpstreamUnavailable(format!("HTTP {}: {}", status.as_u16(), detail))
            }
        }
    }
}
