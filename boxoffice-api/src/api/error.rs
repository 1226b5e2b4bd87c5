//! Mapping of pipeline errors to HTTP responses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use boxoffice_common::FetchError;
use serde_json::json;

/// Error returned by view handlers
#[derive(Debug)]
pub struct ApiError(pub FetchError);

impl From<FetchError> for ApiError {
    fn from(error: FetchError) -> Self {
        Self(error)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self.0 {
            FetchError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            FetchError::Unauthorized(_)
            | FetchError::UpstreamUnavailable(_)
            | FetchError::UpstreamMalformed(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": self.0.to_string(),
            "kind": self.0.kind(),
        }));

        (self.status(), body).into_response()
    }
}
