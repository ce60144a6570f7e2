// src/api/error.rs
// =============================================================================
// Errors returned by the API client.
//
// Each HTTP failure is classified by status so the user gets a useful hint:
//   401 -> the token is missing or lacks the read_api / repo scope
//   403 -> the token is valid but cannot see this resource
//   404 -> the project or item does not exist (or is private)
// =============================================================================

use reqwest::StatusCode;
use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("unauthorized (HTTP 401) for {url}")]
    Unauthorized { url: String },

    #[error("forbidden (HTTP 403) for {url}")]
    Forbidden { url: String },

    #[error("not found (HTTP 404): {url}")]
    NotFound { url: String },

    #[error("HTTP {status} for {url}")]
    Status { status: u16, url: String },

    #[error("request to {url} failed: {source}")]
    Transport { url: String, source: reqwest::Error },

    #[error("could not decode response from {url}: {source}")]
    Decode { url: String, source: reqwest::Error },

    #[error("invalid API endpoint '{0}'")]
    Endpoint(String),

    #[error("token contains characters that are not allowed in an HTTP header")]
    InvalidToken,

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

impl ApiError {
    /// Classifies a non-success status code.
    pub fn from_status(status: StatusCode, url: &Url) -> Self {
        let url = url.to_string();
        match status {
            StatusCode::UNAUTHORIZED => Self::Unauthorized { url },
            StatusCode::FORBIDDEN => Self::Forbidden { url },
            StatusCode::NOT_FOUND => Self::NotFound { url },
            other => Self::Status {
                status: other.as_u16(),
                url,
            },
        }
    }

    /// Guidance printed next to the error, if we have any.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::Unauthorized { .. } => {
                Some("check that the token is set and has the read_api (GitLab) or repo (GitHub) scope")
            }
            Self::Forbidden { .. } => {
                Some("the token cannot access this resource; the project may restrict who can read it")
            }
            Self::NotFound { .. } => {
                Some("check the project path; private projects also report 404 without a token")
            }
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
