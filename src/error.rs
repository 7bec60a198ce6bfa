use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// Ways picking an article can fail. None of them are fatal to the process.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to reach news API: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("malformed response from news API: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("error response from news API ({code}): {message}")]
    Upstream { code: String, message: String },

    #[error("did not get any articles from news API")]
    NoResults,

    #[error("article {title:?} has no URL to redirect to")]
    MissingUrl { title: String },
}

impl Error {
    pub fn upstream(code: Option<String>, message: Option<String>) -> Self {
        Self::Upstream {
            code: code.unwrap_or_else(|| "unknown".to_string()),
            message: message.unwrap_or_default(),
        }
    }

    /// Stable tag returned to callers in the error body.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Transport(_) => "TRANSPORT_ERROR",
            Error::Decode(_) => "DECODE_ERROR",
            Error::Upstream { .. } => "UPSTREAM_ERROR",
            Error::NoResults => "NO_RESULTS",
            Error::MissingUrl { .. } => "MISSING_URL",
        }
    }
}

/// Error response structure
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        // reqwest errors carry the request URL, which includes the API key.
        let kind = self.kind();
        let message = match self {
            Error::Transport(e) => Error::Transport(e.without_url()).to_string(),
            other => other.to_string(),
        };
        error!("Internal server error: {}", message);

        let body = Json(ErrorResponse {
            error: kind.to_string(),
            message,
        });

        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, Error>;
