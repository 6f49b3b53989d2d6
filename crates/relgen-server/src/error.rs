//! Error types for relgen-server

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Result type for relgen-server operations
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Variations(#[from] relgen_variations::Error),

    #[error("no variations file configured, nothing to reload")]
    NoSource,

    #[error("failed to serve on {addr}: {source}")]
    Serve {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl Error {
    /// HTTP status reported for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Variations(e) if e.is_not_found() => StatusCode::NOT_FOUND,
            Self::Variations(relgen_variations::Error::UnknownField { .. }) => {
                StatusCode::BAD_REQUEST
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        (status, self.to_string()).into_response()
    }
}
