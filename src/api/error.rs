//! HTTP error mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};

use crate::gateway::{ErrorRecord, GenerationError};

/// Anything a request handler can fail with.
#[derive(Debug)]
pub enum ApiError {
    /// Request body had no usable `prompt`.
    MissingPrompt,
    /// The gateway reported an error record.
    Generation(GenerationError),
    /// Unexpected failure while handling the request.
    Server(String),
}

impl From<GenerationError> for ApiError {
    fn from(err: GenerationError) -> Self {
        ApiError::Generation(err)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingPrompt => StatusCode::BAD_REQUEST,
            ApiError::Generation(GenerationError::MissingApiKey) => StatusCode::UNAUTHORIZED,
            ApiError::Generation(GenerationError::Upstream(_)) | ApiError::Server(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::Generation(_) => StatusCode::BAD_GATEWAY,
        }
    }

    pub fn record(&self) -> ErrorRecord {
        match self {
            ApiError::MissingPrompt => ErrorRecord::new("missing_prompt", "prompt is required"),
            ApiError::Generation(err) => err.record(),
            ApiError::Server(message) => ErrorRecord::new("server_error", message.clone()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), "Request failed: {:?}", self);
        }
        (status, Json(self.record())).into_response()
    }
}
