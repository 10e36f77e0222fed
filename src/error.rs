use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Main application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Audio toolchain unavailable: {0}")]
    CapabilityUnavailable(String),

    #[error("Invalid input: {0}")]
    BadRequest(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Speech synthesis failed: {0}")]
    Synthesis(String),

    #[error("Audio export failed: {0}")]
    Export(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Uniform error body: every failure resolves to the same coarse shape,
/// so callers can only tell fault kinds apart by message text.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AppError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::CapabilityUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Synthesis(_) | Self::Export(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Coarse human message paired with the underlying detail
    fn message(&self) -> &'static str {
        match self {
            Self::CapabilityUnavailable(_) => "Audio toolchain is not available",
            Self::BadRequest(_) => "Invalid request",
            Self::NotFound(_) => "Audio file not found",
            Self::Synthesis(_) => "Failed to generate audio",
            Self::Export(_) => "Failed to export audio",
            Self::Internal(_) => "Internal server error",
        }
    }

    /// Convert to the uniform error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            success: false,
            message: self.message().to_string(),
            error: Some(self.to_string()),
        }
    }
}

/// Implement IntoResponse for automatic conversion in handlers
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        tracing::error!(
            error = %self,
            status = %status.as_u16(),
            "Request failed"
        );

        let error_response = self.to_response();

        (status, Json(error_response)).into_response()
    }
}

/// Custom result type for the application
pub type AppResult<T> = Result<T, AppError>;
