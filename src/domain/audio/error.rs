use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum AudioServiceError {
    #[error("invalid input: {0}")]
    Invalid(String),
    #[error("synthesis failed: {0}")]
    Synthesis(String),
    #[error("export failed: {0}")]
    Export(String),
}

impl From<AudioServiceError> for AppError {
    fn from(err: AudioServiceError) -> Self {
        match err {
            AudioServiceError::Invalid(msg) => AppError::BadRequest(msg),
            AudioServiceError::Synthesis(msg) => AppError::Synthesis(msg),
            AudioServiceError::Export(msg) => AppError::Export(msg),
        }
    }
}
