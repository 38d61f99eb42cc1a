use thiserror::Error;

/// Errors surfaced by the annotation store
#[derive(Debug, Error)]
pub enum AnnotatorError {
    #[error("failed to serialize annotations: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("failed to parse annotations: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("download of {filename} failed: {message}")]
    Sink { filename: String, message: String },
}

pub type Result<T> = std::result::Result<T, AnnotatorError>;
