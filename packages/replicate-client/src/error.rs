use thiserror::Error;

pub type Result<T> = std::result::Result<T, ReplicateError>;

#[derive(Debug, Error)]
pub enum ReplicateError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Replicate API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("prediction {id} ended with status {status}: {}", .error.as_deref().unwrap_or("no error reported"))]
    PredictionFailed {
        id: String,
        status: String,
        error: Option<String>,
    },

    #[error("prediction {id} succeeded without an output")]
    MissingOutput { id: String },

    #[error("invalid model identifier '{0}', expected owner/name")]
    InvalidModel(String),
}
