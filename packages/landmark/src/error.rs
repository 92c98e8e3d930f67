//! Typed errors for the landmark pipeline.
//!
//! Every variant is terminal for the `process` call that produced it.
//! Nothing in this crate retries; callers own retry policy.

use thiserror::Error;

/// Boxed error returned by collaborator implementations.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur while processing a landmark.
#[derive(Debug, Error)]
pub enum LandmarkError {
    /// The landmark name was unusable before any collaborator was called
    #[error("invalid landmark name: {reason}")]
    InvalidInput { reason: String },

    /// The language-model collaborator could not be reached or failed
    #[error("landmark retrieval failed: {0}")]
    Retrieval(#[source] BoxError),

    /// The model answered, but its payload does not fit the record schema
    #[error("landmark response failed validation: {0}")]
    Validation(#[from] ValidationError),

    /// The model filled in the `error` field
    #[error("Error fetching landmark details: {0}")]
    UpstreamReported(String),

    /// Too many fields came back as the `no_value` sentinel
    #[error(
        "Error fetching landmark details: {missing} essential details are missing, possibly because \
         the language model has little data on this landmark or the information is unavailable. \
         Please revise your input to a more specific or widely recognized landmark."
    )]
    InsufficientData { missing: usize },

    /// The image-generation collaborator failed
    #[error("image generation failed: {0}")]
    Generation(#[source] BoxError),

    /// The generated image could not be written to disk
    #[error("failed to save generated image: {0}")]
    Storage(#[from] std::io::Error),
}

impl LandmarkError {
    /// True when the model was reached but its answer was rejected.
    ///
    /// Lets callers tell "model unreachable" apart from "model answered badly".
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            LandmarkError::Validation(_)
                | LandmarkError::UpstreamReported(_)
                | LandmarkError::InsufficientData { .. }
        )
    }
}

/// Errors raised while normalizing a model payload into a `LandmarkRecord`.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// The completion was not valid JSON
    #[error("response is not valid JSON: {0}")]
    MalformedJson(#[from] serde_json::Error),

    /// The completion was JSON, but not an object
    #[error("response is a JSON {kind}, expected an object")]
    NotAnObject { kind: &'static str },

    /// A field holds a shape that cannot be flattened into a string
    #[error("field '{field}' holds an unsupported value ({kind})")]
    UnsupportedValue { field: String, kind: String },

    /// Strict mode only: a key outside the record schema
    #[error("unrecognized field '{field}'")]
    UnknownField { field: String },
}

/// Result type alias for landmark operations.
pub type Result<T> = std::result::Result<T, LandmarkError>;
