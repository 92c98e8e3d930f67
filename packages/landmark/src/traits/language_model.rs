//! Language-model collaborator.

use async_trait::async_trait;

use crate::error::BoxError;

/// One JSON-mode completion request.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    /// Provider model identifier
    pub model: String,

    /// System instruction
    pub system: String,

    /// User message
    pub user: String,

    /// Sampling temperature
    pub temperature: f32,
}

/// A language model that answers with a single JSON object.
///
/// Implementations wrap a specific provider and must be safe to call
/// concurrently. The pipeline calls this once per landmark and never
/// retries.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Run a non-streaming, JSON-object completion and return its raw text.
    async fn complete_json(&self, request: &CompletionRequest) -> Result<String, BoxError>;
}
