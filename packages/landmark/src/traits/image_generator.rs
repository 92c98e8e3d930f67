//! Image-generation collaborator.

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::BoxStream;

use crate::error::BoxError;

/// Image bytes as they arrive from the provider.
pub type ImageStream = BoxStream<'static, Result<Bytes, BoxError>>;

/// One text-to-image request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRequest {
    /// Provider model identifier
    pub model: String,

    /// Full prompt text
    pub prompt: String,

    /// Target width in pixels
    pub width: u32,

    /// Target height in pixels
    pub height: u32,
}

/// A text-to-image service.
///
/// Implementations must be safe to call concurrently.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// Generate one image and return a stream of its encoded bytes.
    async fn generate(&self, request: &ImageRequest) -> Result<ImageStream, BoxError>;
}
