//! Replicate implementation of [`ImageGenerator`].

use async_trait::async_trait;
use futures::StreamExt;
use replicate_client::{ImageInput, ReplicateClient, ReplicateError};

use crate::credentials::SecretString;
use crate::error::BoxError;
use crate::traits::image_generator::{ImageGenerator, ImageRequest, ImageStream};

/// Image generator backed by a Replicate prediction.
///
/// Runs the prediction to completion, then streams the first output file.
pub struct ReplicateImageGenerator {
    client: ReplicateClient,
}

impl ReplicateImageGenerator {
    pub fn new(api_token: &SecretString) -> Self {
        Self::from_client(ReplicateClient::new(api_token.expose().to_string()))
    }

    pub fn from_client(client: ReplicateClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ImageGenerator for ReplicateImageGenerator {
    async fn generate(&self, request: &ImageRequest) -> Result<ImageStream, BoxError> {
        let input = ImageInput {
            prompt: request.prompt.clone(),
            width: request.width,
            height: request.height,
        };

        let prediction = self.client.run(&request.model, &input).await?;
        let url = prediction
            .output
            .as_ref()
            .and_then(|o| o.first_url())
            .ok_or(ReplicateError::MissingOutput {
                id: prediction.id.clone(),
            })?;

        let stream = self.client.download(url).await?;
        Ok(stream.map(|chunk| chunk.map_err(BoxError::from)).boxed())
    }
}
