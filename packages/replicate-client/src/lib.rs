//! Pure Replicate REST API client.
//!
//! A minimal client for the Replicate predictions API. Supports creating a
//! prediction against an official model, polling it to completion, and
//! streaming the output file.
//!
//! # Example
//!
//! ```rust,ignore
//! use replicate_client::{ImageInput, ReplicateClient};
//!
//! let client = ReplicateClient::new("r8_...".into());
//!
//! let input = ImageInput { prompt: "Eiffel Tower at sunset".into(), width: 1024, height: 1024 };
//! let prediction = client.run("black-forest-labs/flux-pro", &input).await?;
//! let url = prediction.output.as_ref().and_then(|o| o.first_url()).unwrap();
//! let mut stream = client.download(url).await?;
//! ```

pub mod error;
pub mod types;

pub use error::{ReplicateError, Result};
pub use types::{ImageInput, Prediction, PredictionOutput, PredictionRequest, PredictionStatus};

use bytes::Bytes;
use futures::stream::{BoxStream, StreamExt};
use serde::Serialize;
use std::time::Duration;

const BASE_URL: &str = "https://api.replicate.com/v1";

pub struct ReplicateClient {
    client: reqwest::Client,
    token: String,
    base_url: String,
    poll_interval: Duration,
}

impl ReplicateClient {
    pub fn new(token: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            token,
            base_url: BASE_URL.to_string(),
            poll_interval: Duration::from_secs(1),
        }
    }

    /// Create from environment variable `REPLICATE_API_TOKEN`.
    pub fn from_env() -> Result<Self> {
        let token = std::env::var("REPLICATE_API_TOKEN")
            .map_err(|_| ReplicateError::Config("REPLICATE_API_TOKEN not set".into()))?;
        Ok(Self::new(token))
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Create a prediction on an official model (`owner/name`).
    ///
    /// Sends `Prefer: wait` so fast models usually come back already finished.
    pub async fn create_prediction<I: Serialize>(&self, model: &str, input: &I) -> Result<Prediction> {
        let (owner, name) = split_model(model)?;
        let url = format!("{}/models/{}/{}/predictions", self.base_url, owner, name);

        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .header("Prefer", "wait")
            .json(&PredictionRequest { input })
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ReplicateError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let prediction: Prediction = resp.json().await?;
        tracing::debug!(prediction_id = %prediction.id, status = %prediction.status, "Prediction created");
        Ok(prediction)
    }

    pub async fn get_prediction(&self, id: &str) -> Result<Prediction> {
        let url = format!("{}/predictions/{}", self.base_url, id);
        let resp = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ReplicateError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(resp.json().await?)
    }

    /// Poll until a prediction reaches a terminal state.
    pub async fn wait_for_prediction(&self, prediction: Prediction) -> Result<Prediction> {
        let mut current = prediction;
        loop {
            match current.status {
                PredictionStatus::Succeeded => return Ok(current),
                PredictionStatus::Failed | PredictionStatus::Canceled => {
                    return Err(ReplicateError::PredictionFailed {
                        id: current.id,
                        status: current.status.to_string(),
                        error: current.error,
                    });
                }
                PredictionStatus::Starting | PredictionStatus::Processing => {
                    tracing::debug!(prediction_id = %current.id, status = %current.status, "Prediction still in progress");
                    tokio::time::sleep(self.poll_interval).await;
                    current = self.get_prediction(&current.id).await?;
                }
            }
        }
    }

    /// Run a model end-to-end: create the prediction and wait for it.
    pub async fn run<I: Serialize>(&self, model: &str, input: &I) -> Result<Prediction> {
        tracing::info!(model, "Starting Replicate prediction");

        let prediction = self.create_prediction(model, input).await?;
        let completed = self.wait_for_prediction(prediction).await?;

        if completed.output.as_ref().and_then(|o| o.first_url()).is_none() {
            return Err(ReplicateError::MissingOutput { id: completed.id });
        }

        tracing::info!(prediction_id = %completed.id, "Prediction completed");
        Ok(completed)
    }

    /// Stream the bytes of an output file.
    ///
    /// The token is only sent to URLs under the API base; delivery hosts get
    /// an anonymous request.
    pub async fn download(&self, url: &str) -> Result<BoxStream<'static, Result<Bytes>>> {
        let mut request = self.client.get(url);
        if self.is_api_url(url) {
            request = request.bearer_auth(&self.token);
        }
        let resp = request.send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ReplicateError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(resp
            .bytes_stream()
            .map(|chunk| chunk.map_err(ReplicateError::from))
            .boxed())
    }

    fn is_api_url(&self, url: &str) -> bool {
        url.strip_prefix(self.base_url.trim_end_matches('/'))
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('/') || rest.starts_with('?'))
    }
}

fn split_model(model: &str) -> Result<(&str, &str)> {
    // Version pins (`owner/name:version`) go through a different endpoint.
    match model.split_once('/') {
        Some((owner, name))
            if !owner.is_empty() && !name.is_empty() && !name.contains('/') && !name.contains(':') =>
        {
            Ok((owner, name))
        }
        _ => Err(ReplicateError::InvalidModel(model.to_string())),
    }
}
