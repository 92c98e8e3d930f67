//! Testing utilities including mock collaborators.
//!
//! These let applications exercise the pipeline without network calls.
//! Mocks are cheap to clone and clones share state, so a test can hand one
//! copy to the orchestrator and keep another for call assertions.

use async_trait::async_trait;
use bytes::Bytes;
use futures::{stream, StreamExt};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::error::BoxError;
use crate::traits::{
    image_generator::{ImageGenerator, ImageRequest, ImageStream},
    language_model::{CompletionRequest, LanguageModel},
};

/// A mock language model.
///
/// Answers with a completion registered for the user message, or the
/// default completion. Can be told to fail outright.
#[derive(Clone, Default)]
pub struct MockLanguageModel {
    /// Completions by user message
    completions: Arc<RwLock<HashMap<String, String>>>,

    /// Completion for unregistered messages
    default_completion: Arc<RwLock<Option<String>>>,

    /// Error message to fail every call with
    failure: Arc<RwLock<Option<String>>>,

    /// Call tracking for assertions
    calls: Arc<RwLock<Vec<CompletionRequest>>>,
}

impl MockLanguageModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer every call with `completion`.
    pub fn with_default(self, completion: impl Into<String>) -> Self {
        *self.default_completion.write().unwrap() = Some(completion.into());
        self
    }

    /// Answer with `completion` when the user message matches exactly.
    pub fn with_completion(self, user_message: impl Into<String>, completion: impl Into<String>) -> Self {
        self.completions
            .write()
            .unwrap()
            .insert(user_message.into(), completion.into());
        self
    }

    /// Answer with `value` serialized as JSON.
    pub fn with_json(self, value: serde_json::Value) -> Self {
        self.with_default(value.to_string())
    }

    /// Fail every call.
    pub fn failing(self, message: impl Into<String>) -> Self {
        *self.failure.write().unwrap() = Some(message.into());
        self
    }

    /// Get all requests made to this mock.
    pub fn calls(&self) -> Vec<CompletionRequest> {
        self.calls.read().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.read().unwrap().len()
    }
}

#[async_trait]
impl LanguageModel for MockLanguageModel {
    async fn complete_json(&self, request: &CompletionRequest) -> Result<String, BoxError> {
        self.calls.write().unwrap().push(request.clone());

        if let Some(message) = self.failure.read().unwrap().clone() {
            return Err(message.into());
        }

        let registered = self.completions.read().unwrap().get(&request.user).cloned();
        registered
            .or_else(|| self.default_completion.read().unwrap().clone())
            .ok_or_else(|| format!("no completion registered for '{}'", request.user).into())
    }
}

/// A mock image generator.
///
/// Streams fixed bytes in small chunks, or fails.
#[derive(Clone)]
pub struct MockImageGenerator {
    /// Bytes returned for every request
    image: Arc<RwLock<Vec<u8>>>,

    /// Chunk size the image is streamed in
    chunk_size: usize,

    /// Fail the call itself
    failure: Arc<RwLock<Option<String>>>,

    /// Fail midway through the byte stream
    stream_failure: Arc<RwLock<Option<String>>>,

    /// Call tracking for assertions
    calls: Arc<RwLock<Vec<ImageRequest>>>,
}

impl Default for MockImageGenerator {
    fn default() -> Self {
        Self {
            image: Arc::new(RwLock::new(b"\xff\xd8\xff\xe0mock-jpeg\xff\xd9".to_vec())),
            chunk_size: 4,
            failure: Arc::default(),
            stream_failure: Arc::default(),
            calls: Arc::default(),
        }
    }
}

impl MockImageGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_image(self, bytes: impl Into<Vec<u8>>) -> Self {
        *self.image.write().unwrap() = bytes.into();
        self
    }

    /// Fail every call before any bytes are produced.
    pub fn failing(self, message: impl Into<String>) -> Self {
        *self.failure.write().unwrap() = Some(message.into());
        self
    }

    /// Produce the first chunk, then fail the stream.
    pub fn failing_midstream(self, message: impl Into<String>) -> Self {
        *self.stream_failure.write().unwrap() = Some(message.into());
        self
    }

    pub fn image(&self) -> Vec<u8> {
        self.image.read().unwrap().clone()
    }

    /// Get all requests made to this mock.
    pub fn calls(&self) -> Vec<ImageRequest> {
        self.calls.read().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.read().unwrap().len()
    }
}

#[async_trait]
impl ImageGenerator for MockImageGenerator {
    async fn generate(&self, request: &ImageRequest) -> Result<ImageStream, BoxError> {
        self.calls.write().unwrap().push(request.clone());

        if let Some(message) = self.failure.read().unwrap().clone() {
            return Err(message.into());
        }

        let mut chunks: Vec<Result<Bytes, BoxError>> = self
            .image
            .read()
            .unwrap()
            .chunks(self.chunk_size.max(1))
            .map(|c| Ok(Bytes::copy_from_slice(c)))
            .collect();

        if let Some(message) = self.stream_failure.read().unwrap().clone() {
            chunks.truncate(1);
            chunks.push(Err(message.into()));
        }

        Ok(stream::iter(chunks).boxed())
    }
}
