//! Landmark orchestration.
//!
//! One `process` call walks a fixed state machine:
//!
//! ```text
//! START → RETRIEVING → NORMALIZING → {REJECTED | ACCEPTED} → GENERATING → {DONE | FAILED}
//! ```
//!
//! Every failure is terminal for the call; there is no retry edge.

use futures::future::join_all;
use std::fmt;
use tracing::{debug, info, warn};

use crate::config::OrchestratorConfig;
use crate::error::{LandmarkError, Result};
use crate::normalizer::ResponseNormalizer;
use crate::prompts::{build_image_prompt, retrieval_message, LANDMARK_SYSTEM_PROMPT};
use crate::storage::ImageStore;
use crate::traits::{
    image_generator::{ImageGenerator, ImageRequest},
    language_model::{CompletionRequest, LanguageModel},
};
use crate::types::{
    image::{GeneratedImage, ProcessedLandmark},
    record::LandmarkRecord,
};

/// Pipeline stage, attached to log events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Retrieving,
    Normalizing,
    Rejected,
    Accepted,
    Generating,
    Done,
    Failed,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Retrieving => "retrieving",
            Stage::Normalizing => "normalizing",
            Stage::Rejected => "rejected",
            Stage::Accepted => "accepted",
            Stage::Generating => "generating",
            Stage::Done => "done",
            Stage::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Turns a landmark name into a normalized record and a generated image.
///
/// Holds no per-call state, so one orchestrator can serve many concurrent
/// `process` calls.
pub struct LandmarkOrchestrator<L: LanguageModel, G: ImageGenerator> {
    language_model: L,
    image_generator: G,
    normalizer: ResponseNormalizer,
    store: ImageStore,
    config: OrchestratorConfig,
}

impl<L: LanguageModel, G: ImageGenerator> LandmarkOrchestrator<L, G> {
    pub fn new(language_model: L, image_generator: G, config: OrchestratorConfig) -> Self {
        Self {
            language_model,
            image_generator,
            normalizer: ResponseNormalizer::new().with_strict(config.strict_schema),
            store: ImageStore::new(&config.output_dir, &config.image_extension),
            config,
        }
    }

    pub fn config(&self) -> &OrchestratorConfig {
        &self.config
    }

    pub fn language_model(&self) -> &L {
        &self.language_model
    }

    pub fn image_generator(&self) -> &G {
        &self.image_generator
    }

    /// Run the full pipeline for one landmark.
    pub async fn process(&self, landmark_name: &str) -> Result<ProcessedLandmark> {
        let landmark_name = landmark_name.trim();
        if landmark_name.is_empty() {
            return Err(LandmarkError::InvalidInput {
                reason: "landmark name is empty".into(),
            });
        }

        let record = self.fetch_record(landmark_name).await?;

        if let Err(e) = self.config.policy.check(&record) {
            warn!(landmark = landmark_name, stage = %Stage::Rejected, error = %e, "Landmark record rejected");
            return Err(e);
        }
        debug!(landmark = landmark_name, stage = %Stage::Accepted, "Landmark record accepted");

        let image = match self.generate_image(&record).await {
            Ok(image) => image,
            Err(e) => {
                warn!(landmark = landmark_name, stage = %Stage::Failed, error = %e, "Image generation failed");
                return Err(e);
            }
        };

        info!(
            landmark = landmark_name,
            stage = %Stage::Done,
            path = %image.path.display(),
            "Landmark image generated"
        );

        Ok(ProcessedLandmark { image, record })
    }

    /// Run `count` independent `process` calls concurrently.
    ///
    /// Results come back in submission order; one failure does not affect
    /// the others.
    pub async fn process_many(
        &self,
        landmark_name: &str,
        count: usize,
    ) -> Vec<Result<ProcessedLandmark>> {
        join_all((0..count).map(|_| self.process(landmark_name))).await
    }

    /// Retrieve and normalize the landmark record (steps 1 and 2).
    pub async fn fetch_record(&self, landmark_name: &str) -> Result<LandmarkRecord> {
        let request = CompletionRequest {
            model: self.config.chat_model.clone(),
            system: LANDMARK_SYSTEM_PROMPT.to_string(),
            user: retrieval_message(landmark_name),
            temperature: self.config.temperature,
        };

        debug!(landmark = landmark_name, stage = %Stage::Retrieving, model = %request.model, "Requesting landmark details");
        let completion = self
            .language_model
            .complete_json(&request)
            .await
            .map_err(LandmarkError::Retrieval)?;

        debug!(landmark = landmark_name, stage = %Stage::Normalizing, bytes = completion.len(), "Normalizing landmark details");
        let record = self.normalizer.normalize_str(&completion)?;

        Ok(record)
    }

    /// Build the prompt, generate the image and save it (steps 4 and 5).
    pub async fn generate_image(&self, record: &LandmarkRecord) -> Result<GeneratedImage> {
        let request = ImageRequest {
            model: self.config.image_model.clone(),
            prompt: build_image_prompt(record),
            width: self.config.width,
            height: self.config.height,
        };

        debug!(stage = %Stage::Generating, model = %request.model, prompt_len = request.prompt.len(), "Requesting image");
        let stream = self
            .image_generator
            .generate(&request)
            .await
            .map_err(LandmarkError::Generation)?;

        let path = self.store.save(stream).await?;

        Ok(GeneratedImage {
            path,
            caption: record.image_generation_prompt().map(str::to_string),
        })
    }
}
