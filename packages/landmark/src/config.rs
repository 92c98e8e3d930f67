//! Orchestrator configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::policy::AcceptancePolicy;

/// Configuration for [`crate::LandmarkOrchestrator`].
///
/// Defaults reproduce the fixed pipeline: Llama 3 70B at temperature 0.7
/// for retrieval, FLUX Pro at 1024×1024 for images, files under
/// `generated_images/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrchestratorConfig {
    /// Model used for landmark retrieval.
    pub chat_model: String,

    /// Sampling temperature for retrieval.
    pub temperature: f32,

    /// Model used for image generation.
    pub image_model: String,

    /// Image width in pixels.
    pub width: u32,

    /// Image height in pixels.
    pub height: u32,

    /// Directory generated images are written to. Created on first use.
    pub output_dir: PathBuf,

    /// Extension given to generated image files.
    pub image_extension: String,

    /// Reject model payloads containing keys outside the record schema.
    pub strict_schema: bool,

    /// When a record is good enough to generate an image from.
    #[serde(default)]
    pub policy: AcceptancePolicy,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            chat_model: "llama3-70b-8192".to_string(),
            temperature: 0.7,
            image_model: "black-forest-labs/flux-pro".to_string(),
            width: 1024,
            height: 1024,
            output_dir: PathBuf::from("generated_images"),
            image_extension: "jpg".to_string(),
            strict_schema: false,
            policy: AcceptancePolicy::default(),
        }
    }
}

impl OrchestratorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_chat_model(mut self, model: impl Into<String>) -> Self {
        self.chat_model = model.into();
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_image_model(mut self, model: impl Into<String>) -> Self {
        self.image_model = model.into();
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn with_image_extension(mut self, extension: impl Into<String>) -> Self {
        self.image_extension = extension.into();
        self
    }

    pub fn with_strict_schema(mut self, strict: bool) -> Self {
        self.strict_schema = strict;
        self
    }

    pub fn with_policy(mut self, policy: AcceptancePolicy) -> Self {
        self.policy = policy;
        self
    }
}
