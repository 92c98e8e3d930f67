//! Landmark description and image-generation pipeline.
//!
//! Turns a free-text landmark name into a normalized description from a
//! language model and an image generated from that description.
//!
//! # Usage
//!
//! ```rust,ignore
//! use landmark::{ApiCredentials, LandmarkOrchestrator, OrchestratorConfig};
//! use landmark::providers::{GroqLanguageModel, ReplicateImageGenerator};
//!
//! let creds = ApiCredentials::new(groq_key, replicate_token);
//! let orchestrator = LandmarkOrchestrator::new(
//!     GroqLanguageModel::new(&creds.llm_api_key),
//!     ReplicateImageGenerator::new(&creds.image_api_token),
//!     OrchestratorConfig::default(),
//! );
//!
//! let result = orchestrator.process("Eiffel Tower").await?;
//! println!("{} ({:?})", result.image.path.display(), result.image.caption);
//! ```
//!
//! # Modules
//!
//! - [`normalizer`] - Coerces model payloads into [`LandmarkRecord`]s
//! - [`policy`] - Decides whether a record is complete enough
//! - [`prompts`] - Retrieval instruction and image prompt assembly
//! - [`orchestrator`] - The end-to-end pipeline
//! - [`traits`] - Collaborator abstractions (language model, image generator)
//! - [`providers`] - Groq and Replicate collaborators
//! - [`testing`] - Mock collaborators for testing

pub mod config;
pub mod credentials;
pub mod error;
pub mod normalizer;
pub mod orchestrator;
pub mod policy;
pub mod prompts;
pub mod providers;
pub mod storage;
pub mod testing;
pub mod traits;
pub mod types;

pub use config::OrchestratorConfig;
pub use credentials::{ApiCredentials, SecretString};
pub use error::{BoxError, LandmarkError, Result, ValidationError};
pub use normalizer::{coerce, RawValue, ResponseNormalizer};
pub use orchestrator::{LandmarkOrchestrator, Stage};
pub use policy::AcceptancePolicy;
pub use prompts::{build_image_prompt, retrieval_message, LANDMARK_SYSTEM_PROMPT, RETRIEVAL_HINT};
pub use storage::ImageStore;
pub use traits::{
    image_generator::{ImageGenerator, ImageRequest, ImageStream},
    language_model::{CompletionRequest, LanguageModel},
};
pub use types::{
    image::{GeneratedImage, ProcessedLandmark},
    record::{LandmarkField, LandmarkRecord, NO_VALUE},
};

pub use testing::{MockImageGenerator, MockLanguageModel};
