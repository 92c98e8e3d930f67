//! Provider-backed collaborators.

#[cfg(feature = "groq")]
pub mod groq;

#[cfg(feature = "replicate")]
pub mod replicate;

#[cfg(feature = "groq")]
pub use groq::GroqLanguageModel;

#[cfg(feature = "replicate")]
pub use replicate::ReplicateImageGenerator;
