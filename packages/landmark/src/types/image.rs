//! Results handed back to the caller of the pipeline.

use serde::Serialize;
use std::path::PathBuf;

use super::record::LandmarkRecord;

/// An image written to disk, captioned with the model's image prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedImage {
    /// Where the image bytes were written
    pub path: PathBuf,

    /// The record's `image_generation_prompt`, if the model supplied one
    pub caption: Option<String>,
}

impl GeneratedImage {
    /// Caption for display, falling back to a numbered placeholder.
    pub fn caption_or(&self, index: usize) -> String {
        self.caption
            .clone()
            .unwrap_or_else(|| format!("Image {}", index + 1))
    }
}

/// Successful outcome of one `process` call.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessedLandmark {
    pub image: GeneratedImage,
    pub record: LandmarkRecord,
}
