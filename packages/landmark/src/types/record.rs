//! The normalized landmark record.

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;

/// Sentinel the language model writes for a field it could not determine.
pub const NO_VALUE: &str = "no_value";

/// The ten content fields of a landmark record, in prompt order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LandmarkField {
    Description,
    Architects,
    ConstructionYear,
    Materials,
    InterestingFacts,
    Dimensions,
    ConstructionCost,
    CulturalSignificance,
    GeographicalLocation,
    ImageGenerationPrompt,
}

impl LandmarkField {
    /// All content fields, in the order they appear in the image prompt.
    pub const ALL: [LandmarkField; 10] = [
        Self::Description,
        Self::Architects,
        Self::ConstructionYear,
        Self::Materials,
        Self::InterestingFacts,
        Self::Dimensions,
        Self::ConstructionCost,
        Self::CulturalSignificance,
        Self::GeographicalLocation,
        Self::ImageGenerationPrompt,
    ];

    /// JSON key used by the model.
    pub fn key(self) -> &'static str {
        match self {
            Self::Description => "description",
            Self::Architects => "architects",
            Self::ConstructionYear => "construction_year",
            Self::Materials => "materials",
            Self::InterestingFacts => "interesting_facts",
            Self::Dimensions => "dimensions",
            Self::ConstructionCost => "construction_cost",
            Self::CulturalSignificance => "cultural_significance",
            Self::GeographicalLocation => "geographical_location",
            Self::ImageGenerationPrompt => "image_generation_prompt",
        }
    }

    /// Human-readable label used in prompts and listings.
    pub fn label(self) -> &'static str {
        match self {
            Self::Description => "Description",
            Self::Architects => "Architects",
            Self::ConstructionYear => "Construction Year",
            Self::Materials => "Materials",
            Self::InterestingFacts => "Interesting Facts",
            Self::Dimensions => "Dimensions",
            Self::ConstructionCost => "Construction Cost",
            Self::CulturalSignificance => "Cultural Significance",
            Self::GeographicalLocation => "Geographical Location",
            Self::ImageGenerationPrompt => "Image Prompt",
        }
    }

    /// Phrase substituted in the prompt when the field is absent.
    pub fn fallback(self) -> &'static str {
        match self {
            Self::Description => "No description available.",
            Self::Architects => "No architects available.",
            Self::ConstructionYear => "No year available.",
            Self::Materials => "No materials available.",
            Self::InterestingFacts => "No facts available.",
            Self::Dimensions => "No dimensions available.",
            Self::ConstructionCost => "No cost available.",
            Self::CulturalSignificance => "No significance available.",
            Self::GeographicalLocation => "No location available.",
            Self::ImageGenerationPrompt => "No prompt available.",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.key() == key)
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for LandmarkField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// JSON key of the error field.
pub const ERROR_KEY: &str = "error";

/// A landmark description where every present field is a single string.
///
/// Built once by the normalizer (or the `with_*` builders in tests) and
/// read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LandmarkRecord {
    fields: [Option<String>; 10],
    error: Option<String>,
}

impl LandmarkRecord {
    /// Create an empty record (every field absent).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a content field.
    pub fn with(mut self, field: LandmarkField, value: impl Into<String>) -> Self {
        self.fields[field.index()] = Some(value.into());
        self
    }

    /// Set the error field.
    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    pub fn get(&self, field: LandmarkField) -> Option<&str> {
        self.fields[field.index()].as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// The model's own image prompt, used as the caption of the generated image.
    pub fn image_generation_prompt(&self) -> Option<&str> {
        self.get(LandmarkField::ImageGenerationPrompt)
    }

    /// Content fields holding the `no_value` sentinel.
    pub fn sentinel_fields(&self) -> Vec<LandmarkField> {
        LandmarkField::ALL
            .into_iter()
            .filter(|f| self.get(*f) == Some(NO_VALUE))
            .collect()
    }

    /// Content fields missing from the model payload entirely.
    pub fn absent_fields(&self) -> Vec<LandmarkField> {
        LandmarkField::ALL
            .into_iter()
            .filter(|f| self.get(*f).is_none())
            .collect()
    }

    /// Present content fields as `(label, value)` pairs, in prompt order.
    ///
    /// The error field is never included.
    pub fn details(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        LandmarkField::ALL
            .into_iter()
            .filter_map(|f| self.get(f).map(|v| (f.label(), v)))
    }

    /// The record as a JSON object holding only present fields.
    pub fn to_json(&self) -> serde_json::Value {
        let mut map = serde_json::Map::new();
        for field in LandmarkField::ALL {
            if let Some(value) = self.get(field) {
                map.insert(field.key().to_string(), value.into());
            }
        }
        if let Some(error) = &self.error {
            map.insert(ERROR_KEY.to_string(), error.as_str().into());
        }
        serde_json::Value::Object(map)
    }
}

impl Serialize for LandmarkRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let present = self.fields.iter().filter(|v| v.is_some()).count()
            + usize::from(self.error.is_some());
        let mut map = serializer.serialize_map(Some(present))?;
        for field in LandmarkField::ALL {
            if let Some(value) = self.get(field) {
                map.serialize_entry(field.key(), value)?;
            }
        }
        if let Some(error) = &self.error {
            map.serialize_entry(ERROR_KEY, error)?;
        }
        map.end()
    }
}
