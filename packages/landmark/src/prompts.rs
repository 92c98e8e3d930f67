//! Prompt templates for retrieval and image generation.

use crate::types::record::{LandmarkField, LandmarkRecord};

/// Appended to the landmark name. JSON mode needs "json" in the messages.
pub const RETRIEVAL_HINT: &str = " json";

/// System instruction for the retrieval call.
pub const LANDMARK_SYSTEM_PROMPT: &str = r#"You are an assistant specialized in retrieving and analyzing landmark information. Provide a JSON response with the following keys and values:
'description': A brief description of the landmark and its historical significance.
'architects': Architects or designers responsible for its construction.
'construction_year': Year it was built.
'materials': Materials used in its construction.
'interesting_facts': Interesting facts or historical anecdotes related to the landmark.
'dimensions': Dimensions or unique features of the landmark.
'construction_cost': Cost of construction.
'cultural_significance': Cultural or historical significance.
'geographical_location': Geographical location or significance of the landmark.
'image_generation_prompt': Prompt for generating an image based on the user input. Use the above values to ensure accuracy and include the landmark name.
If any information is missing, state it explicitly as 'no_value'."#;

/// User message for the retrieval call.
pub fn retrieval_message(landmark_name: &str) -> String {
    format!("Landmark: {}{}", landmark_name, RETRIEVAL_HINT)
}

/// Assemble the image-generation prompt.
///
/// One `Label: value` line per content field, in [`LandmarkField::ALL`]
/// order, ending with the model's own image prompt. Absent fields get
/// their fallback phrase; `no_value` is kept as-is.
pub fn build_image_prompt(record: &LandmarkRecord) -> String {
    LandmarkField::ALL
        .into_iter()
        .map(|field| {
            format!(
                "{}: {}",
                field.label(),
                record.get(field).unwrap_or(field.fallback())
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
