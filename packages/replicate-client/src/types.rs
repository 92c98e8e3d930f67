use serde::{Deserialize, Serialize};

/// Input for text-to-image models such as black-forest-labs/flux-pro.
#[derive(Debug, Clone, Serialize)]
pub struct ImageInput {
    pub prompt: String,
    pub width: u32,
    pub height: u32,
}

/// Request body for creating a prediction.
#[derive(Debug, Clone, Serialize)]
pub struct PredictionRequest<'a, I: Serialize> {
    pub input: &'a I,
}

/// Replicate prediction state.
#[derive(Debug, Clone, Deserialize)]
pub struct Prediction {
    pub id: String,
    pub status: PredictionStatus,
    #[serde(default)]
    pub output: Option<PredictionOutput>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub logs: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PredictionStatus {
    Starting,
    Processing,
    Succeeded,
    Failed,
    Canceled,
}

impl PredictionStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed | Self::Canceled)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Starting => "starting",
            Self::Processing => "processing",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
            Self::Canceled => "canceled",
        }
    }
}

impl std::fmt::Display for PredictionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Model output: flux-pro returns one URL, many other models return a list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum PredictionOutput {
    Single(String),
    Many(Vec<String>),
}

impl PredictionOutput {
    pub fn first_url(&self) -> Option<&str> {
        match self {
            Self::Single(url) => Some(url.as_str()),
            Self::Many(urls) => urls.first().map(String::as_str),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_single_output_prediction() {
        let prediction: Prediction = serde_json::from_str(
            r#"{
                "id": "gm3qorzdhgbfurvjtvhg6dckhu",
                "model": "black-forest-labs/flux-pro",
                "status": "succeeded",
                "output": "https://replicate.delivery/abc/output.jpg",
                "error": null
            }"#,
        )
        .unwrap();

        assert_eq!(prediction.status, PredictionStatus::Succeeded);
        assert_eq!(
            prediction.output.as_ref().and_then(|o| o.first_url()),
            Some("https://replicate.delivery/abc/output.jpg")
        );
    }

    #[test]
    fn deserializes_list_output_and_pending_status() {
        let prediction: Prediction = serde_json::from_str(
            r#"{"id": "p1", "status": "processing", "output": ["a.png", "b.png"]}"#,
        )
        .unwrap();

        assert_eq!(prediction.status, PredictionStatus::Processing);
        assert!(!prediction.status.is_terminal());
        assert_eq!(prediction.output.unwrap().first_url(), Some("a.png"));
    }

    #[test]
    fn empty_output_list_has_no_url() {
        assert_eq!(PredictionOutput::Many(vec![]).first_url(), None);
    }

    #[test]
    fn image_input_serializes_under_input_key() {
        let input = ImageInput {
            prompt: "Eiffel Tower at sunset".into(),
            width: 1024,
            height: 1024,
        };
        let body = serde_json::to_value(PredictionRequest { input: &input }).unwrap();

        assert_eq!(body["input"]["prompt"], "Eiffel Tower at sunset");
        assert_eq!(body["input"]["width"], 1024);
        assert_eq!(body["input"]["height"], 1024);
    }
}
