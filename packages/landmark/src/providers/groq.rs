//! Groq implementation of [`LanguageModel`].

use async_trait::async_trait;
use groq_client::{strip_code_blocks, ChatRequest, GroqClient, Message};

use crate::credentials::SecretString;
use crate::error::BoxError;
use crate::traits::language_model::{CompletionRequest, LanguageModel};

/// Language model backed by Groq's chat completions in JSON mode.
#[derive(Clone, Debug)]
pub struct GroqLanguageModel {
    client: GroqClient,
}

impl GroqLanguageModel {
    pub fn new(api_key: &SecretString) -> Self {
        Self::from_client(GroqClient::new(api_key.expose()))
    }

    pub fn from_client(client: GroqClient) -> Self {
        Self { client }
    }

    /// Build the wire request for a completion.
    pub fn chat_request(request: &CompletionRequest) -> ChatRequest {
        ChatRequest::new(&request.model)
            .message(Message::system(&request.system))
            .message(Message::user(&request.user))
            .temperature(request.temperature)
            .json_object()
    }
}

#[async_trait]
impl LanguageModel for GroqLanguageModel {
    async fn complete_json(&self, request: &CompletionRequest) -> Result<String, BoxError> {
        let response = self
            .client
            .chat_completion(Self::chat_request(request))
            .await?;

        if let Some(usage) = &response.usage {
            tracing::debug!(
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "Groq usage"
            );
        }

        Ok(strip_code_blocks(&response.content).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_request_is_json_mode_single_shot() {
        let request = CompletionRequest {
            model: "llama3-70b-8192".into(),
            system: "Return json".into(),
            user: "Landmark: Eiffel Tower json".into(),
            temperature: 0.7,
        };

        let chat = GroqLanguageModel::chat_request(&request);
        assert_eq!(chat.model, "llama3-70b-8192");
        assert_eq!(chat.messages.len(), 2);
        assert_eq!(chat.messages[0].role, "system");
        assert_eq!(chat.messages[1].content, "Landmark: Eiffel Tower json");
        assert_eq!(chat.temperature, Some(0.7));
        assert!(chat.response_format.is_some());
        assert!(!chat.stream);
    }
}
