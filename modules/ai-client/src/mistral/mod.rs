mod client;
pub mod types;

use crate::error::{AiError, Result};

use client::MistralClient;
use types::*;

const MISTRAL_API_URL: &str = "https://api.mistral.ai/v1";

// =============================================================================
// Mistral Agent
// =============================================================================

#[derive(Clone)]
pub struct Mistral {
    api_key: String,
    pub(crate) model: String,
    base_url: Option<String>,
}

impl Mistral {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
            base_url: None,
        }
    }

    /// Point at another OpenAI-compatible endpoint (proxy, mock server).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Get the model name.
    pub fn model(&self) -> &str {
        &self.model
    }

    pub(crate) fn client(&self) -> MistralClient {
        MistralClient::new(
            &self.api_key,
            self.base_url.as_deref().unwrap_or(MISTRAL_API_URL),
        )
    }

    /// Empty request for this agent's model.
    pub fn request(&self) -> ChatRequest {
        ChatRequest::new(&self.model)
    }

    /// Send a fully built request.
    pub async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse> {
        self.client().chat(request).await
    }

    /// Single user message in, content of the first choice out.
    pub async fn chat_completion(&self, user: impl Into<String>) -> Result<String> {
        let request = self.request().message(WireMessage::user(user));
        let response = self.chat(&request).await?;

        response
            .into_message()
            .and_then(|m| m.content)
            .ok_or_else(|| AiError::EmptyResponse("no content in chat completion".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mistral_new() {
        let ai = Mistral::new("key", "mistral-large-latest");
        assert_eq!(ai.model(), "mistral-large-latest");
        assert_eq!(ai.api_key, "key");
        assert_eq!(ai.base_url, None);
    }

    #[test]
    fn test_mistral_with_base_url() {
        let ai = Mistral::new("key", "mistral-small-latest").with_base_url("http://localhost:9000");
        assert_eq!(ai.base_url, Some("http://localhost:9000".to_string()));
    }

    #[test]
    fn test_request_uses_model() {
        let ai = Mistral::new("key", "open-mistral-nemo");
        assert_eq!(ai.request().model, "open-mistral-nemo");
        assert!(ai.request().messages.is_empty());
    }
}
