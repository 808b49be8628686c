use crate::{
    Error, Result,
    config::LlmConfig,
    llm::{ChatCompletionRequest, ChatMessage, LlmClient},
};
use std::sync::Arc;
use tracing::{debug, error};

/// Forwards one user message, framed by the system prompt, to the chat provider.
pub struct ChatRelay {
    client: Arc<dyn LlmClient>,
    model: String,
    system_prompt: String,
    temperature: Option<f32>,
    max_tokens: Option<u16>,
}

impl ChatRelay {
    pub fn new(client: Arc<dyn LlmClient>, config: &LlmConfig) -> Self {
        Self {
            client,
            model: config.model.clone(),
            system_prompt: config.system_prompt.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        }
    }

    pub async fn reply(&self, message: &str) -> Result<String> {
        if message.trim().is_empty() {
            return Err(Error::invalid_request("Message is required"));
        }

        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage::system(&self.system_prompt),
                ChatMessage::user(message),
            ],
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        let response = match self.client.create_chat_completion(request).await {
            Ok(response) => response,
            Err(e) => {
                error!("Chat provider request failed: {}", e);
                return Err(Error::upstream(e.to_string()));
            }
        };

        debug!("Chat provider answered with completion {}", response.id);

        match response.first_content() {
            Some(content) => Ok(content.to_string()),
            None => {
                error!("Chat provider returned no choices for {}", response.id);
                Err(Error::upstream("completion contained no choices"))
            }
        }
    }
}
