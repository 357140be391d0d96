//! services/assistant/src/adapters/chat_llm.rs
//!
//! This module contains the adapter for the chat-completion model backend.
//! It implements the `ChatCompletionService` port from the `core` crate and
//! can talk to api.openai.com or to Groq's OpenAI-compatible endpoint.

use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::chat::{
        ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use study_buddy_core::{
    domain::{ChatMessage, ChatRole},
    ports::{ChatCompletionService, CoreError, CoreResult},
};
use tracing::debug;

use crate::config::{Config, ConfigError};

/// Groq speaks the OpenAI wire protocol at this base URL.
const GROQ_API_BASE: &str = "https://api.groq.com/openai/v1";

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements `ChatCompletionService` using an
/// OpenAI-compatible chat completions endpoint.
#[derive(Clone, Debug)]
pub struct OpenAiChatAdapter {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAiChatAdapter {
    /// Creates a new `OpenAiChatAdapter` from an already-configured client.
    pub fn new(client: Client<OpenAIConfig>, model: String) -> Self {
        Self { client, model }
    }

    /// Builds the adapter from application configuration, selecting the Groq
    /// API base when `GROQ_ENABLED` is set. Fails when no API key is
    /// configured.
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let api_key = config
            .api_key
            .as_deref()
            .ok_or_else(|| ConfigError::MissingVar("OPENAI_API_KEY".to_string()))?;

        let mut openai_config = OpenAIConfig::new().with_api_key(api_key);
        if config.groq_enabled {
            openai_config = openai_config.with_api_base(GROQ_API_BASE);
        }

        Ok(Self::new(Client::with_config(openai_config), config.model.clone()))
    }
}

fn to_request_message(message: &ChatMessage) -> Result<ChatCompletionRequestMessage, OpenAIError> {
    let request_message = match message.role {
        ChatRole::System => ChatCompletionRequestSystemMessageArgs::default()
            .content(message.content.as_str())
            .build()?
            .into(),
        ChatRole::User => ChatCompletionRequestUserMessageArgs::default()
            .content(message.content.as_str())
            .build()?
            .into(),
        ChatRole::Assistant => ChatCompletionRequestAssistantMessageArgs::default()
            .content(message.content.as_str())
            .build()?
            .into(),
    };
    Ok(request_message)
}

//=========================================================================================
// `ChatCompletionService` Trait Implementation
//=========================================================================================

#[async_trait]
impl ChatCompletionService for OpenAiChatAdapter {
    /// Sends the conversation to the backend and returns the first choice's
    /// text, trimmed.
    async fn complete(&self, messages: &[ChatMessage], temperature: f32) -> CoreResult<String> {
        let request_messages = messages
            .iter()
            .map(to_request_message)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| CoreError::UpstreamGeneration(e.to_string()))?;

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(request_messages)
            .temperature(temperature)
            .build()
            .map_err(|e| CoreError::UpstreamGeneration(e.to_string()))?;

        debug!(model = %self.model, messages = messages.len(), temperature, "sending chat completion");

        // Call the API and manually map the error if it occurs, which respects the orphan rule.
        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e: OpenAIError| CoreError::UpstreamGeneration(e.to_string()))?;

        // Extract the text content from the first choice in the response.
        if let Some(choice) = response.choices.into_iter().next() {
            if let Some(content) = choice.message.content {
                Ok(content.trim().to_string())
            } else {
                Err(CoreError::UpstreamGeneration(
                    "Chat completion response contained no text content.".to_string(),
                ))
            }
        } else {
            Err(CoreError::UpstreamGeneration(
                "Chat completion returned no choices in its response.".to_string(),
            ))
        }
    }
}
