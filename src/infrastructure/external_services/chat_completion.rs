use async_trait::async_trait;
use reqwest::{Client, Error as ReqwestError, StatusCode};
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

use crate::application::ports::completion_provider::{
    ChatMessage, CompletionProvider, CompletionProviderError,
};

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    max_tokens: u32,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: String,
}

#[derive(Debug, Clone)]
pub struct CompletionClientConfig {
    pub api_url: String,
    pub api_key: String,
    pub model: String,
    pub max_tokens: u32,
    pub timeout_secs: u64,
}

impl Default for CompletionClientConfig {
    fn default() -> Self {
        let api_url = env::var("COMPLETION_API_URL")
            .unwrap_or_else(|_| "https://api.groq.com/openai/v1/chat/completions".to_string());
        let api_key = env::var("GROQ_API_KEY").unwrap_or_default();
        let model = env::var("COMPLETION_MODEL")
            .unwrap_or_else(|_| "llama-3.3-70b-versatile".to_string());

        Self {
            api_url,
            api_key,
            model,
            max_tokens: 512,
            timeout_secs: 60,
        }
    }
}

/// OpenAI-compatible chat-completions client (Groq in the reference
/// deployment).
#[derive(Debug, Clone)]
pub struct GroqCompletionProvider {
    client: Client,
    config: CompletionClientConfig,
}

impl GroqCompletionProvider {
    pub fn new(config: CompletionClientConfig) -> Result<Self, ReqwestError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }

    pub fn from_env() -> Result<Self, ReqwestError> {
        Self::new(CompletionClientConfig::default())
    }
}

#[async_trait]
impl CompletionProvider for GroqCompletionProvider {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, CompletionProviderError> {
        let request = ChatCompletionRequest {
            model: &self.config.model,
            messages,
            max_tokens: self.config.max_tokens,
        };

        let response = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| CompletionProviderError::NetworkError(e.to_string()))?;

        let status = response.status();

        if status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
            return Err(CompletionProviderError::ServiceUnavailable);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CompletionProviderError::ApiError(format!(
                "Completion service returned {}: {}",
                status, body
            )));
        }

        let parsed = response
            .json::<ChatCompletionResponse>()
            .await
            .map_err(|e| CompletionProviderError::InvalidResponse(e.to_string()))?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| {
                CompletionProviderError::InvalidResponse(
                    "Completion service returned no choices".to_string(),
                )
            })
    }
}
