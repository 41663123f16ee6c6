use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug)]
pub enum CompletionProviderError {
    NetworkError(String),
    ApiError(String),
    InvalidResponse(String),
    ServiceUnavailable,
}

impl std::fmt::Display for CompletionProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompletionProviderError::NetworkError(msg) => write!(f, "Network error: {}", msg),
            CompletionProviderError::ApiError(msg) => write!(f, "API error: {}", msg),
            CompletionProviderError::InvalidResponse(msg) => {
                write!(f, "Invalid response: {}", msg)
            }
            CompletionProviderError::ServiceUnavailable => write!(f, "Service unavailable"),
        }
    }
}

impl std::error::Error for CompletionProviderError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

/// One message of the structured generation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// External language-model completion service. The pipeline is agnostic to
/// which provider sits behind this trait.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, CompletionProviderError>;
}
