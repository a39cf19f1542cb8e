//! LLM client module for interacting with language models.
//!
//! This module provides a trait-based abstraction over chat-completion
//! providers, with OpenRouter as the primary implementation.
//!
//! Clients hand back the upstream status and JSON payload untouched; deciding
//! what a non-success status or an odd payload shape means is left to the
//! caller.

mod error;
mod openrouter;

pub use error::{classify_http_status, LlmError, LlmErrorKind};
pub use openrouter::OpenRouterClient;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Role in a chat conversation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
}

/// A message in a chat conversation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    /// Create a simple text message.
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        ChatMessage {
            role,
            content: content.into(),
        }
    }

    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }
}

/// Upstream reply as received: HTTP status plus the decoded JSON body.
#[derive(Debug, Clone)]
pub struct RawCompletion {
    pub status: u16,
    pub payload: serde_json::Value,
}

impl RawCompletion {
    pub fn new(status: u16, payload: serde_json::Value) -> Self {
        Self { status, payload }
    }

    /// Whether the upstream answered with a 2xx status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Trait for LLM clients.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Send a single chat completion request.
    ///
    /// Errors are reserved for transport failures and undecodable bodies;
    /// an upstream error status is still returned as `Ok`.
    async fn chat_completion(
        &self,
        model: &str,
        messages: &[ChatMessage],
    ) -> Result<RawCompletion, LlmError>;
}
