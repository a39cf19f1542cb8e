//! OpenRouter API client implementation.
//!
//! One request per call. The client reports what the upstream said and leaves
//! interpretation to the gateway.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use super::error::LlmError;
use super::{ChatMessage, LlmClient, RawCompletion};

/// OpenRouter API client.
pub struct OpenRouterClient {
    client: Client,
    api_key: String,
    api_url: String,
}

impl OpenRouterClient {
    /// Create a client for an OpenAI-compatible chat-completion endpoint.
    pub fn new(api_key: String, api_url: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            api_url,
        }
    }
}

#[async_trait]
impl LlmClient for OpenRouterClient {
    async fn chat_completion(
        &self,
        model: &str,
        messages: &[ChatMessage],
    ) -> Result<RawCompletion, LlmError> {
        let request = OpenRouterRequest {
            model,
            messages,
        };

        tracing::debug!("Sending request to OpenRouter: model={}", model);

        let response = match self
            .client
            .post(&self.api_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => {
                if e.is_timeout() {
                    return Err(LlmError::network_error(format!("Request timeout: {}", e)));
                } else if e.is_connect() {
                    return Err(LlmError::network_error(format!("Connection failed: {}", e)));
                } else {
                    return Err(LlmError::network_error(format!("Request failed: {}", e)));
                }
            }
        };

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| LlmError::network_error(format!("Failed to read response: {}", e)))?;

        let payload: serde_json::Value = serde_json::from_str(&body).map_err(|e| {
            LlmError::parse_error(
                status,
                format!("Failed to parse response: {}, body: {}", e, body),
            )
        })?;

        Ok(RawCompletion::new(status, payload))
    }
}

/// OpenRouter API request format.
#[derive(Debug, Serialize)]
struct OpenRouterRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
}
