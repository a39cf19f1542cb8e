//! Task generation gateway.
//!
//! Turns a goal into one upstream chat completion and the reply back into a
//! task list. Every failure is reported as a typed [`GenerationError`] that
//! serializes to the JSON error record clients receive.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::config::Config;
use crate::llm::{classify_http_status, ChatMessage, LlmClient, LlmError, OpenRouterClient};
use crate::task::{self, Depth, RecoverError};

/// Outcome of a generation request: the recovered JSON (normally an array of
/// tasks) or an error record.
pub type GenerationResult = Result<Value, GenerationError>;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("OPENROUTER_API_KEY is not configured on the server. Set the OPENROUTER_API_KEY environment variable")]
    MissingApiKey,

    #[error("OpenRouter API returned {status}")]
    RemoteApi { status: u16, remote: String },

    #[error("{source}")]
    Parse {
        source: RecoverError,
        raw: String,
        raw_response: Value,
    },

    /// Transport failure or an upstream body that is not JSON.
    #[error("{0}")]
    Upstream(#[from] LlmError),
}

impl GenerationError {
    /// Machine-readable error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            GenerationError::MissingApiKey => "missing_api_key",
            GenerationError::RemoteApi { .. } => "remote_api_error",
            GenerationError::Parse { .. } => "parse_error",
            GenerationError::Upstream(_) => "server_error",
        }
    }

    pub fn code(&self) -> Option<u16> {
        match self {
            GenerationError::MissingApiKey => Some(401),
            GenerationError::RemoteApi { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The JSON error record for this error.
    pub fn record(&self) -> ErrorRecord {
        let mut record = ErrorRecord::new(self.kind(), self.to_string());
        record.code = self.code();
        match self {
            GenerationError::RemoteApi { remote, .. } => {
                record.remote = Some(remote.clone());
            }
            GenerationError::Parse {
                raw, raw_response, ..
            } => {
                record.raw = Some(raw.clone());
                record.raw_response = Some(raw_response.clone());
            }
            _ => {}
        }
        record
    }
}

/// Error body returned to clients.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ErrorRecord {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
    #[serde(rename = "rawResponse", skip_serializing_if = "Option::is_none")]
    pub raw_response: Option<Value>,
}

impl ErrorRecord {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            code: None,
            remote: None,
            raw: None,
            raw_response: None,
        }
    }
}

/// Gateway between clients and the upstream chat-completion API.
///
/// `client` is `None` when no API key is configured; such a gateway answers
/// every request with [`GenerationError::MissingApiKey`].
pub struct TaskGateway {
    model: String,
    client: Option<Arc<dyn LlmClient>>,
}

impl TaskGateway {
    pub fn new(model: impl Into<String>, client: Option<Arc<dyn LlmClient>>) -> Self {
        Self {
            model: model.into(),
            client,
        }
    }

    /// Build the gateway for a loaded configuration.
    pub fn from_config(config: &Config) -> Self {
        let client = config.api_key.as_ref().map(|key| {
            Arc::new(OpenRouterClient::new(
                key.clone(),
                config.api_url.clone(),
            )) as Arc<dyn LlmClient>
        });
        Self::new(config.model.clone(), client)
    }

    /// Ask the upstream model for `depth` tasks toward `prompt`.
    pub async fn generate_tasks(&self, prompt: &str, depth: &Depth) -> GenerationResult {
        let Some(client) = self.client.as_ref() else {
            return Err(GenerationError::MissingApiKey);
        };

        let messages = [ChatMessage::user(task::build_prompt(prompt, depth))];
        tracing::debug!(model = %self.model, %depth, "Requesting task list");

        let completion = client.chat_completion(&self.model, &messages).await?;

        if !completion.is_success() {
            tracing::warn!(
                status = completion.status,
                kind = %classify_http_status(completion.status),
                "Upstream rejected task generation request"
            );
            return Err(GenerationError::RemoteApi {
                status: completion.status,
                remote: completion.payload.to_string(),
            });
        }

        let (shape, content) = task::extract_content(&completion.payload);
        tracing::debug!(?shape, "Extracted assistant content");

        match task::parse_assistant_json(&content) {
            Ok(value) => {
                match task::tasks_from_value(&value) {
                    Some(tasks) => tracing::info!("Generated {} tasks", tasks.len()),
                    None => tracing::info!("Upstream reply parsed but is not a task list"),
                }
                Ok(value)
            }
            Err(source) => {
                tracing::warn!("Could not recover JSON from upstream reply: {}", source);
                Err(GenerationError::Parse {
                    source,
                    raw: content,
                    raw_response: completion.payload,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::mock::MockLlmClient;
    use crate::llm::{RawCompletion, Role};
    use serde_json::json;

    fn gateway_with(mock: Arc<MockLlmClient>) -> TaskGateway {
        TaskGateway::new("test/model", Some(mock as Arc<dyn LlmClient>))
    }

    #[tokio::test]
    async fn test_well_formed_reply_is_returned() {
        let tasks = json!([
            { "task_number": 1, "task_title": "Research", "task_description": "Read up" },
            { "task_number": 2, "task_title": "Practice", "task_description": "Write code" }
        ]);
        let mock = Arc::new(MockLlmClient::replying_with_content(&tasks.to_string()));
        let gateway = gateway_with(Arc::clone(&mock));

        let result = gateway.generate_tasks("learn Rust", &Depth::new(2)).await.unwrap();
        assert_eq!(result, tasks);

        let calls = mock.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].model, "test/model");
        assert_eq!(calls[0].messages.len(), 1);
        assert_eq!(calls[0].messages[0].role, Role::User);
        assert!(calls[0].messages[0]
            .content
            .starts_with("Generate a list of 2 tasks to accomplish the following goal: learn Rust."));
    }

    #[tokio::test]
    async fn test_missing_api_key_skips_network() {
        let gateway = TaskGateway::new("test/model", None);
        let err = gateway.generate_tasks("anything", &Depth::new(5)).await.unwrap_err();
        assert!(matches!(err, GenerationError::MissingApiKey));

        let record = err.record();
        assert_eq!(record.error, "missing_api_key");
        assert_eq!(record.code, Some(401));
    }

    #[test]
    fn test_from_config_without_key_has_no_client() {
        let gateway = TaskGateway::from_config(&Config::new(None, "m".to_string()));
        assert!(gateway.client.is_none());
        assert_eq!(gateway.model, "m");

        let gateway = TaskGateway::from_config(&Config::new(Some("sk".to_string()), "m".to_string()));
        assert!(gateway.client.is_some());
    }

    #[tokio::test]
    async fn test_rate_limited_upstream() {
        let body = json!({ "error": { "message": "Rate limit exceeded", "code": 429 } });
        let mock = Arc::new(MockLlmClient::replying(429, body.clone()));
        let gateway = gateway_with(Arc::clone(&mock));

        let err = gateway.generate_tasks("goal", &Depth::new(5)).await.unwrap_err();
        let record = err.record();
        assert_eq!(record.error, "remote_api_error");
        assert_eq!(record.code, Some(429));
        assert_eq!(record.message, "OpenRouter API returned 429");
        assert_eq!(record.remote, Some(body.to_string()));
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn test_fenced_reply_is_recovered() {
        let content = "```json\n[{\"task_number\":1,\"task_title\":\"A\",\"task_description\":\"B\"}]\n```";
        let gateway = gateway_with(Arc::new(MockLlmClient::replying_with_content(content)));

        let result = gateway.generate_tasks("goal", &Depth::new(1)).await.unwrap();
        assert_eq!(
            result,
            json!([{ "task_number": 1, "task_title": "A", "task_description": "B" }])
        );
    }

    #[tokio::test]
    async fn test_single_quoted_reply_is_recovered() {
        let content = "[{'task_number':1,'task_title':'A','task_description':'B'}]";
        let gateway = gateway_with(Arc::new(MockLlmClient::replying_with_content(content)));

        let result = gateway.generate_tasks("goal", &Depth::new(1)).await.unwrap();
        let tasks = task::tasks_from_value(&result).unwrap();
        assert_eq!(
            tasks,
            vec![task::Task {
                task_number: 1,
                task_title: "A".to_string(),
                task_description: "B".to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn test_unparseable_reply_carries_diagnostics() {
        let payload = json!({
            "choices": [{ "message": { "content": "Sorry, I can't do that." } }]
        });
        let gateway = gateway_with(Arc::new(MockLlmClient::replying(200, payload.clone())));

        let err = gateway.generate_tasks("goal", &Depth::new(5)).await.unwrap_err();
        let record = err.record();
        assert_eq!(record.error, "parse_error");
        assert_eq!(record.message, "Failed to parse JSON from assistant response");
        assert_eq!(record.raw.as_deref(), Some("Sorry, I can't do that."));
        assert_eq!(record.raw_response, Some(payload));
        assert_eq!(record.code, None);
    }

    #[tokio::test]
    async fn test_transport_failure_is_server_error() {
        let mock = Arc::new(MockLlmClient::new(vec![Err(LlmError::network_error(
            "Connection failed".to_string(),
        ))]));
        let gateway = gateway_with(mock);

        let err = gateway.generate_tasks("goal", &Depth::new(5)).await.unwrap_err();
        assert_eq!(err.kind(), "server_error");
        assert!(err.to_string().contains("Connection failed"));
    }

    #[tokio::test]
    async fn test_alternate_envelope_is_used() {
        let payload = json!({ "output": [{ "content": "[{\"task_number\": 3}]" }] });
        let mock = MockLlmClient::new(vec![Ok(RawCompletion::new(200, payload))]);
        let gateway = gateway_with(Arc::new(mock));

        let result = gateway.generate_tasks("goal", &Depth::new(1)).await.unwrap();
        assert_eq!(result, json!([{ "task_number": 3 }]));
    }

    #[test]
    fn test_record_serialization_omits_absent_fields() {
        let value = serde_json::to_value(GenerationError::MissingApiKey.record()).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.get("error"), Some(&json!("missing_api_key")));
        assert_eq!(object.get("code"), Some(&json!(401)));
        assert!(!object.contains_key("raw"));
        assert!(!object.contains_key("rawResponse"));
    }
}
