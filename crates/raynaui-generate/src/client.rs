//! Chat-completion transport.
//!
//! The engine talks to the model through [`CompletionClient`] so tests can
//! substitute a canned reply; [`AnthropicClient`] is the hosted implementation.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::EngineConfig;
use crate::errors::GenerateError;
use crate::prompt::Prompts;

const ANTHROPIC_VERSION: &str = "2023-06-01";
const USER_AGENT: &str = concat!("raynaui-ai/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

/// Body of a Messages API request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub system: String,
    pub messages: Vec<Message>,
}

impl CompletionRequest {
    /// Single-turn request: the system prompt plus one user message.
    pub fn new(config: &EngineConfig, prompts: Prompts) -> Self {
        Self {
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
            system: prompts.system,
            messages: vec![Message {
                role: Role::User,
                content: prompts.user,
            }],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Text {
        text: String,
    },
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionResponse {
    #[serde(default)]
    pub content: Vec<ContentBlock>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_reason: Option<String>,
}

impl CompletionResponse {
    /// Text of the first content block; any other leading block is rejected.
    pub fn first_text(&self) -> Result<&str, GenerateError> {
        match self.content.first() {
            Some(ContentBlock::Text { text }) => Ok(text.as_str()),
            Some(ContentBlock::Other) => Err(GenerateError::UnexpectedContent(
                "first content block is not text".to_string(),
            )),
            None => Err(GenerateError::UnexpectedContent(
                "response has no content".to_string(),
            )),
        }
    }
}

#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, GenerateError>;
}

/// Client for the hosted Messages API.
#[derive(Clone)]
pub struct AnthropicClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl AnthropicClient {
    pub fn new(base_url: &str, api_key: impl Into<String>) -> Result<Self, GenerateError> {
        let http = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            http,
            endpoint: format!("{}/v1/messages", base_url.trim_end_matches('/')),
            api_key: api_key.into(),
        })
    }

    pub fn from_config(config: &EngineConfig) -> Result<Self, GenerateError> {
        let api_key = config.require_api_key()?;
        Self::new(&config.base_url, api_key)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl fmt::Debug for AnthropicClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnthropicClient")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"***")
            .finish()
    }
}

#[async_trait]
impl CompletionClient for AnthropicClient {
    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, GenerateError> {
        tracing::debug!(
            event = "completion_request",
            endpoint = %self.endpoint,
            model = %request.model,
            max_tokens = request.max_tokens
        );

        let response = self
            .http
            .post(&self.endpoint)
            .header("content-type", "application/json")
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("x-api-key", &self.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GenerateError::Api {
                status: status.as_u16(),
                message: api_error_message(&body),
            });
        }

        let parsed: CompletionResponse = response.json().await?;
        tracing::debug!(
            event = "completion_response",
            blocks = parsed.content.len(),
            stop_reason = parsed.stop_reason.as_deref().unwrap_or("none")
        );
        Ok(parsed)
    }
}

/// Pull `error.message` out of an API error body, falling back to the raw text.
fn api_error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| {
            value
                .pointer("/error/message")
                .and_then(Value::as_str)
                .map(str::to_string)
        })
        .unwrap_or_else(|| {
            let trimmed = body.trim();
            if trimmed.is_empty() {
                "unknown error".to_string()
            } else {
                trimmed.to_string()
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_messages_shape() {
        let prompts = Prompts {
            system: "sys".to_string(),
            user: "hello".to_string(),
        };
        let request = CompletionRequest::new(&EngineConfig::default(), prompts);
        let value = serde_json::to_value(&request).expect("serialize");

        assert_eq!(value["model"], "claude-3-5-sonnet-20241022");
        assert_eq!(value["max_tokens"], 4000);
        assert_eq!(value["system"], "sys");
        assert_eq!(value["messages"][0]["role"], "user");
        assert_eq!(value["messages"][0]["content"], "hello");
    }

    #[test]
    fn first_block_must_be_text() {
        let response: CompletionResponse = serde_json::from_str(
            r#"{"content":[{"type":"tool_use","id":"x","name":"y","input":{}},{"type":"text","text":"hi"}]}"#,
        )
        .expect("parse");
        assert!(matches!(
            response.first_text(),
            Err(GenerateError::UnexpectedContent(_))
        ));

        let response: CompletionResponse =
            serde_json::from_str(r#"{"content":[{"type":"text","text":"hi"}],"stop_reason":"end_turn"}"#)
                .expect("parse");
        assert_eq!(response.first_text().expect("text"), "hi");
    }

    #[test]
    fn api_error_message_prefers_structured_body() {
        assert_eq!(
            api_error_message(r#"{"type":"error","error":{"type":"authentication_error","message":"invalid x-api-key"}}"#),
            "invalid x-api-key"
        );
        assert_eq!(api_error_message("  gateway down "), "gateway down");
        assert_eq!(api_error_message(""), "unknown error");
    }

    #[test]
    fn endpoint_ignores_trailing_slash() {
        let client = AnthropicClient::new("http://localhost:9/", "sk-secret").expect("client");
        assert_eq!(client.endpoint(), "http://localhost:9/v1/messages");
        assert!(!format!("{client:?}").contains("sk-secret"));
    }
}
