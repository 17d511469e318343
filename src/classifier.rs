//! Remote LLM classifier for question-to-filter resolution.
//!
//! The remote classifier has the same contract as the rule resolver but is
//! fallible: transport errors, bad HTTP statuses, and malformed replies all
//! surface as `AgentError::ClassifierError`, and the agent recovers by
//! falling back to the rules.

use crate::schema::SCHEMA_DESCRIPTION;
use crate::types::{AgentError, Column, ParsedQuery, Result};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-4-turbo";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Question classifier contract: text in, column/value filter out, fallible.
#[async_trait]
pub trait Classifier: Send + Sync {
    async fn classify(&self, question: &str) -> Result<ParsedQuery>;
}

/// OpenAI chat-completions response envelope.
#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: String,
}

/// The structured reply the model must produce: exactly two string fields.
/// Any extra field or wrong type is a parse failure.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ClassifierReply {
    target_column: String,
    filter_value: String,
}

/// LLM-backed classifier over an OpenAI-compatible chat-completions API.
pub struct RemoteClassifier {
    api_key: String,
    model: String,
    base_url: String,
    client: reqwest::Client,
}

impl RemoteClassifier {
    /// Create a new classifier with a bounded request timeout.
    ///
    /// # Errors
    ///
    /// Returns `AgentError::ConfigError` if the HTTP client cannot be built.
    pub fn new(api_key: String, model: String) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| AgentError::ConfigError(format!("HTTP client error: {}", e)))?;

        Ok(Self {
            api_key,
            model,
            base_url: DEFAULT_BASE_URL.to_string(),
            client,
        })
    }

    /// Create from environment variables.
    ///
    /// Uses `ADAE_DEFAULT_LLM` for the model (default: "gpt-4-turbo") and
    /// `OPENAI_API_KEY` for the key.
    ///
    /// # Errors
    ///
    /// Returns `AgentError::ConfigError` if the API key is not set.
    pub fn from_env() -> Result<Self> {
        let model =
            std::env::var("ADAE_DEFAULT_LLM").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        let api_key = std::env::var("OPENAI_API_KEY").map_err(|_| {
            AgentError::ConfigError("OPENAI_API_KEY environment variable not set".to_string())
        })?;

        Self::new(api_key, model)
    }

    /// Override the API base URL (OpenAI-compatible gateways, tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Strip markdown code blocks from an LLM response.
    ///
    /// Handles:
    /// - ```json ... ```
    /// - ```JSON ... ```
    /// - ``` ... ```
    ///
    /// An unclosed fence is left alone: `rfind` would land on the opening
    /// fence and invert the range. The caller's JSON parse rejects it.
    fn strip_markdown(text: &str) -> &str {
        let text = text.trim();

        if text.starts_with("```") {
            let start = text.find('\n').map(|i| i + 1).unwrap_or(0);
            let end = text.rfind("```").unwrap_or(text.len());
            if end > start {
                return text[start..end].trim();
            }
        }

        text
    }

    /// Parse the model's reply into a query.
    ///
    /// # Errors
    ///
    /// Returns `AgentError::ClassifierError` if the reply is not exactly
    /// `{"target_column": ..., "filter_value": ...}` or names a column
    /// outside the filterable set.
    fn parse_reply(text: &str) -> Result<ParsedQuery> {
        let stripped = Self::strip_markdown(text);

        let reply: ClassifierReply = serde_json::from_str(stripped)
            .map_err(|e| AgentError::ClassifierError(format!("Malformed reply: {}", e)))?;

        let column: Column = reply.target_column.parse().map_err(|_| {
            AgentError::ClassifierError(format!(
                "Reply names unknown column: {}",
                reply.target_column
            ))
        })?;

        Ok(ParsedQuery::new(column, reply.filter_value))
    }

    /// Call the chat-completions endpoint and return the raw message text.
    async fn call_llm(&self, question: &str) -> Result<String> {
        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&json!({
                "model": self.model,
                "messages": [
                    {"role": "system", "content": SCHEMA_DESCRIPTION},
                    {"role": "user", "content": format!("Question: {}", question)}
                ],
                "response_format": {"type": "json_object"},
                "temperature": 0.1
            }))
            .send()
            .await
            .map_err(|e| AgentError::ClassifierError(format!("API request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AgentError::ClassifierError(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            return Err(AgentError::ClassifierError(format!(
                "API error {}: {}",
                status, body
            )));
        }

        let parsed: ChatResponse = serde_json::from_str(&body)
            .map_err(|e| AgentError::ClassifierError(format!("Failed to parse response: {}", e)))?;

        Ok(parsed
            .choices
            .first()
            .ok_or_else(|| AgentError::ClassifierError("No choices in response".to_string()))?
            .message
            .content
            .clone())
    }
}

#[async_trait]
impl Classifier for RemoteClassifier {
    async fn classify(&self, question: &str) -> Result<ParsedQuery> {
        let text = self.call_llm(question).await?;
        Self::parse_reply(&text)
    }
}
