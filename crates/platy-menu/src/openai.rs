//! OpenAI-compatible Chat Provider
//!
//! Implementation of [`ChatModel`] against the hosted chat-completions API.
//! JSON-object response format is requested so the model cannot wrap the
//! plan in prose.

use async_trait::async_trait;

use crate::error::{MenuError, Result};
use crate::provider::ChatModel;

/// Provider configuration
#[derive(Clone, Debug)]
pub struct OpenAiConfig {
    /// API key; an empty key makes every call fail, which the generate
    /// loop absorbs into the fallback path
    pub api_key: String,

    /// Model identifier
    pub model: String,

    /// API base URL
    pub base_url: String,

    /// Sampling temperature
    pub temperature: f32,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: "gpt-4o-mini".into(),
            base_url: "https://api.openai.com".into(),
            temperature: 0.5,
        }
    }
}

impl OpenAiConfig {
    /// Create from `OPENAI_API_KEY` / `OPENAI_API_MODEL`
    pub fn from_env() -> Self {
        let api_key = std::env::var("OPENAI_API_KEY").unwrap_or_default();
        if api_key.is_empty() {
            tracing::warn!("OPENAI_API_KEY not set - menu generation will use the fallback plan");
        }
        let model = std::env::var("OPENAI_API_MODEL").unwrap_or_else(|_| "gpt-4o-mini".into());

        Self {
            api_key,
            model,
            ..Default::default()
        }
    }
}

/// OpenAI-compatible chat client
pub struct OpenAiChat {
    http: reqwest::Client,
    config: OpenAiConfig,
}

impl OpenAiChat {
    pub fn from_config(config: OpenAiConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::from_config(OpenAiConfig::from_env())
    }
}

#[async_trait]
impl ChatModel for OpenAiChat {
    fn name(&self) -> &str {
        &self.config.model
    }

    async fn complete_json(&self, system: &str, user: &str) -> Result<String> {
        let body = serde_json::json!({
            "model": self.config.model,
            "temperature": self.config.temperature,
            "response_format": { "type": "json_object" },
            "messages": [
                { "role": "system", "content": system },
                { "role": "user", "content": user },
            ],
        });

        let response = self
            .http
            .post(format!("{}/v1/chat/completions", self.config.base_url))
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| MenuError::Provider(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(MenuError::Provider(format!("HTTP {status}")));
        }

        let envelope: serde_json::Value = response
            .json()
            .await
            .map_err(|e| MenuError::Provider(e.to_string()))?;

        envelope
            .pointer("/choices/0/message/content")
            .and_then(|c| c.as_str())
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .ok_or(MenuError::EmptyCompletion)
    }
}
