//! HTTP chat-completions gateway.
//!
//! Posts the rendered prompt to an OpenAI-compatible `/chat/completions`
//! endpoint and extracts the first choice's message text.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;

use charla_core::config::GatewayConfig;

use crate::error::{GatewayError, Result};
use crate::provider::AnswerGateway;

pub struct HttpGateway {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl HttpGateway {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o-mini".to_string(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Build a gateway from configuration, reading the API key from the
    /// configured environment variable.
    pub fn from_config(config: &GatewayConfig) -> Result<Self> {
        let api_key = std::env::var(&config.api_key_env)
            .map_err(|_| GatewayError::MissingApiKey(config.api_key_env.clone()))?;
        Ok(Self::new(api_key)
            .with_base_url(config.base_url.clone())
            .with_model(config.model.clone()))
    }
}

#[async_trait]
impl AnswerGateway for HttpGateway {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let body = json!({
            "model": self.model,
            "messages": [{ "role": "user", "content": prompt }],
        });

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(GatewayError::Api(format!("HTTP {}: {}", status, text)));
        }

        let payload: serde_json::Value = response.json().await?;
        let answer = payload["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| GatewayError::Api("response has no message content".to_string()))?;

        Ok(answer.to_string())
    }
}
