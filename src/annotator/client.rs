//! Thin typed client for an OpenAI-compatible chat-completions endpoint.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::config::ServiceConfig;
use crate::types::PipelineError;

/// Narrow capability the pipeline needs from a language-model service.
///
/// Keeping the surface to a single prompt-in/text-out call lets the
/// orchestrator and verifier run against deterministic fakes in tests while
/// production wires in [`ChatClient`].
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn submit(&self, prompt: &str) -> Result<String, PipelineError>;
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
    stream: bool,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    #[serde(default)]
    content: String,
}

/// Blocking-per-call chat client with a fixed request timeout.
///
/// Every knob that changes the response shape (model, temperature, output
/// ceiling, timeout) comes from [`ServiceConfig`]; nothing is hard-coded.
#[derive(Clone, Debug)]
pub struct ChatClient {
    http: Client,
    endpoint: Url,
    config: ServiceConfig,
}

impl ChatClient {
    pub fn new(config: ServiceConfig) -> Result<Self, PipelineError> {
        let endpoint = Url::parse(&format!("{}/chat/completions", config.base_url()))
            .map_err(|err| PipelineError::Config(err.to_string()))?;
        let http = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            http,
            endpoint,
            config,
        })
    }

    /// Fully resolved chat-completions URL this client posts to.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl CompletionProvider for ChatClient {
    async fn submit(&self, prompt: &str) -> Result<String, PipelineError> {
        let body = ChatRequest {
            model: &self.config.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
            stream: false,
        };
        let response = self
            .http
            .post(self.endpoint.clone())
            .json(&body)
            .send()
            .await?
            .error_for_status()?;
        let parsed: ChatResponse = response.json().await?;
        let content = parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .unwrap_or_default();
        Ok(content.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_is_derived_from_config() {
        let config = ServiceConfig {
            host: "127.0.0.1".to_string(),
            port: 9999,
            ..Default::default()
        };
        let client = ChatClient::new(config).unwrap();
        assert_eq!(
            client.endpoint().as_str(),
            "http://127.0.0.1:9999/v1/chat/completions"
        );
    }

    #[test]
    fn reply_without_choices_deserializes_to_empty() {
        let parsed: ChatResponse = serde_json::from_str(r#"{"id":"x"}"#).unwrap();
        assert!(parsed.choices.is_empty());
    }
}
