// SPDX-FileCopyrightText: 2026 Carousel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Anthropic Messages API implementation of the `TextGenerator` trait.
//!
//! The engine's generation contract is a bounded single-shot
//! `generate(prompt) -> text` with fixed sampling parameters; both the
//! bounds and the parameters come from `[generation]` config.

pub mod client;
pub mod types;

use async_trait::async_trait;

use carousel_config::model::GenerationConfig;
use carousel_core::types::{AdapterType, HealthStatus};
use carousel_core::{Adapter, CarouselError, TextGenerator};

use crate::client::AnthropicClient;
use crate::types::{ApiMessage, MessageRequest};

/// `TextGenerator` backed by the Anthropic Messages API.
#[derive(Debug)]
pub struct AnthropicGenerator {
    client: AnthropicClient,
    model: String,
    max_tokens: u32,
    temperature: f64,
    top_p: f64,
    top_k: u32,
}

impl AnthropicGenerator {
    /// Build a generator from configuration.
    ///
    /// Fails with a config error when no API key is set; the caller decides
    /// whether to run without the collaborator instead.
    pub fn new(config: &GenerationConfig) -> Result<Self, CarouselError> {
        let api_key = config.api_key.as_deref().ok_or_else(|| {
            CarouselError::Config("generation.api_key is not set".to_string())
        })?;
        let client = AnthropicClient::new(api_key, &config.api_version)?;
        Ok(Self::with_client(client, config))
    }

    /// Build a generator around an existing client (used by tests).
    pub fn with_client(client: AnthropicClient, config: &GenerationConfig) -> Self {
        Self {
            client,
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
            top_p: config.top_p,
            top_k: config.top_k,
        }
    }

    fn to_message_request(&self, prompt: &str) -> MessageRequest {
        MessageRequest {
            model: self.model.clone(),
            messages: vec![ApiMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            top_p: self.top_p,
            top_k: self.top_k,
            stream: false,
        }
    }
}

#[async_trait]
impl Adapter for AnthropicGenerator {
    fn name(&self) -> &str {
        "anthropic"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::TextGeneration
    }

    async fn health_check(&self) -> Result<HealthStatus, CarouselError> {
        // No cheap ping endpoint exists; a constructed client is usable.
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), CarouselError> {
        Ok(())
    }
}

#[async_trait]
impl TextGenerator for AnthropicGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, CarouselError> {
        let request = self.to_message_request(prompt);
        let response = self.client.complete_message(&request).await?;
        let text = response.text();
        if text.trim().is_empty() {
            return Err(CarouselError::Collaborator {
                message: "model returned no text".to_string(),
                source: None,
            });
        }
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config() -> GenerationConfig {
        GenerationConfig {
            api_key: Some("test-api-key".to_string()),
            ..GenerationConfig::default()
        }
    }

    fn test_generator(base_url: &str) -> AnthropicGenerator {
        let client = AnthropicClient::new("test-api-key", "2023-06-01")
            .unwrap()
            .with_base_url(base_url.to_string());
        AnthropicGenerator::with_client(client, &test_config())
    }

    #[test]
    fn new_requires_api_key() {
        let config = GenerationConfig::default();
        let err = AnthropicGenerator::new(&config).unwrap_err();
        assert!(matches!(err, CarouselError::Config(_)));
    }

    #[test]
    fn adapter_metadata() {
        let generator = AnthropicGenerator::new(&test_config()).unwrap();
        assert_eq!(generator.name(), "anthropic");
        assert_eq!(generator.adapter_type(), AdapterType::TextGeneration);
        assert_eq!(generator.version(), semver::Version::new(0, 1, 0));
    }

    #[test]
    fn request_carries_configured_sampling_parameters() {
        let generator = AnthropicGenerator::new(&test_config()).unwrap();
        let request = generator.to_message_request("tell me a story");
        assert_eq!(request.max_tokens, 500);
        assert_eq!(request.temperature, 0.7);
        assert_eq!(request.top_p, 0.95);
        assert_eq!(request.top_k, 40);
        assert_eq!(request.messages.len(), 1);
        assert_eq!(request.messages[0].content, "tell me a story");
    }

    #[tokio::test]
    async fn generate_returns_completion_text() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/"))
            .and(body_partial_json(serde_json::json!({
                "max_tokens": 500,
                "temperature": 0.7,
                "top_p": 0.95,
                "top_k": 40,
                "stream": false
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "msg_gen",
                "type": "message",
                "role": "assistant",
                "content": [{"type": "text", "text": "Once upon a time."}],
                "model": "claude-haiku-4-5-20250901",
                "stop_reason": "end_turn",
                "usage": {"input_tokens": 8, "output_tokens": 6}
            })))
            .mount(&server)
            .await;

        let generator = test_generator(&server.uri());
        let text = generator.generate("tell me a story").await.unwrap();
        assert_eq!(text, "Once upon a time.");
    }

    #[tokio::test]
    async fn generate_rejects_empty_completions() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "msg_empty",
                "type": "message",
                "role": "assistant",
                "content": [],
                "model": "claude-haiku-4-5-20250901",
                "stop_reason": "end_turn",
                "usage": {"input_tokens": 8, "output_tokens": 0}
            })))
            .mount(&server)
            .await;

        let generator = test_generator(&server.uri());
        let err = generator.generate("say nothing").await.unwrap_err();
        assert!(matches!(err, CarouselError::Collaborator { .. }));
    }
}
