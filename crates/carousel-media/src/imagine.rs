// SPDX-FileCopyrightText: 2026 Carousel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP image generation collaborator.
//!
//! Wire contract: `POST <endpoint>` with
//! `{"prompt": "...", "input_url": "..."?}` returning
//! `{"images": ["<url>", ...]}`. Zero images is a valid response.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use carousel_core::types::{AdapterType, HealthStatus, MediaReference};
use carousel_core::{Adapter, CarouselError, ImageGenerator};

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    prompt: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    input_url: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    images: Vec<String>,
}

/// `ImageGenerator` backed by a configurable HTTP endpoint.
pub struct HttpImageGenerator {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpImageGenerator {
    /// Build a generation client against `endpoint`.
    pub fn new(endpoint: impl Into<String>) -> Result<Self, CarouselError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .map_err(|e| CarouselError::Collaborator {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl Adapter for HttpImageGenerator {
    fn name(&self) -> &str {
        "http-image-generator"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::ImageGeneration
    }

    async fn health_check(&self) -> Result<HealthStatus, CarouselError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), CarouselError> {
        Ok(())
    }
}

#[async_trait]
impl ImageGenerator for HttpImageGenerator {
    async fn generate(
        &self,
        prompt: &str,
        input: Option<&MediaReference>,
    ) -> Result<Vec<MediaReference>, CarouselError> {
        let request = GenerateRequest {
            prompt,
            input_url: input.map(|m| m.url.as_str()),
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| CarouselError::Collaborator {
                message: format!("image generation request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CarouselError::Collaborator {
                message: format!("image generation returned {status}: {body}"),
                source: None,
            });
        }

        let parsed: GenerateResponse =
            response.json().await.map_err(|e| CarouselError::Collaborator {
                message: format!("failed to parse image generation response: {e}"),
                source: Some(Box::new(e)),
            })?;
        debug!(prompt, count = parsed.images.len(), "image generation complete");
        Ok(parsed
            .images
            .into_iter()
            .map(|url| MediaReference { url })
            .collect())
    }
}
