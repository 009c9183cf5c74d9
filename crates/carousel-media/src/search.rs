// SPDX-FileCopyrightText: 2026 Carousel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP image search collaborator.
//!
//! Wire contract: `GET <endpoint>?q=<term>&safe=<bool>` returning
//! `{"url": "<image url>"}`.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use carousel_core::types::{AdapterType, HealthStatus, MediaReference};
use carousel_core::{Adapter, CarouselError, ImageSearch};

#[derive(Debug, Deserialize)]
struct SearchResponse {
    url: String,
}

/// `ImageSearch` backed by a configurable HTTP endpoint.
pub struct HttpImageSearch {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpImageSearch {
    /// Build a search client against `endpoint`.
    pub fn new(endpoint: impl Into<String>) -> Result<Self, CarouselError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
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
impl Adapter for HttpImageSearch {
    fn name(&self) -> &str {
        "http-image-search"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::ImageSearch
    }

    async fn health_check(&self) -> Result<HealthStatus, CarouselError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), CarouselError> {
        Ok(())
    }
}

#[async_trait]
impl ImageSearch for HttpImageSearch {
    async fn search(
        &self,
        term: &str,
        safe_mode: bool,
    ) -> Result<MediaReference, CarouselError> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("q", term), ("safe", if safe_mode { "true" } else { "false" })])
            .send()
            .await
            .map_err(|e| CarouselError::Collaborator {
                message: format!("image search request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CarouselError::Collaborator {
                message: format!("image search returned {status}: {body}"),
                source: None,
            });
        }

        let parsed: SearchResponse =
            response.json().await.map_err(|e| CarouselError::Collaborator {
                message: format!("failed to parse image search response: {e}"),
                source: Some(Box::new(e)),
            })?;
        debug!(term, safe_mode, url = %parsed.url, "image search hit");
        Ok(MediaReference { url: parsed.url })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn search_sends_term_and_safe_flag() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("q", "nsfw cat"))
            .and(query_param("safe", "false"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "url": "https://img.example/cat.png"
            })))
            .mount(&server)
            .await;

        let search = HttpImageSearch::new(format!("{}/search", server.uri())).unwrap();
        let media = search.search("nsfw cat", false).await.unwrap();
        assert_eq!(media.url, "https://img.example/cat.png");
    }

    #[tokio::test]
    async fn search_surfaces_http_failures() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(502))
            .mount(&server)
            .await;

        let search = HttpImageSearch::new(format!("{}/search", server.uri())).unwrap();
        let err = search.search("dog", true).await.unwrap_err();
        assert!(matches!(err, CarouselError::Collaborator { .. }));
    }
}
