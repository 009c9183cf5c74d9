// SPDX-FileCopyrightText: 2026 Carousel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter trait definitions for all external collaborators.

pub mod adapter;
pub mod channel;
pub mod generate;
pub mod random;
pub mod search;
pub mod store;

pub use adapter::Adapter;
pub use channel::Channel;
pub use generate::{ImageGenerator, TextGenerator};
pub use random::{RandomSource, ThreadRngSource};
pub use search::ImageSearch;
pub use store::ContentStore;

use async_trait::async_trait;

use crate::error::CarouselError;
use crate::types::{AdapterType, HealthStatus, MediaReference};

/// Placeholder collaborator used when an optional integration has no
/// endpoint or credentials configured. Every call fails with a
/// collaborator error, which trigger handlers convert into the generic
/// user-facing failure message.
#[derive(Debug, Default, Clone, Copy)]
pub struct Unconfigured;

impl Unconfigured {
    fn unavailable(&self) -> CarouselError {
        CarouselError::Collaborator {
            message: "collaborator not configured".to_string(),
            source: None,
        }
    }
}

#[async_trait]
impl Adapter for Unconfigured {
    fn name(&self) -> &str {
        "unconfigured"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::TextGeneration
    }

    async fn health_check(&self) -> Result<HealthStatus, CarouselError> {
        Ok(HealthStatus::Unhealthy("not configured".to_string()))
    }

    async fn shutdown(&self) -> Result<(), CarouselError> {
        Ok(())
    }
}

#[async_trait]
impl ImageSearch for Unconfigured {
    async fn search(
        &self,
        _term: &str,
        _safe_mode: bool,
    ) -> Result<MediaReference, CarouselError> {
        Err(self.unavailable())
    }
}

#[async_trait]
impl TextGenerator for Unconfigured {
    async fn generate(&self, _prompt: &str) -> Result<String, CarouselError> {
        Err(self.unavailable())
    }
}

#[async_trait]
impl ImageGenerator for Unconfigured {
    async fn generate(
        &self,
        _prompt: &str,
        _input: Option<&MediaReference>,
    ) -> Result<Vec<MediaReference>, CarouselError> {
        Err(self.unavailable())
    }
}
