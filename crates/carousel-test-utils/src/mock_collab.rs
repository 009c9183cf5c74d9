// SPDX-FileCopyrightText: 2026 Carousel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock collaborators: image search, generators, and a failing store.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use carousel_core::types::{
    AdapterType, FolderMeta, HealthStatus, Item, ItemPage, ItemUpdate, MediaReference,
    NewItem, RegisteredActor, SortOrder,
};
use carousel_core::{
    Adapter, CarouselError, ContentStore, ImageGenerator, ImageSearch, TextGenerator,
};

fn mock_adapter_version() -> semver::Version {
    semver::Version::new(0, 1, 0)
}

/// An image search collaborator returning a fixed result, recording calls.
pub struct StaticImageSearch {
    url: String,
    fail: bool,
    calls: Arc<Mutex<Vec<(String, bool)>>>,
}

impl StaticImageSearch {
    /// Always resolves searches to `url`.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            fail: false,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// A search collaborator whose every call fails.
    pub fn failing() -> Self {
        Self {
            url: String::new(),
            fail: true,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Recorded `(term, safe_mode)` pairs, in call order.
    pub async fn calls(&self) -> Vec<(String, bool)> {
        self.calls.lock().await.clone()
    }
}

#[async_trait]
impl Adapter for StaticImageSearch {
    fn name(&self) -> &str {
        "mock-image-search"
    }

    fn version(&self) -> semver::Version {
        mock_adapter_version()
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
impl ImageSearch for StaticImageSearch {
    async fn search(
        &self,
        term: &str,
        safe_mode: bool,
    ) -> Result<MediaReference, CarouselError> {
        self.calls.lock().await.push((term.to_string(), safe_mode));
        if self.fail {
            return Err(CarouselError::Collaborator {
                message: "mock image search failure".to_string(),
                source: None,
            });
        }
        Ok(MediaReference {
            url: self.url.clone(),
        })
    }
}

/// A text generator returning a fixed reply, recording prompts.
pub struct StaticTextGenerator {
    reply: String,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl StaticTextGenerator {
    /// Always replies with `reply`.
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Prompts received, in call order.
    pub async fn prompts(&self) -> Vec<String> {
        self.prompts.lock().await.clone()
    }
}

#[async_trait]
impl Adapter for StaticTextGenerator {
    fn name(&self) -> &str {
        "mock-text-generator"
    }

    fn version(&self) -> semver::Version {
        mock_adapter_version()
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::TextGeneration
    }

    async fn health_check(&self) -> Result<HealthStatus, CarouselError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), CarouselError> {
        Ok(())
    }
}

#[async_trait]
impl TextGenerator for StaticTextGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, CarouselError> {
        self.prompts.lock().await.push(prompt.to_string());
        Ok(self.reply.clone())
    }
}

/// An image generator returning fixed images, recording prompts and inputs.
pub struct StaticImageGenerator {
    images: Vec<MediaReference>,
    calls: Arc<Mutex<Vec<(String, Option<MediaReference>)>>>,
}

impl StaticImageGenerator {
    /// Always generates the given images.
    pub fn new(urls: impl IntoIterator<Item = &'static str>) -> Self {
        Self {
            images: urls
                .into_iter()
                .map(|u| MediaReference { url: u.to_string() })
                .collect(),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Recorded `(prompt, conditioning input)` pairs, in call order.
    pub async fn calls(&self) -> Vec<(String, Option<MediaReference>)> {
        self.calls.lock().await.clone()
    }
}

#[async_trait]
impl Adapter for StaticImageGenerator {
    fn name(&self) -> &str {
        "mock-image-generator"
    }

    fn version(&self) -> semver::Version {
        mock_adapter_version()
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
impl ImageGenerator for StaticImageGenerator {
    async fn generate(
        &self,
        prompt: &str,
        input: Option<&MediaReference>,
    ) -> Result<Vec<MediaReference>, CarouselError> {
        self.calls
            .lock()
            .await
            .push((prompt.to_string(), input.cloned()));
        Ok(self.images.clone())
    }
}

/// A content store whose every operation fails, for store-error paths.
pub struct FailingStore;

impl FailingStore {
    fn err(&self) -> CarouselError {
        CarouselError::Store {
            source: "mock store failure".into(),
        }
    }
}

#[async_trait]
impl Adapter for FailingStore {
    fn name(&self) -> &str {
        "failing-store"
    }

    fn version(&self) -> semver::Version {
        mock_adapter_version()
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Store
    }

    async fn health_check(&self) -> Result<HealthStatus, CarouselError> {
        Ok(HealthStatus::Unhealthy("always fails".to_string()))
    }

    async fn shutdown(&self) -> Result<(), CarouselError> {
        Ok(())
    }
}

#[async_trait]
impl ContentStore for FailingStore {
    async fn initialize(&self) -> Result<(), CarouselError> {
        Err(self.err())
    }

    async fn close(&self) -> Result<(), CarouselError> {
        Err(self.err())
    }

    async fn items_by_recency(
        &self,
        _folder: &str,
        _order: SortOrder,
        _limit: Option<u32>,
    ) -> Result<ItemPage, CarouselError> {
        Err(self.err())
    }

    async fn create_item(&self, _new: NewItem) -> Result<Item, CarouselError> {
        Err(self.err())
    }

    async fn update_item(&self, _id: &str, _update: ItemUpdate) -> Result<(), CarouselError> {
        Err(self.err())
    }

    async fn folder_meta(&self, _folder: &str) -> Result<Option<FolderMeta>, CarouselError> {
        Err(self.err())
    }

    async fn create_folder_meta(
        &self,
        _folder: &str,
        _seen: bool,
    ) -> Result<FolderMeta, CarouselError> {
        Err(self.err())
    }

    async fn update_folder_meta(&self, _folder: &str, _seen: bool) -> Result<(), CarouselError> {
        Err(self.err())
    }

    async fn folder_meta_by_recency(
        &self,
        _prefix: Option<&str>,
        _order: SortOrder,
        _limit: u32,
    ) -> Result<Vec<FolderMeta>, CarouselError> {
        Err(self.err())
    }

    async fn registered_actor(
        &self,
        _username: &str,
    ) -> Result<Option<RegisteredActor>, CarouselError> {
        Err(self.err())
    }
}
