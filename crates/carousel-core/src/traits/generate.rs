// SPDX-FileCopyrightText: 2026 Carousel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Text and image generation collaborator traits.

use async_trait::async_trait;

use crate::error::CarouselError;
use crate::traits::adapter::Adapter;
use crate::types::MediaReference;

/// Adapter for the external text-generation collaborator.
///
/// Output length is bounded and sampling parameters are fixed by
/// configuration; both are implementation concerns behind this seam.
#[async_trait]
pub trait TextGenerator: Adapter {
    /// Generate a text completion for `prompt`.
    async fn generate(&self, prompt: &str) -> Result<String, CarouselError>;
}

/// Adapter for the external image-generation collaborator.
#[async_trait]
pub trait ImageGenerator: Adapter {
    /// Generate zero or more images for `prompt`, optionally conditioned
    /// on an input image.
    async fn generate(
        &self,
        prompt: &str,
        input: Option<&MediaReference>,
    ) -> Result<Vec<MediaReference>, CarouselError>;
}
