// SPDX-FileCopyrightText: 2026 Carousel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Image search collaborator trait.

use async_trait::async_trait;

use crate::error::CarouselError;
use crate::traits::adapter::Adapter;
use crate::types::MediaReference;

/// Adapter for the external image search collaborator.
///
/// Used as the fallback content source when a "show me" trigger names a
/// folder with no stored items.
#[async_trait]
pub trait ImageSearch: Adapter {
    /// Search for an image matching `term`.
    ///
    /// `safe_mode` controls content filtering; the dispatcher derives it
    /// from a literal `"nsfw "` prefix on the search key.
    async fn search(
        &self,
        term: &str,
        safe_mode: bool,
    ) -> Result<MediaReference, CarouselError>;
}
