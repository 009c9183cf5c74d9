// SPDX-FileCopyrightText: 2026 Carousel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Weighted item selection.
//!
//! The `seen` flag never gates selection -- it records delivery history for
//! external consumers. The anti-repetition mechanism is the ascending
//! `updated_at` window: rewriting a delivered item bumps its `updated_at`,
//! which mechanically deprioritizes it on subsequent draws.

use std::sync::Arc;

use tracing::warn;

use carousel_core::types::{Item, ItemUpdate, SortOrder};
use carousel_core::{CarouselError, ContentStore, RandomSource};

use crate::freshness::FolderFreshness;

/// Picks one item from a folder, flips its rotation marker, and returns its
/// text.
pub struct ItemSelector {
    store: Arc<dyn ContentStore>,
    random: Arc<dyn RandomSource>,
    freshness: FolderFreshness,
    fallback_attribution: String,
}

impl ItemSelector {
    pub fn new(
        store: Arc<dyn ContentStore>,
        random: Arc<dyn RandomSource>,
        fallback_attribution: impl Into<String>,
    ) -> Self {
        Self {
            freshness: FolderFreshness::new(store.clone()),
            store,
            random,
            fallback_attribution: fallback_attribution.into(),
        }
    }

    /// Select one item from `folder` and return its text.
    ///
    /// Returns `NoContent` for an empty folder. Store failures are logged
    /// and also surface as `NoContent`, so callers can fall back to an
    /// alternate content source without distinguishing the two.
    pub async fn select(&self, folder: &str) -> Result<String, CarouselError> {
        match self.select_inner(folder).await {
            Ok(text) => Ok(text),
            Err(err) if err.is_no_content() => Err(err),
            Err(err) => {
                warn!(folder, error = %err, "selection failed, reporting no content");
                Err(CarouselError::NoContent {
                    folder: folder.to_string(),
                })
            }
        }
    }

    async fn select_inner(&self, folder: &str) -> Result<String, CarouselError> {
        // Full descending scan: yields the total count and the fresh subset
        // (items never delivered since creation).
        let all = self
            .store
            .items_by_recency(folder, SortOrder::Descending, None)
            .await?;
        if all.total == 0 {
            return Err(CarouselError::NoContent {
                folder: folder.to_string(),
            });
        }
        let fresh: Vec<&Item> = all.items.iter().filter(|i| i.is_fresh()).collect();

        // Stale-first candidate window: the least-recently-delivered items.
        let window_limit = if all.total <= 2 { 1 } else { 2 };
        let window = self
            .store
            .items_by_recency(folder, SortOrder::Ascending, Some(window_limit))
            .await?;
        if window.items.is_empty() {
            // Unreachable while total > 0; guard kept for parity.
            return Err(CarouselError::NoContent {
                folder: folder.to_string(),
            });
        }

        let mut chosen = &window.items[self.random.pick(window.items.len())];

        // Fresh items get a 50% chance to preempt the window pick, biasing
        // newly created content toward earlier exposure without guaranteeing
        // it. When the override fires it always wins, even if the window and
        // fresh subset are disjoint.
        if !fresh.is_empty() && self.random.coin() {
            chosen = fresh[self.random.pick(fresh.len())];
        }

        let update = ItemUpdate {
            folder: chosen.folder.clone(),
            text: chosen.text.clone(),
            seen: !chosen.seen,
            created_by: chosen
                .created_by
                .clone()
                .unwrap_or_else(|| self.fallback_attribution.clone()),
            permissions: chosen.permissions.clone(),
        };
        self.store.update_item(&chosen.id, update).await?;

        // Second write, not transactional with the first: a metadata
        // failure must not fail the delivery already made durable above.
        if let Err(err) = self.freshness.touch(folder).await {
            warn!(folder, error = %err, "folder freshness touch failed");
        }

        Ok(chosen.text.clone())
    }
}
