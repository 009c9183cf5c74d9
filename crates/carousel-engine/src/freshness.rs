// SPDX-FileCopyrightText: 2026 Carousel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-folder freshness toggle.
//!
//! Folder metadata is a rotation-state summary consumed by the weekday
//! announcer; its `seen` flag is independent of any single item's flag.

use std::sync::Arc;

use carousel_core::{CarouselError, ContentStore};

/// Maintains the per-folder `seen` toggle, updated on every delivery from
/// the folder.
pub struct FolderFreshness {
    store: Arc<dyn ContentStore>,
}

impl FolderFreshness {
    pub fn new(store: Arc<dyn ContentStore>) -> Self {
        Self { store }
    }

    /// Record a delivery from `folder`.
    ///
    /// Creates the metadata record lazily (`seen = false`) on the folder's
    /// first delivery, and toggles `seen` on every subsequent one. Runs as
    /// a second, non-transactional write after the item rewrite: a failure
    /// here never rolls back the delivery.
    pub async fn touch(&self, folder: &str) -> Result<(), CarouselError> {
        match self.store.folder_meta(folder).await? {
            Some(meta) => self.store.update_folder_meta(folder, !meta.seen).await,
            None => {
                self.store.create_folder_meta(folder, false).await?;
                Ok(())
            }
        }
    }
}
