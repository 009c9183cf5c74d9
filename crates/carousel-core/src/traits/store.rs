// SPDX-FileCopyrightText: 2026 Carousel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Content store adapter trait.
//!
//! The store is the sole durable owner of items, folder metadata, and
//! registered actors. The engine holds no authoritative cache: every
//! selection re-reads current state through this trait.

use async_trait::async_trait;

use crate::error::CarouselError;
use crate::traits::adapter::Adapter;
use crate::types::{
    FolderMeta, Item, ItemPage, ItemUpdate, NewItem, RegisteredActor, SortOrder,
};

/// Adapter for the durable content store.
///
/// Queries are ordered by the update timestamp and support equality
/// (folder) and prefix (folder-key initial) filters. Timestamps are
/// store-assigned: `create_item` sets `created_at == updated_at`, and
/// `update_item` rewrites `updated_at` only.
#[async_trait]
pub trait ContentStore: Adapter {
    /// Initializes the store backend (migrations, connection, etc.).
    async fn initialize(&self) -> Result<(), CarouselError>;

    /// Closes the store backend, flushing pending writes.
    async fn close(&self) -> Result<(), CarouselError>;

    // --- Item operations ---

    /// Query items in a folder ordered by `updated_at`.
    ///
    /// The returned page carries the folder's full item count regardless
    /// of `limit`.
    async fn items_by_recency(
        &self,
        folder: &str,
        order: SortOrder,
        limit: Option<u32>,
    ) -> Result<ItemPage, CarouselError>;

    /// Create a new item with store-assigned id and timestamps.
    async fn create_item(&self, new: NewItem) -> Result<Item, CarouselError>;

    /// Rewrite an existing item's fields. The store bumps `updated_at`.
    async fn update_item(&self, id: &str, update: ItemUpdate) -> Result<(), CarouselError>;

    // --- Folder metadata operations ---

    /// Look up the metadata record for a folder, if any.
    async fn folder_meta(&self, folder: &str) -> Result<Option<FolderMeta>, CarouselError>;

    /// Create a folder metadata record.
    async fn create_folder_meta(
        &self,
        folder: &str,
        seen: bool,
    ) -> Result<FolderMeta, CarouselError>;

    /// Rewrite a folder metadata record. The store bumps `updated_at`.
    async fn update_folder_meta(&self, folder: &str, seen: bool) -> Result<(), CarouselError>;

    /// Query folder metadata ordered by `updated_at`, optionally filtered
    /// to folder keys starting with `prefix`.
    async fn folder_meta_by_recency(
        &self,
        prefix: Option<&str>,
        order: SortOrder,
        limit: u32,
    ) -> Result<Vec<FolderMeta>, CarouselError>;

    // --- Actor operations ---

    /// Look up a registered actor by chat username.
    async fn registered_actor(
        &self,
        username: &str,
    ) -> Result<Option<RegisteredActor>, CarouselError>;
}
