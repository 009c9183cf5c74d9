// SPDX-FileCopyrightText: 2026 Carousel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the ContentStore trait.

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::debug;

use carousel_config::model::StorageConfig;
use carousel_core::types::{
    FolderMeta, Item, ItemPage, ItemUpdate, NewItem, RegisteredActor, SortOrder,
};
use carousel_core::{Adapter, AdapterType, CarouselError, ContentStore, HealthStatus};

use crate::database::{Database, map_tr_err, now_rfc3339};
use crate::queries;

/// SQLite-backed content store.
///
/// Wraps a [`Database`] handle and delegates all query operations to the
/// typed query modules. The database is lazily initialized on the first
/// call to [`ContentStore::initialize`].
pub struct SqliteContentStore {
    config: StorageConfig,
    db: OnceCell<Database>,
}

impl SqliteContentStore {
    /// Create a new SqliteContentStore with the given configuration.
    ///
    /// The database connection is not opened until `initialize` is called.
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            db: OnceCell::new(),
        }
    }

    /// Returns the underlying Database, or an error if not initialized.
    fn db(&self) -> Result<&Database, CarouselError> {
        self.db.get().ok_or_else(|| CarouselError::Store {
            source: "store not initialized -- call initialize() first".into(),
        })
    }
}

#[async_trait]
impl Adapter for SqliteContentStore {
    fn name(&self) -> &str {
        "sqlite"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Store
    }

    async fn health_check(&self) -> Result<HealthStatus, CarouselError> {
        let db = self.db()?;
        db.connection()
            .call(|conn| {
                conn.execute_batch("SELECT 1;")?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)?;
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), CarouselError> {
        if let Some(db) = self.db.get() {
            db.close().await?;
            debug!("shutdown: WAL checkpoint complete");
        }
        Ok(())
    }
}

#[async_trait]
impl ContentStore for SqliteContentStore {
    async fn initialize(&self) -> Result<(), CarouselError> {
        let db = Database::open(&self.config.database_path, self.config.wal_mode).await?;
        self.db.set(db).map_err(|_| CarouselError::Store {
            source: "store already initialized".into(),
        })?;
        debug!(path = %self.config.database_path, "SQLite content store initialized");
        Ok(())
    }

    async fn close(&self) -> Result<(), CarouselError> {
        self.db()?.close().await
    }

    // --- Item operations ---

    async fn items_by_recency(
        &self,
        folder: &str,
        order: SortOrder,
        limit: Option<u32>,
    ) -> Result<ItemPage, CarouselError> {
        queries::items::list_by_folder(self.db()?, folder, order, limit).await
    }

    async fn create_item(&self, new: NewItem) -> Result<Item, CarouselError> {
        let now = now_rfc3339();
        // Entity invariants: folder keys are lowercase and trimmed, bodies
        // are trimmed. Creation timestamps start equal -- the freshness
        // marker until the first delivery bumps `updated_at`.
        let item = Item {
            id: uuid::Uuid::new_v4().to_string(),
            folder: new.folder.trim().to_lowercase(),
            text: new.text.trim().to_string(),
            seen: false,
            created_by: Some(new.created_by),
            permissions: new.permissions,
            created_at: now.clone(),
            updated_at: now,
        };
        queries::items::insert_item(self.db()?, &item).await?;
        Ok(item)
    }

    async fn update_item(&self, id: &str, update: ItemUpdate) -> Result<(), CarouselError> {
        queries::items::update_item(self.db()?, id, &update, &now_rfc3339()).await
    }

    // --- Folder metadata operations ---

    async fn folder_meta(&self, folder: &str) -> Result<Option<FolderMeta>, CarouselError> {
        queries::folders::get_folder(self.db()?, folder).await
    }

    async fn create_folder_meta(
        &self,
        folder: &str,
        seen: bool,
    ) -> Result<FolderMeta, CarouselError> {
        let now = now_rfc3339();
        queries::folders::insert_folder(self.db()?, folder, seen, &now).await?;
        Ok(FolderMeta {
            folder: folder.to_string(),
            seen,
            updated_at: now,
        })
    }

    async fn update_folder_meta(&self, folder: &str, seen: bool) -> Result<(), CarouselError> {
        queries::folders::update_folder(self.db()?, folder, seen, &now_rfc3339()).await
    }

    async fn folder_meta_by_recency(
        &self,
        prefix: Option<&str>,
        order: SortOrder,
        limit: u32,
    ) -> Result<Vec<FolderMeta>, CarouselError> {
        queries::folders::list_folders(self.db()?, prefix, order, limit).await
    }

    // --- Actor operations ---

    async fn registered_actor(
        &self,
        username: &str,
    ) -> Result<Option<RegisteredActor>, CarouselError> {
        queries::actors::find_by_username(self.db()?, username).await
    }
}
