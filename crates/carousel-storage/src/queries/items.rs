// SPDX-FileCopyrightText: 2026 Carousel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Item query operations.

use rusqlite::{OptionalExtension, Row, params};

use carousel_core::CarouselError;
use carousel_core::types::{Item, ItemPage, ItemUpdate, SortOrder};

use crate::database::{Database, map_tr_err};

fn row_to_item(row: &Row<'_>) -> rusqlite::Result<Item> {
    let permissions: String = row.get(5)?;
    Ok(Item {
        id: row.get(0)?,
        folder: row.get(1)?,
        text: row.get(2)?,
        seen: row.get(3)?,
        created_by: row.get(4)?,
        permissions: serde_json::from_str(&permissions).unwrap_or_default(),
        created_at: row.get(6)?,
        updated_at: row.get(7)?,
    })
}

/// Insert a full item row. Callers assign id and timestamps.
pub async fn insert_item(db: &Database, item: &Item) -> Result<(), CarouselError> {
    let item = item.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO items (id, folder, text, seen, created_by, permissions, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    item.id,
                    item.folder,
                    item.text,
                    item.seen,
                    item.created_by,
                    serde_json::to_string(&item.permissions).unwrap_or_else(|_| "[]".into()),
                    item.created_at,
                    item.updated_at,
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}

/// Fetch a single item by id.
pub async fn get_item(db: &Database, id: &str) -> Result<Option<Item>, CarouselError> {
    let id = id.to_string();
    db.connection()
        .call(move |conn| {
            let item = conn
                .query_row(
                    "SELECT id, folder, text, seen, created_by, permissions, created_at, updated_at
                     FROM items WHERE id = ?1",
                    params![id],
                    row_to_item,
                )
                .optional()?;
            Ok(item)
        })
        .await
        .map_err(map_tr_err)
}

/// Query items in a folder ordered by `updated_at`, returning the folder's
/// full item count alongside the (possibly limited) page.
pub async fn list_by_folder(
    db: &Database,
    folder: &str,
    order: SortOrder,
    limit: Option<u32>,
) -> Result<ItemPage, CarouselError> {
    let folder = folder.to_string();
    db.connection()
        .call(move |conn| {
            let total: u64 = conn.query_row(
                "SELECT COUNT(*) FROM items WHERE folder = ?1",
                params![folder],
                |row| row.get(0),
            )?;

            let direction = match order {
                SortOrder::Ascending => "ASC",
                SortOrder::Descending => "DESC",
            };
            // Secondary key keeps ordering stable when two items share an
            // update timestamp.
            let sql = format!(
                "SELECT id, folder, text, seen, created_by, permissions, created_at, updated_at
                 FROM items WHERE folder = ?1
                 ORDER BY updated_at {direction}, id {direction}
                 LIMIT ?2"
            );
            let mut stmt = conn.prepare(&sql)?;
            let limit = limit.map(i64::from).unwrap_or(-1);
            let rows = stmt.query_map(params![folder, limit], row_to_item)?;

            let mut items = Vec::new();
            for row in rows {
                items.push(row?);
            }
            Ok(ItemPage { total, items })
        })
        .await
        .map_err(map_tr_err)
}

/// Rewrite an existing item's fields with the given update timestamp.
pub async fn update_item(
    db: &Database,
    id: &str,
    update: &ItemUpdate,
    updated_at: &str,
) -> Result<(), CarouselError> {
    let id = id.to_string();
    let update = update.clone();
    let updated_at = updated_at.to_string();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "UPDATE items
                 SET folder = ?2, text = ?3, seen = ?4, created_by = ?5,
                     permissions = ?6, updated_at = ?7
                 WHERE id = ?1",
                params![
                    id,
                    update.folder,
                    update.text,
                    update.seen,
                    update.created_by,
                    serde_json::to_string(&update.permissions)
                        .unwrap_or_else(|_| "[]".into()),
                    updated_at,
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    async fn open_db() -> (Database, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("items.db");
        let db = Database::open(db_path.to_str().unwrap(), true).await.unwrap();
        (db, dir)
    }

    fn make_item(id: &str, folder: &str, created_at: &str, updated_at: &str) -> Item {
        Item {
            id: id.to_string(),
            folder: folder.to_string(),
            text: format!("text of {id}"),
            seen: false,
            created_by: Some("alice".to_string()),
            permissions: vec![format!("write:user:{id}")],
            created_at: created_at.to_string(),
            updated_at: updated_at.to_string(),
        }
    }

    #[tokio::test]
    async fn insert_and_list_ascending_by_updated_at() {
        let (db, _dir) = open_db().await;

        // i2 was touched most recently, i3 least recently.
        let i1 = make_item("i1", "dog", "2026-01-01T00:00:00.000Z", "2026-01-02T00:00:00.000Z");
        let i2 = make_item("i2", "dog", "2026-01-01T00:00:00.000Z", "2026-01-03T00:00:00.000Z");
        let i3 = make_item("i3", "dog", "2026-01-01T00:00:00.000Z", "2026-01-01T00:00:00.000Z");
        for item in [&i1, &i2, &i3] {
            insert_item(&db, item).await.unwrap();
        }

        let page = list_by_folder(&db, "dog", SortOrder::Ascending, Some(2))
            .await
            .unwrap();
        assert_eq!(page.total, 3);
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[0].id, "i3");
        assert_eq!(page.items[1].id, "i1");

        let page = list_by_folder(&db, "dog", SortOrder::Descending, None)
            .await
            .unwrap();
        assert_eq!(page.items.len(), 3);
        assert_eq!(page.items[0].id, "i2");

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn list_only_returns_requested_folder() {
        let (db, _dir) = open_db().await;
        insert_item(&db, &make_item("d1", "dog", "2026-01-01T00:00:00.000Z", "2026-01-01T00:00:00.000Z"))
            .await
            .unwrap();
        insert_item(&db, &make_item("c1", "cat", "2026-01-01T00:00:00.000Z", "2026-01-01T00:00:00.000Z"))
            .await
            .unwrap();

        let page = list_by_folder(&db, "dog", SortOrder::Ascending, None)
            .await
            .unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].id, "d1");

        let page = list_by_folder(&db, "bird", SortOrder::Ascending, None)
            .await
            .unwrap();
        assert_eq!(page.total, 0);
        assert!(page.items.is_empty());

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn update_rewrites_fields_and_timestamp() {
        let (db, _dir) = open_db().await;
        let item = make_item("i1", "dog", "2026-01-01T00:00:00.000Z", "2026-01-01T00:00:00.000Z");
        insert_item(&db, &item).await.unwrap();

        let update = ItemUpdate {
            folder: "dog".to_string(),
            text: "text of i1".to_string(),
            seen: true,
            created_by: "alice".to_string(),
            permissions: item.permissions.clone(),
        };
        update_item(&db, "i1", &update, "2026-01-05T00:00:00.000Z")
            .await
            .unwrap();

        let stored = get_item(&db, "i1").await.unwrap().unwrap();
        assert!(stored.seen);
        assert_eq!(stored.created_at, "2026-01-01T00:00:00.000Z");
        assert_eq!(stored.updated_at, "2026-01-05T00:00:00.000Z");
        assert_eq!(stored.permissions, vec!["write:user:i1".to_string()]);
        assert!(!stored.is_fresh());

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn permissions_round_trip_through_json_column() {
        let (db, _dir) = open_db().await;
        let mut item = make_item("i1", "dog", "2026-01-01T00:00:00.000Z", "2026-01-01T00:00:00.000Z");
        item.permissions = vec!["read:any".to_string(), "write:user:u-9".to_string()];
        insert_item(&db, &item).await.unwrap();

        let stored = get_item(&db, "i1").await.unwrap().unwrap();
        assert_eq!(stored.permissions, item.permissions);

        db.close().await.unwrap();
    }
}
