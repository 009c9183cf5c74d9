// SPDX-FileCopyrightText: 2026 Carousel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Folder metadata query operations.

use rusqlite::{OptionalExtension, Row, params};

use carousel_core::CarouselError;
use carousel_core::types::{FolderMeta, SortOrder};

use crate::database::{Database, map_tr_err};

fn row_to_meta(row: &Row<'_>) -> rusqlite::Result<FolderMeta> {
    Ok(FolderMeta {
        folder: row.get(0)?,
        seen: row.get(1)?,
        updated_at: row.get(2)?,
    })
}

/// Look up the metadata record for a folder.
pub async fn get_folder(
    db: &Database,
    folder: &str,
) -> Result<Option<FolderMeta>, CarouselError> {
    let folder = folder.to_string();
    db.connection()
        .call(move |conn| {
            let meta = conn
                .query_row(
                    "SELECT folder, seen, updated_at FROM folders WHERE folder = ?1",
                    params![folder],
                    row_to_meta,
                )
                .optional()?;
            Ok(meta)
        })
        .await
        .map_err(map_tr_err)
}

/// Insert a new folder metadata record.
pub async fn insert_folder(
    db: &Database,
    folder: &str,
    seen: bool,
    updated_at: &str,
) -> Result<(), CarouselError> {
    let folder = folder.to_string();
    let updated_at = updated_at.to_string();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO folders (folder, seen, updated_at) VALUES (?1, ?2, ?3)",
                params![folder, seen, updated_at],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}

/// Rewrite a folder metadata record with the given update timestamp.
pub async fn update_folder(
    db: &Database,
    folder: &str,
    seen: bool,
    updated_at: &str,
) -> Result<(), CarouselError> {
    let folder = folder.to_string();
    let updated_at = updated_at.to_string();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "UPDATE folders SET seen = ?2, updated_at = ?3 WHERE folder = ?1",
                params![folder, seen, updated_at],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}

/// Query folder metadata ordered by `updated_at`, optionally filtered to
/// folder keys starting with `prefix`.
pub async fn list_folders(
    db: &Database,
    prefix: Option<&str>,
    order: SortOrder,
    limit: u32,
) -> Result<Vec<FolderMeta>, CarouselError> {
    let prefix = prefix.map(str::to_string);
    db.connection()
        .call(move |conn| {
            let direction = match order {
                SortOrder::Ascending => "ASC",
                SortOrder::Descending => "DESC",
            };
            let mut out = Vec::new();
            match prefix {
                Some(p) => {
                    let sql = format!(
                        "SELECT folder, seen, updated_at FROM folders
                         WHERE folder LIKE ?1 || '%'
                         ORDER BY updated_at {direction}, folder {direction}
                         LIMIT ?2"
                    );
                    let mut stmt = conn.prepare(&sql)?;
                    let rows = stmt.query_map(params![p, i64::from(limit)], row_to_meta)?;
                    for row in rows {
                        out.push(row?);
                    }
                }
                None => {
                    let sql = format!(
                        "SELECT folder, seen, updated_at FROM folders
                         ORDER BY updated_at {direction}, folder {direction}
                         LIMIT ?1"
                    );
                    let mut stmt = conn.prepare(&sql)?;
                    let rows = stmt.query_map(params![i64::from(limit)], row_to_meta)?;
                    for row in rows {
                        out.push(row?);
                    }
                }
            }
            Ok(out)
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
        let db_path = dir.path().join("folders.db");
        let db = Database::open(db_path.to_str().unwrap(), true).await.unwrap();
        (db, dir)
    }

    #[tokio::test]
    async fn insert_get_and_update_round_trip() {
        let (db, _dir) = open_db().await;

        assert!(get_folder(&db, "monday_jokes").await.unwrap().is_none());

        insert_folder(&db, "monday_jokes", false, "2026-01-01T00:00:00.000Z")
            .await
            .unwrap();
        let meta = get_folder(&db, "monday_jokes").await.unwrap().unwrap();
        assert!(!meta.seen);

        update_folder(&db, "monday_jokes", true, "2026-01-02T00:00:00.000Z")
            .await
            .unwrap();
        let meta = get_folder(&db, "monday_jokes").await.unwrap().unwrap();
        assert!(meta.seen);
        assert_eq!(meta.updated_at, "2026-01-02T00:00:00.000Z");

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn prefix_filter_and_ascending_window() {
        let (db, _dir) = open_db().await;
        insert_folder(&db, "monday_jokes", false, "2026-01-03T00:00:00.000Z")
            .await
            .unwrap();
        insert_folder(&db, "memes", false, "2026-01-01T00:00:00.000Z")
            .await
            .unwrap();
        insert_folder(&db, "music", false, "2026-01-02T00:00:00.000Z")
            .await
            .unwrap();
        insert_folder(&db, "cats", false, "2026-01-01T00:00:00.000Z")
            .await
            .unwrap();

        let matches = list_folders(&db, Some("m"), SortOrder::Ascending, 2)
            .await
            .unwrap();
        assert_eq!(matches.len(), 2);
        // Least-recently-updated m-folders first; "cats" excluded.
        assert_eq!(matches[0].folder, "memes");
        assert_eq!(matches[1].folder, "music");

        let all = list_folders(&db, None, SortOrder::Ascending, 10)
            .await
            .unwrap();
        assert_eq!(all.len(), 4);

        db.close().await.unwrap();
    }
}
