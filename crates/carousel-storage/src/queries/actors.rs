// SPDX-FileCopyrightText: 2026 Carousel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Registered actor lookups.
//!
//! Actors are registered out-of-band (the chat platform's account-link
//! flow); the engine only ever reads this table. The insert exists for
//! tests and operator tooling.

use rusqlite::{OptionalExtension, params};

use carousel_core::CarouselError;
use carousel_core::types::RegisteredActor;

use crate::database::{Database, map_tr_err};

/// Look up a registered actor by chat username.
pub async fn find_by_username(
    db: &Database,
    username: &str,
) -> Result<Option<RegisteredActor>, CarouselError> {
    let username = username.to_string();
    db.connection()
        .call(move |conn| {
            let actor = conn
                .query_row(
                    "SELECT id, username FROM actors WHERE username = ?1",
                    params![username],
                    |row| {
                        Ok(RegisteredActor {
                            id: row.get(0)?,
                            username: row.get(1)?,
                        })
                    },
                )
                .optional()?;
            Ok(actor)
        })
        .await
        .map_err(map_tr_err)
}

/// Register an actor.
pub async fn insert_actor(
    db: &Database,
    actor: &RegisteredActor,
    created_at: &str,
) -> Result<(), CarouselError> {
    let actor = actor.clone();
    let created_at = created_at.to_string();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO actors (id, username, created_at) VALUES (?1, ?2, ?3)",
                params![actor.id, actor.username, created_at],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}
