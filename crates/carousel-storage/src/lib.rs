// SPDX-FileCopyrightText: 2026 Carousel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite persistence layer for the Carousel rotation engine.
//!
//! Provides WAL-mode SQLite storage with embedded migrations, a
//! single-writer concurrency model via `tokio-rusqlite`, and typed query
//! operations for items, folder metadata, and registered actors. The store
//! assigns all timestamps: creation sets `created_at == updated_at` (the
//! freshness marker), and every rewrite bumps `updated_at` only.

pub mod adapter;
pub mod database;
pub mod migrations;
pub mod queries;

pub use adapter::SqliteContentStore;
pub use database::Database;
