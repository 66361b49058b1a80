// ABOUTME: SQLite-backed persistent store for food entries and the user profile
// ABOUTME: Connection management and idempotent schema migration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 CalTrack

//! # Database Management
//!
//! SQLite storage for the two record types CalTrack persists: food entries and
//! the single user profile. Migrations are idempotent `CREATE TABLE IF NOT
//! EXISTS` statements run on every startup.

mod entries;
mod profile;

use crate::errors::AppResult;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Pool, Sqlite};

/// Maximum pool size for on-disk databases
const MAX_CONNECTIONS: u32 = 5;

/// Store handle for food entries and the user profile
#[derive(Clone)]
pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    /// Open (creating if necessary) the database at the given URL and run
    /// migrations.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be established or a
    /// migration statement fails.
    pub async fn new(database_url: &str) -> AppResult<Self> {
        // Ensure SQLite creates the database file if it doesn't exist
        let connection_options =
            if database_url.starts_with("sqlite:") && !database_url.contains(":memory:") {
                format!("{database_url}?mode=rwc")
            } else {
                database_url.to_owned()
            };

        // A pooled `:memory:` database is one database per connection; cap the
        // pool at a single connection so every query sees the same database.
        let max_connections = if database_url.contains(":memory:") {
            1
        } else {
            MAX_CONNECTIONS
        };

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect(&connection_options)
            .await?;

        let db = Self { pool };
        db.migrate().await?;

        Ok(db)
    }

    /// Get a reference to the underlying pool for advanced operations
    #[must_use]
    pub const fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    /// Run database migrations
    ///
    /// # Errors
    ///
    /// Returns an error if a migration statement fails.
    pub async fn migrate(&self) -> AppResult<()> {
        self.migrate_entries().await?;
        self.migrate_profile().await?;
        Ok(())
    }
}
