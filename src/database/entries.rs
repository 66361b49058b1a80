// ABOUTME: Food entry database operations
// ABOUTME: CRUD plus half-open time-range queries backing the aggregate views
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 CalTrack

use super::Database;
use crate::errors::{AppError, AppResult};
use crate::models::FoodEntry;
use chrono::{DateTime, Utc};
use sqlx::Row;
use uuid::Uuid;

impl Database {
    /// Create the food entries table and its index
    pub(super) async fn migrate_entries(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS food_entries (
                id TEXT PRIMARY KEY,
                logged_at DATETIME NOT NULL,
                description TEXT NOT NULL,
                calories INTEGER NOT NULL,
                protein_g REAL NOT NULL,
                carbs_g REAL NOT NULL,
                fat_g REAL NOT NULL,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(self.pool())
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_food_entries_logged_at ON food_entries(logged_at)",
        )
        .execute(self.pool())
        .await?;

        Ok(())
    }

    /// Insert a food entry
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn insert_entry(&self, entry: &FoodEntry) -> AppResult<()> {
        sqlx::query(
            r"
            INSERT INTO food_entries (id, logged_at, description, calories, protein_g, carbs_g, fat_g)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(entry.id.to_string())
        .bind(entry.logged_at)
        .bind(&entry.description)
        .bind(entry.calories)
        .bind(entry.protein_g)
        .bind(entry.carbs_g)
        .bind(entry.fat_g)
        .execute(self.pool())
        .await?;

        Ok(())
    }

    /// Get a single entry by id
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn get_entry(&self, id: Uuid) -> AppResult<Option<FoodEntry>> {
        let row = sqlx::query(
            r"
            SELECT id, logged_at, description, calories, protein_g, carbs_g, fat_g
            FROM food_entries WHERE id = $1
            ",
        )
        .bind(id.to_string())
        .fetch_optional(self.pool())
        .await?;

        row.as_ref().map(Self::row_to_entry).transpose()
    }

    /// List all entries, oldest first
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_entries(&self) -> AppResult<Vec<FoodEntry>> {
        let rows = sqlx::query(
            r"
            SELECT id, logged_at, description, calories, protein_g, carbs_g, fat_g
            FROM food_entries ORDER BY logged_at ASC
            ",
        )
        .fetch_all(self.pool())
        .await?;

        rows.iter().map(Self::row_to_entry).collect()
    }

    /// List entries with `start <= logged_at < end`, oldest first
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_entries_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<Vec<FoodEntry>> {
        let rows = sqlx::query(
            r"
            SELECT id, logged_at, description, calories, protein_g, carbs_g, fat_g
            FROM food_entries
            WHERE logged_at >= $1 AND logged_at < $2
            ORDER BY logged_at ASC
            ",
        )
        .bind(start)
        .bind(end)
        .fetch_all(self.pool())
        .await?;

        rows.iter().map(Self::row_to_entry).collect()
    }

    /// Update the nutrition values of an existing entry
    ///
    /// The description is immutable after logging; only the estimated numbers
    /// can be corrected.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn update_entry_nutrition(
        &self,
        id: Uuid,
        calories: i64,
        protein_g: f64,
        carbs_g: f64,
        fat_g: f64,
    ) -> AppResult<bool> {
        let result = sqlx::query(
            r"
            UPDATE food_entries
            SET calories = $2, protein_g = $3, carbs_g = $4, fat_g = $5
            WHERE id = $1
            ",
        )
        .bind(id.to_string())
        .bind(calories)
        .bind(protein_g)
        .bind(carbs_g)
        .bind(fat_g)
        .execute(self.pool())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete a single entry, returning whether a row was removed
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn delete_entry(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM food_entries WHERE id = $1")
            .bind(id.to_string())
            .execute(self.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete all entries with `start <= logged_at < end`, returning the count
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn delete_entries_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM food_entries WHERE logged_at >= $1 AND logged_at < $2")
            .bind(start)
            .bind(end)
            .execute(self.pool())
            .await?;

        Ok(result.rows_affected())
    }

    /// Total number of logged entries
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn count_entries(&self) -> AppResult<i64> {
        let count = sqlx::query_scalar("SELECT COUNT(*) FROM food_entries")
            .fetch_one(self.pool())
            .await?;
        Ok(count)
    }

    /// Convert a database row to a `FoodEntry`
    fn row_to_entry(row: &sqlx::sqlite::SqliteRow) -> AppResult<FoodEntry> {
        let id: String = row.get("id");
        let id = Uuid::parse_str(&id)
            .map_err(|e| AppError::database(format!("invalid entry id: {e}")))?;

        Ok(FoodEntry {
            id,
            logged_at: row.get("logged_at"),
            description: row.get("description"),
            calories: row.get("calories"),
            protein_g: row.get("protein_g"),
            carbs_g: row.get("carbs_g"),
            fat_g: row.get("fat_g"),
        })
    }
}
