// ABOUTME: User profile database operations
// ABOUTME: Single-row profile storage backing the PIN authentication gate
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 CalTrack

use super::Database;
use crate::errors::{AppError, AppResult};
use crate::models::UserProfile;
use sqlx::Row;
use uuid::Uuid;

impl Database {
    /// Create the user profile table
    pub(super) async fn migrate_profile(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS user_profile (
                id TEXT PRIMARY KEY,
                username TEXT NOT NULL,
                pin_hash TEXT NOT NULL,
                daily_calorie_goal INTEGER NOT NULL DEFAULT 2000,
                created_at DATETIME NOT NULL
            )
            ",
        )
        .execute(self.pool())
        .await?;

        Ok(())
    }

    /// Create the user profile
    ///
    /// # Errors
    ///
    /// Returns `ResourceAlreadyExists` if a profile row already exists (this
    /// is a single-user store), or a database error.
    pub async fn create_profile(&self, profile: &UserProfile) -> AppResult<()> {
        let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM user_profile")
            .fetch_one(self.pool())
            .await?;
        if existing > 0 {
            return Err(AppError::already_exists("a user profile already exists"));
        }

        sqlx::query(
            r"
            INSERT INTO user_profile (id, username, pin_hash, daily_calorie_goal, created_at)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(profile.id.to_string())
        .bind(&profile.username)
        .bind(&profile.pin_hash)
        .bind(profile.daily_calorie_goal)
        .bind(profile.created_at)
        .execute(self.pool())
        .await?;

        Ok(())
    }

    /// Get the stored profile, if any
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn get_profile(&self) -> AppResult<Option<UserProfile>> {
        let row = sqlx::query(
            r"
            SELECT id, username, pin_hash, daily_calorie_goal, created_at
            FROM user_profile LIMIT 1
            ",
        )
        .fetch_optional(self.pool())
        .await?;

        row.as_ref().map(Self::row_to_profile).transpose()
    }

    /// Update the daily calorie goal
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn update_daily_goal(&self, id: Uuid, daily_calorie_goal: i64) -> AppResult<bool> {
        let result = sqlx::query("UPDATE user_profile SET daily_calorie_goal = $2 WHERE id = $1")
            .bind(id.to_string())
            .bind(daily_calorie_goal)
            .execute(self.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Replace the stored PIN hash
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn update_pin_hash(&self, id: Uuid, pin_hash: &str) -> AppResult<bool> {
        let result = sqlx::query("UPDATE user_profile SET pin_hash = $2 WHERE id = $1")
            .bind(id.to_string())
            .bind(pin_hash)
            .execute(self.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Convert a database row to a `UserProfile`
    fn row_to_profile(row: &sqlx::sqlite::SqliteRow) -> AppResult<UserProfile> {
        let id: String = row.get("id");
        let id = Uuid::parse_str(&id)
            .map_err(|e| AppError::database(format!("invalid profile id: {e}")))?;

        Ok(UserProfile {
            id,
            username: row.get("username"),
            pin_hash: row.get("pin_hash"),
            daily_calorie_goal: row.get("daily_calorie_goal"),
            created_at: row.get("created_at"),
        })
    }
}
