// ABOUTME: PIN-based local authentication gate over the single user profile
// ABOUTME: Handles registration, login, PIN changes, and the in-memory session
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 CalTrack

//! # Authentication Gate
//!
//! CalTrack is a single-user, on-device application. The gate guards the
//! profile record with a 4-digit PIN: the PIN is bcrypt-hashed at rest and
//! verified on a blocking thread, and the authenticated profile is held in
//! memory for the lifetime of the session.

use crate::constants::limits;
use crate::database::Database;
use crate::errors::{AppError, AppResult};
use crate::models::UserProfile;
use tracing::{info, warn};

/// Authentication manager holding the session state
pub struct AuthManager {
    database: Database,
    current_user: Option<UserProfile>,
}

impl AuthManager {
    /// Create a new gate over the given store
    #[must_use]
    pub const fn new(database: Database) -> Self {
        Self {
            database,
            current_user: None,
        }
    }

    /// Whether a session is currently authenticated
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.current_user.is_some()
    }

    /// The authenticated profile, if any
    #[must_use]
    pub const fn current_user(&self) -> Option<&UserProfile> {
        self.current_user.as_ref()
    }

    /// Whether an account exists on this device
    ///
    /// Used by callers to choose between the registration and login paths.
    /// Does not authenticate.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn has_account(&self) -> AppResult<bool> {
        Ok(self.database.get_profile().await?.is_some())
    }

    /// Create the single local account
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for an empty username, a malformed PIN, or a
    /// non-positive goal; `ResourceAlreadyExists` if an account already
    /// exists; or a database error.
    pub async fn register(
        &mut self,
        username: &str,
        pin: &str,
        daily_calorie_goal: i64,
    ) -> AppResult<UserProfile> {
        let username = username.trim();
        if username.is_empty() {
            return Err(AppError::invalid_input("username must not be empty"));
        }
        validate_pin(pin)?;
        validate_goal(daily_calorie_goal)?;

        if self.database.get_profile().await?.is_some() {
            warn!("registration rejected: an account already exists");
            return Err(AppError::already_exists(
                "an account already exists on this device",
            ));
        }

        let pin_hash = bcrypt::hash(pin, bcrypt::DEFAULT_COST)?;
        let profile = UserProfile::new(username, pin_hash, daily_calorie_goal);
        self.database.create_profile(&profile).await?;

        info!(username = %profile.username, "account created");
        self.current_user = Some(profile.clone());
        Ok(profile)
    }

    /// Authenticate with the 4-digit PIN
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if no account exists, `AuthInvalid` on a
    /// PIN mismatch, or a database error.
    pub async fn login(&mut self, pin: &str) -> AppResult<UserProfile> {
        let Some(profile) = self.database.get_profile().await? else {
            return Err(AppError::not_found("account"));
        };

        if !verify_pin(pin, &profile.pin_hash).await? {
            warn!("login rejected: incorrect PIN");
            return Err(AppError::auth_invalid("incorrect PIN"));
        }

        info!(username = %profile.username, "login successful");
        self.current_user = Some(profile.clone());
        Ok(profile)
    }

    /// Change the PIN, verifying the current one first
    ///
    /// # Errors
    ///
    /// Returns `AuthRequired` when not logged in, `AuthInvalid` when the
    /// current PIN does not match, `InvalidInput` for a malformed new PIN, or
    /// a database error.
    pub async fn change_pin(&mut self, current_pin: &str, new_pin: &str) -> AppResult<()> {
        let profile = self
            .current_user
            .as_ref()
            .ok_or_else(AppError::auth_required)?;

        if !verify_pin(current_pin, &profile.pin_hash).await? {
            return Err(AppError::auth_invalid("current PIN is incorrect"));
        }
        validate_pin(new_pin)?;

        let new_hash = bcrypt::hash(new_pin, bcrypt::DEFAULT_COST)?;
        self.database.update_pin_hash(profile.id, &new_hash).await?;

        if let Some(user) = self.current_user.as_mut() {
            user.pin_hash = new_hash;
        }
        info!("PIN changed");
        Ok(())
    }

    /// Update the daily calorie goal for the authenticated user
    ///
    /// # Errors
    ///
    /// Returns `AuthRequired` when not logged in, `InvalidInput` for a
    /// non-positive goal, or a database error.
    pub async fn set_daily_goal(&mut self, daily_calorie_goal: i64) -> AppResult<()> {
        let profile = self
            .current_user
            .as_ref()
            .ok_or_else(AppError::auth_required)?;
        validate_goal(daily_calorie_goal)?;

        self.database
            .update_daily_goal(profile.id, daily_calorie_goal)
            .await?;

        if let Some(user) = self.current_user.as_mut() {
            user.daily_calorie_goal = daily_calorie_goal;
        }
        info!(goal = daily_calorie_goal, "daily calorie goal updated");
        Ok(())
    }

    /// End the session
    pub fn logout(&mut self) {
        if let Some(user) = self.current_user.take() {
            info!(username = %user.username, "logged out");
        }
    }
}

/// Validate the 4-ASCII-digit PIN format
fn validate_pin(pin: &str) -> AppResult<()> {
    if pin.len() != limits::PIN_LENGTH || !pin.chars().all(|c| c.is_ascii_digit()) {
        return Err(AppError::invalid_input(format!(
            "PIN must be exactly {} digits",
            limits::PIN_LENGTH
        )));
    }
    Ok(())
}

/// Validate the daily calorie goal
fn validate_goal(goal: i64) -> AppResult<()> {
    if goal <= 0 {
        return Err(AppError::invalid_input(
            "daily calorie goal must be positive",
        ));
    }
    Ok(())
}

/// bcrypt verification is CPU-bound; run it off the async runtime
async fn verify_pin(pin: &str, pin_hash: &str) -> AppResult<bool> {
    let pin = pin.to_owned();
    let pin_hash = pin_hash.to_owned();
    let valid = tokio::task::spawn_blocking(move || bcrypt::verify(&pin, &pin_hash))
        .await
        .map_err(|e| AppError::internal(format!("PIN verification task failed: {e}")))??;
    Ok(valid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_pin_accepts_four_digits() {
        assert!(validate_pin("0042").is_ok());
    }

    #[test]
    fn test_validate_pin_rejects_bad_shapes() {
        for pin in ["123", "12345", "12a4", "    ", "١٢٣٤"] {
            assert!(validate_pin(pin).is_err(), "accepted {pin:?}");
        }
    }

    #[test]
    fn test_validate_goal_rejects_non_positive() {
        assert!(validate_goal(0).is_err());
        assert!(validate_goal(-100).is_err());
        assert!(validate_goal(1800).is_ok());
    }
}
