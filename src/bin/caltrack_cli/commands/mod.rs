// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 CalTrack
// ABOUTME: Re-exports command modules for caltrack-cli
// ABOUTME: Shared PIN resolution and authentication helpers

pub mod account;
pub mod log;
pub mod stats;

use std::env;

use caltrack::auth::AuthManager;
use caltrack::constants::env_names;
use caltrack::database::Database;
use caltrack::errors::{AppError, AppResult, ErrorCode};

/// Resolve the PIN from the `--pin` flag or the `CALTRACK_PIN` environment
/// variable.
pub fn resolve_pin(pin: Option<String>) -> AppResult<String> {
    pin.or_else(|| env::var(env_names::PIN).ok())
        .filter(|p| !p.is_empty())
        .ok_or_else(|| {
            AppError::new(
                ErrorCode::AuthRequired,
                format!("provide --pin or set {}", env_names::PIN),
            )
        })
}

/// Log in through the PIN gate, returning the authenticated session
pub async fn authenticate(database: &Database, pin: &str) -> AppResult<AuthManager> {
    let mut auth = AuthManager::new(database.clone());
    auth.login(pin).await?;
    Ok(auth)
}
