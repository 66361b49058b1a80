// ABOUTME: Account management commands for caltrack-cli
// ABOUTME: Create, show, set-goal, and change-pin over the single local profile
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 CalTrack

use clap::Subcommand;

use caltrack::auth::AuthManager;
use caltrack::constants::defaults;
use caltrack::database::Database;
use caltrack::errors::{AppError, AppResult};
use caltrack::intelligence::{format_compact, lifetime_stats};

use super::{authenticate, resolve_pin};

/// Account management subcommands
#[non_exhaustive]
#[derive(Subcommand)]
pub enum AccountCommand {
    /// Create the local account (one per device)
    Create {
        /// Display name
        #[arg(long)]
        username: String,

        /// 4-digit PIN guarding the account
        #[arg(long)]
        pin: String,

        /// Daily calorie goal in kcal
        #[arg(long, default_value_t = defaults::DAILY_CALORIE_GOAL)]
        goal: i64,
    },

    /// Show the profile and lifetime statistics
    Show {
        /// PIN (falls back to CALTRACK_PIN)
        #[arg(long)]
        pin: Option<String>,
    },

    /// Update the daily calorie goal
    SetGoal {
        /// PIN (falls back to CALTRACK_PIN)
        #[arg(long)]
        pin: Option<String>,

        /// New daily calorie goal in kcal
        #[arg(long)]
        goal: i64,
    },

    /// Change the 4-digit PIN
    ChangePin {
        /// Current PIN (falls back to CALTRACK_PIN)
        #[arg(long)]
        pin: Option<String>,

        /// New 4-digit PIN
        #[arg(long)]
        new_pin: String,
    },
}

/// Dispatch an account subcommand
pub async fn handle(database: &Database, action: AccountCommand) -> AppResult<()> {
    match action {
        AccountCommand::Create {
            username,
            pin,
            goal,
        } => create(database, &username, &pin, goal).await,
        AccountCommand::Show { pin } => show(database, pin).await,
        AccountCommand::SetGoal { pin, goal } => set_goal(database, pin, goal).await,
        AccountCommand::ChangePin { pin, new_pin } => change_pin(database, pin, &new_pin).await,
    }
}

async fn create(database: &Database, username: &str, pin: &str, goal: i64) -> AppResult<()> {
    let mut auth = AuthManager::new(database.clone());
    let profile = auth.register(username, pin, goal).await?;

    println!("Account created for {}", profile.username);
    println!("Daily goal: {} kcal", profile.daily_calorie_goal);
    Ok(())
}

async fn show(database: &Database, pin: Option<String>) -> AppResult<()> {
    let pin = resolve_pin(pin)?;
    let auth = authenticate(database, &pin).await?;
    let profile = auth
        .current_user()
        .ok_or_else(AppError::auth_required)?;

    let entries = database.list_entries().await?;
    let stats = lifetime_stats(&entries);

    println!("{}", profile.username);
    println!("  Daily goal:      {} kcal", profile.daily_calorie_goal);
    println!("  Member since:    {}", profile.created_at.format("%Y-%m-%d"));
    println!();
    println!("Lifetime stats");
    println!("  Days tracked:    {}", stats.days_tracked);
    println!("  Meals logged:    {}", stats.meals_logged);
    println!("  Total calories:  {}", format_compact(stats.total_calories));
    println!("  Daily average:   {} kcal", stats.average_daily_calories);
    Ok(())
}

async fn set_goal(database: &Database, pin: Option<String>, goal: i64) -> AppResult<()> {
    let pin = resolve_pin(pin)?;
    let mut auth = authenticate(database, &pin).await?;
    auth.set_daily_goal(goal).await?;

    println!("Daily goal set to {goal} kcal");
    Ok(())
}

async fn change_pin(database: &Database, pin: Option<String>, new_pin: &str) -> AppResult<()> {
    let pin = resolve_pin(pin)?;
    let mut auth = authenticate(database, &pin).await?;
    auth.change_pin(&pin, new_pin).await?;

    println!("PIN changed");
    Ok(())
}
