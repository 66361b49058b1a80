// ABOUTME: Statistics commands for caltrack-cli
// ABOUTME: Daily totals, weekly breakdown, and lifetime views
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 CalTrack

use chrono::{NaiveDate, Utc};
use clap::Subcommand;

use caltrack::database::Database;
use caltrack::errors::{AppError, AppResult};
use caltrack::intelligence::{
    day_bounds_utc, format_compact, lifetime_stats, summarize_day, summarize_week, week_bounds_utc,
    MacroSplit,
};

use super::{authenticate, resolve_pin};

/// Statistics subcommands
#[non_exhaustive]
#[derive(Subcommand)]
pub enum StatsCommand {
    /// Today's totals, goal progress, and macro split
    Today {
        /// PIN (falls back to CALTRACK_PIN)
        #[arg(long)]
        pin: Option<String>,
    },

    /// Weekly breakdown (Monday-anchored)
    Week {
        /// PIN (falls back to CALTRACK_PIN)
        #[arg(long)]
        pin: Option<String>,

        /// Any date within the week to show (YYYY-MM-DD, today by default)
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// All-time statistics
    Lifetime {
        /// PIN (falls back to CALTRACK_PIN)
        #[arg(long)]
        pin: Option<String>,
    },
}

/// Dispatch a stats subcommand
pub async fn handle(database: &Database, action: StatsCommand) -> AppResult<()> {
    match action {
        StatsCommand::Today { pin } => today(database, pin).await,
        StatsCommand::Week { pin, date } => week(database, pin, date).await,
        StatsCommand::Lifetime { pin } => lifetime(database, pin).await,
    }
}

async fn today(database: &Database, pin: Option<String>) -> AppResult<()> {
    let pin = resolve_pin(pin)?;
    let auth = authenticate(database, &pin).await?;
    let goal = auth
        .current_user()
        .map(|u| u.daily_calorie_goal)
        .ok_or_else(AppError::auth_required)?;

    let date = Utc::now().date_naive();
    let (start, end) = day_bounds_utc(date);
    let entries = database.list_entries_between(start, end).await?;
    let summary = summarize_day(&entries, date);

    println!("Today ({date})");
    println!(
        "  {} kcal of {} kcal goal ({:.0}%)",
        summary.calories,
        goal,
        summary.progress_against(goal) * 100.0
    );
    println!(
        "  P {:.1}g / C {:.1}g / F {:.1}g across {} entries",
        summary.protein_g, summary.carbs_g, summary.fat_g, summary.entry_count
    );

    if let Some(split) = MacroSplit::of_day(&summary) {
        println!(
            "  Calories by macro: protein {:.0}, carbs {:.0}, fat {:.0}",
            split.protein_kcal, split.carbs_kcal, split.fat_kcal
        );
    }
    Ok(())
}

async fn week(database: &Database, pin: Option<String>, date: Option<NaiveDate>) -> AppResult<()> {
    let pin = resolve_pin(pin)?;
    authenticate(database, &pin).await?;

    let date = date.unwrap_or_else(|| Utc::now().date_naive());
    let (start, end) = week_bounds_utc(date);
    let entries = database.list_entries_between(start, end).await?;
    let summary = summarize_week(&entries, date);

    println!("Week {} - {}", summary.start, summary.end());
    for day in &summary.days {
        println!(
            "  {}  {:>5} kcal  P {:>5.1}g  C {:>5.1}g  F {:>5.1}g  ({} entries)",
            day.date.format("%a"),
            day.calories,
            day.protein_g,
            day.carbs_g,
            day.fat_g,
            day.entry_count
        );
    }
    println!(
        "  Total {} kcal, {} kcal/day over tracked days",
        summary.total_calories(),
        summary.daily_average_calories()
    );
    Ok(())
}

async fn lifetime(database: &Database, pin: Option<String>) -> AppResult<()> {
    let pin = resolve_pin(pin)?;
    authenticate(database, &pin).await?;

    let entries = database.list_entries().await?;
    let stats = lifetime_stats(&entries);

    println!("Lifetime");
    println!("  Days tracked:    {}", stats.days_tracked);
    println!("  Meals logged:    {}", stats.meals_logged);
    println!("  Total calories:  {}", format_compact(stats.total_calories));
    println!("  Daily average:   {} kcal", stats.average_daily_calories);
    Ok(())
}
