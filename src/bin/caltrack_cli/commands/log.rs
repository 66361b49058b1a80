// ABOUTME: Food log commands for caltrack-cli
// ABOUTME: Estimate-and-add, list, edit, delete, and clear-day operations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 CalTrack

use std::path::PathBuf;

use chrono::{NaiveDate, Utc};
use clap::Subcommand;
use uuid::Uuid;

use caltrack::database::Database;
use caltrack::errors::{AppError, AppResult};
use caltrack::estimator::{FoodImage, NutritionEstimator};
use caltrack::intelligence::day_bounds_utc;
use caltrack::llm::OpenAiCompatibleProvider;
use caltrack::models::{FoodEntry, NutritionEstimate};

use super::{authenticate, resolve_pin};

/// Food log subcommands
#[non_exhaustive]
#[derive(Subcommand)]
pub enum LogCommand {
    /// Estimate the nutrition of a described food and log it
    Add {
        /// Free-text food description (e.g., "150g grilled chicken with rice")
        description: String,

        /// PIN (falls back to CALTRACK_PIN)
        #[arg(long)]
        pin: Option<String>,

        /// Attach a photo of the food
        #[arg(long)]
        image: Option<PathBuf>,

        /// Skip the estimation call and log the given values directly
        #[arg(long)]
        no_estimate: bool,

        /// Calories in kcal (required with --no-estimate)
        #[arg(long)]
        calories: Option<i64>,

        /// Protein in grams
        #[arg(long)]
        protein: Option<f64>,

        /// Carbohydrates in grams
        #[arg(long)]
        carbs: Option<f64>,

        /// Fat in grams
        #[arg(long)]
        fat: Option<f64>,
    },

    /// List entries for a day (today by default)
    List {
        /// PIN (falls back to CALTRACK_PIN)
        #[arg(long)]
        pin: Option<String>,

        /// Day to list (YYYY-MM-DD)
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Correct the nutrition numbers of an entry
    Edit {
        /// Entry id (a unique prefix is enough)
        id: String,

        /// PIN (falls back to CALTRACK_PIN)
        #[arg(long)]
        pin: Option<String>,

        /// New calories in kcal
        #[arg(long)]
        calories: Option<i64>,

        /// New protein in grams
        #[arg(long)]
        protein: Option<f64>,

        /// New carbohydrates in grams
        #[arg(long)]
        carbs: Option<f64>,

        /// New fat in grams
        #[arg(long)]
        fat: Option<f64>,
    },

    /// Delete an entry
    Delete {
        /// Entry id (a unique prefix is enough)
        id: String,

        /// PIN (falls back to CALTRACK_PIN)
        #[arg(long)]
        pin: Option<String>,
    },

    /// Delete all entries for a day (today by default)
    Clear {
        /// PIN (falls back to CALTRACK_PIN)
        #[arg(long)]
        pin: Option<String>,

        /// Day to clear (YYYY-MM-DD)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
}

/// Dispatch a log subcommand
pub async fn handle(database: &Database, action: LogCommand) -> AppResult<()> {
    match action {
        LogCommand::Add {
            description,
            pin,
            image,
            no_estimate,
            calories,
            protein,
            carbs,
            fat,
        } => {
            add(
                database,
                &description,
                pin,
                image,
                no_estimate,
                calories,
                protein,
                carbs,
                fat,
            )
            .await
        }
        LogCommand::List { pin, date } => list(database, pin, date).await,
        LogCommand::Edit {
            id,
            pin,
            calories,
            protein,
            carbs,
            fat,
        } => edit(database, &id, pin, calories, protein, carbs, fat).await,
        LogCommand::Delete { id, pin } => delete(database, &id, pin).await,
        LogCommand::Clear { pin, date } => clear(database, pin, date).await,
    }
}

#[allow(clippy::too_many_arguments)]
async fn add(
    database: &Database,
    description: &str,
    pin: Option<String>,
    image: Option<PathBuf>,
    no_estimate: bool,
    calories: Option<i64>,
    protein: Option<f64>,
    carbs: Option<f64>,
    fat: Option<f64>,
) -> AppResult<()> {
    let pin = resolve_pin(pin)?;
    authenticate(database, &pin).await?;

    let estimate = if no_estimate {
        let calories = calories
            .ok_or_else(|| AppError::invalid_input("--calories is required with --no-estimate"))?;
        NutritionEstimate {
            calories,
            protein_g: protein.unwrap_or(0.0),
            carbs_g: carbs.unwrap_or(0.0),
            fat_g: fat.unwrap_or(0.0),
            items: Vec::new(),
        }
    } else {
        let provider = OpenAiCompatibleProvider::from_env()?;
        let estimator = NutritionEstimator::new(Box::new(provider));

        let food_image = match image {
            Some(path) => Some(FoodImage::from_path(&path).await?),
            None => None,
        };

        println!("Estimating nutrition...");
        estimator.estimate(description, food_image.as_ref()).await?
    };

    if estimate.is_zeroed() && !no_estimate {
        println!("The model output could not be read; logging zeros.");
        println!("Correct the entry later with `caltrack-cli log edit`.");
    }

    for item in &estimate.items {
        println!(
            "  {} - {} kcal (P {:.1}g / C {:.1}g / F {:.1}g)",
            item.name, item.calories, item.protein_g, item.carbs_g, item.fat_g
        );
    }

    let entry = FoodEntry::new(
        description,
        estimate.calories,
        estimate.protein_g,
        estimate.carbs_g,
        estimate.fat_g,
    );
    database.insert_entry(&entry).await?;

    println!(
        "Logged {} kcal (P {:.1}g / C {:.1}g / F {:.1}g)  id={}",
        entry.calories, entry.protein_g, entry.carbs_g, entry.fat_g, entry.id
    );
    Ok(())
}

async fn list(database: &Database, pin: Option<String>, date: Option<NaiveDate>) -> AppResult<()> {
    let pin = resolve_pin(pin)?;
    authenticate(database, &pin).await?;

    let date = date.unwrap_or_else(|| Utc::now().date_naive());
    let (start, end) = day_bounds_utc(date);
    let entries = database.list_entries_between(start, end).await?;

    if entries.is_empty() {
        println!("No food logged on {date}");
        return Ok(());
    }

    println!("Entries for {date}:");
    for entry in &entries {
        println!(
            "  {}  {:>5} kcal  P {:>5.1}g  C {:>5.1}g  F {:>5.1}g  [{}]  {}",
            entry.logged_at.format("%H:%M"),
            entry.calories,
            entry.protein_g,
            entry.carbs_g,
            entry.fat_g,
            &entry.id.to_string()[..8],
            entry.description
        );
    }
    Ok(())
}

async fn edit(
    database: &Database,
    id: &str,
    pin: Option<String>,
    calories: Option<i64>,
    protein: Option<f64>,
    carbs: Option<f64>,
    fat: Option<f64>,
) -> AppResult<()> {
    let pin = resolve_pin(pin)?;
    authenticate(database, &pin).await?;

    if calories.is_none() && protein.is_none() && carbs.is_none() && fat.is_none() {
        return Err(AppError::invalid_input(
            "nothing to change: pass at least one of --calories, --protein, --carbs, --fat",
        ));
    }

    let id = resolve_entry_id(database, id).await?;
    let entry = database
        .get_entry(id)
        .await?
        .ok_or_else(|| AppError::not_found("entry"))?;

    let updated = database
        .update_entry_nutrition(
            id,
            calories.unwrap_or(entry.calories),
            protein.unwrap_or(entry.protein_g),
            carbs.unwrap_or(entry.carbs_g),
            fat.unwrap_or(entry.fat_g),
        )
        .await?;
    if !updated {
        return Err(AppError::not_found("entry"));
    }

    println!("Entry {id} updated");
    Ok(())
}

async fn delete(database: &Database, id: &str, pin: Option<String>) -> AppResult<()> {
    let pin = resolve_pin(pin)?;
    authenticate(database, &pin).await?;

    let id = resolve_entry_id(database, id).await?;
    if database.delete_entry(id).await? {
        println!("Entry {id} deleted");
        Ok(())
    } else {
        Err(AppError::not_found("entry"))
    }
}

async fn clear(database: &Database, pin: Option<String>, date: Option<NaiveDate>) -> AppResult<()> {
    let pin = resolve_pin(pin)?;
    authenticate(database, &pin).await?;

    let date = date.unwrap_or_else(|| Utc::now().date_naive());
    let (start, end) = day_bounds_utc(date);
    let removed = database.delete_entries_between(start, end).await?;

    println!("Removed {removed} entries from {date}");
    Ok(())
}

/// Resolve a full or prefixed entry id
async fn resolve_entry_id(database: &Database, input: &str) -> AppResult<Uuid> {
    if let Ok(id) = Uuid::parse_str(input) {
        return Ok(id);
    }

    let matches: Vec<Uuid> = database
        .list_entries()
        .await?
        .into_iter()
        .map(|e| e.id)
        .filter(|id| id.to_string().starts_with(input))
        .collect();

    match matches.as_slice() {
        [] => Err(AppError::not_found("entry")),
        [id] => Ok(*id),
        _ => Err(AppError::invalid_input(format!(
            "id prefix '{input}' is ambiguous ({} matches)",
            matches.len()
        ))),
    }
}
