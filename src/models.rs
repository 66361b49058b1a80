// ABOUTME: Core data models for the CalTrack engine
// ABOUTME: Defines FoodEntry, UserProfile, and nutrition estimate structures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 CalTrack

//! # Data Models
//!
//! Core data structures shared by the store, the authentication gate, the
//! estimator, and the aggregation layer.
//!
//! ## Core Models
//!
//! - [`FoodEntry`]: a single logged food item with its macronutrients
//! - [`UserProfile`]: the single local user (PIN hash, daily goal)
//! - [`NutritionEstimate`]: the totals extracted from one estimation call
//! - [`EstimatedItem`]: per-item breakdown returned by the model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single logged food entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodEntry {
    /// Unique identifier
    pub id: Uuid,
    /// When the food was logged
    pub logged_at: DateTime<Utc>,
    /// Free-text description of the food (e.g., "150g grilled chicken with rice")
    pub description: String,
    /// Energy in kcal
    pub calories: i64,
    /// Protein in grams
    pub protein_g: f64,
    /// Carbohydrates in grams
    pub carbs_g: f64,
    /// Fat in grams
    pub fat_g: f64,
}

impl FoodEntry {
    /// Create a new entry stamped with a fresh id and the current time
    #[must_use]
    pub fn new(
        description: impl Into<String>,
        calories: i64,
        protein_g: f64,
        carbs_g: f64,
        fat_g: f64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            logged_at: Utc::now(),
            description: description.into(),
            calories,
            protein_g,
            carbs_g,
            fat_g,
        }
    }

    /// Override the logged-at timestamp (backdating, tests)
    #[must_use]
    pub const fn with_logged_at(mut self, logged_at: DateTime<Utc>) -> Self {
        self.logged_at = logged_at;
        self
    }
}

/// The single local user profile
///
/// At most one profile row ever exists; the authentication gate enforces this
/// at registration time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    /// Unique identifier
    pub id: Uuid,
    /// Display name chosen at registration
    pub username: String,
    /// bcrypt hash of the 4-digit PIN. The raw PIN is never stored.
    #[serde(skip_serializing)]
    pub pin_hash: String,
    /// Daily calorie goal in kcal
    pub daily_calorie_goal: i64,
    /// When the account was created
    pub created_at: DateTime<Utc>,
}

impl UserProfile {
    /// Create a new profile with a fresh id and creation timestamp
    #[must_use]
    pub fn new(username: impl Into<String>, pin_hash: impl Into<String>, daily_calorie_goal: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            username: username.into(),
            pin_hash: pin_hash.into(),
            daily_calorie_goal,
            created_at: Utc::now(),
        }
    }
}

/// Nutrition totals extracted from one estimation call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutritionEstimate {
    /// Estimated energy in kcal
    pub calories: i64,
    /// Estimated protein in grams
    pub protein_g: f64,
    /// Estimated carbohydrates in grams
    pub carbs_g: f64,
    /// Estimated fat in grams
    pub fat_g: f64,
    /// Per-item breakdown as returned by the model (may be empty)
    #[serde(default)]
    pub items: Vec<EstimatedItem>,
}

impl NutritionEstimate {
    /// The fallback estimate used when model output cannot be parsed
    #[must_use]
    pub const fn zeroed() -> Self {
        Self {
            calories: 0,
            protein_g: 0.0,
            carbs_g: 0.0,
            fat_g: 0.0,
            items: Vec::new(),
        }
    }

    /// Whether every field is zero (the parse-failure fallback shape)
    #[must_use]
    pub fn is_zeroed(&self) -> bool {
        self.calories == 0
            && self.protein_g == 0.0
            && self.carbs_g == 0.0
            && self.fat_g == 0.0
            && self.items.is_empty()
    }
}

/// One meal or item the model identified within a description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimatedItem {
    /// Item description as the model named it
    pub name: String,
    /// Energy in kcal
    pub calories: i64,
    /// Protein in grams
    pub protein_g: f64,
    /// Carbohydrates in grams
    pub carbs_g: f64,
    /// Fat in grams
    pub fat_g: f64,
}
