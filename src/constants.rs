// ABOUTME: System-wide constants and default configuration values for CalTrack
// ABOUTME: Environment variable names, defaults, and operational limits
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 CalTrack

//! Application constants, grouped by concern.

/// Environment variable names
pub mod env_names {
    /// Database URL override
    pub const DATABASE_URL: &str = "CALTRACK_DATABASE_URL";
    /// PIN fallback for non-interactive CLI use
    pub const PIN: &str = "CALTRACK_PIN";
    /// Chat-completions endpoint base URL
    pub const OPENAI_BASE_URL: &str = "OPENAI_BASE_URL";
    /// API key for the chat-completions endpoint
    pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";
    /// Model to request
    pub const OPENAI_MODEL: &str = "OPENAI_MODEL";
}

/// Default values applied when the environment does not override them
pub mod defaults {
    /// Daily calorie goal for new accounts (kcal)
    pub const DAILY_CALORIE_GOAL: i64 = 2000;
    /// Default chat-completions endpoint
    pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
    /// Default estimation model
    pub const OPENAI_MODEL: &str = "gpt-4o-mini";
    /// Sampling temperature for estimation requests
    pub const ESTIMATE_TEMPERATURE: f32 = 0.3;
    /// Completion budget for estimation requests
    pub const ESTIMATE_MAX_TOKENS: u32 = 500;
    /// Database file name when no URL is configured
    pub const DATABASE_FILE: &str = "caltrack.db";
}

/// Operational limits
pub mod limits {
    /// Required PIN length (ASCII digits)
    pub const PIN_LENGTH: usize = 4;
    /// Connection timeout for the estimation endpoint
    pub const CONNECT_TIMEOUT_SECS: u64 = 10;
    /// Request timeout for the estimation endpoint
    pub const REQUEST_TIMEOUT_SECS: u64 = 60;
}

/// Service names used in error messages and logging
pub mod service_names {
    /// The engine itself
    pub const CALTRACK: &str = "caltrack";
    /// The upstream estimation service
    pub const NUTRITION_API: &str = "NutritionAPI";
}
