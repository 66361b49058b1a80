// ABOUTME: Main library entry point for the CalTrack engine
// ABOUTME: Storage, PIN auth gate, LLM nutrition estimation, and aggregation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 CalTrack

#![deny(unsafe_code)]

//! # CalTrack
//!
//! A local-first, single-user calorie tracking engine. The user describes (or
//! photographs) food, an OpenAI-compatible chat-completion endpoint estimates
//! the macronutrient content, and entries land in a local SQLite store that
//! daily/weekly/lifetime views aggregate on the fly.
//!
//! ## Architecture
//!
//! - **Models**: food entries, the single user profile, nutrition estimates
//! - **Database**: SQLite storage with idempotent migrations
//! - **Auth**: PIN gate over the profile record (bcrypt at rest)
//! - **LLM**: chat-completion provider abstraction and OpenAI-compatible client
//! - **Estimator**: prompt assembly, image attachment, tolerant JSON extraction
//! - **Intelligence**: pure aggregation over fetched entries
//!
//! ## Example
//!
//! ```rust,no_run
//! use caltrack::config::AppConfig;
//! use caltrack::database::Database;
//! use caltrack::errors::AppResult;
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let config = AppConfig::from_env()?;
//!     let database = Database::new(&config.database_url).await?;
//!     println!("entries logged: {}", database.count_entries().await?);
//!     Ok(())
//! }
//! ```

/// PIN-based authentication gate and session management
pub mod auth;

/// Configuration management
pub mod config;

/// Application constants and default values
pub mod constants;

/// SQLite-backed persistent store
pub mod database;

/// Unified error handling
pub mod errors;

/// Nutrition estimation over a chat-completion provider
pub mod estimator;

/// Derived statistics over logged entries
pub mod intelligence;

/// LLM provider abstraction and OpenAI-compatible client
pub mod llm;

/// Structured logging configuration
pub mod logging;

/// Core data models
pub mod models;
