// ABOUTME: Configuration management for CalTrack
// ABOUTME: Environment-only configuration, no config files
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 CalTrack

//! Configuration management. All settings come from environment variables
//! with sensible local-first defaults.

pub mod environment;

pub use environment::AppConfig;
