// ABOUTME: Configuration management module for the Cheer server
// ABOUTME: Environment-only settings; currently the database connection
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration module for Cheer Server
//!
//! Settings come from environment variables only. Logging has its own
//! configuration in [`crate::logging::LoggingConfig`].

/// Database location, migration toggle and pool sizing
pub mod database;

pub use database::{DatabaseConfig, DatabaseUrl};
