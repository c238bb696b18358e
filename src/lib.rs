// ABOUTME: Main library entry point for the Cheer coaching API backend
// ABOUTME: Program composition, workout logging and team measurement analytics over SQLite
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Cheer Server
//!
//! Storage-side core of the Cheer coaching API. Coaches and athletes build
//! training programs out of catalog exercises, log workouts against program
//! slots, and track performance tests that feed team leaderboards.
//!
//! The HTTP layer lives elsewhere. It authenticates a user, calls one of the
//! repository traits in [`database::repositories`], and serializes either the
//! returned model or an [`errors::ErrorResponse`].
//!
//! ## Architecture
//!
//! - **Config**: environment-driven database configuration
//! - **Database**: `SQLite` pool, schema migrations and the store managers
//! - **Repositories**: `async_trait` seams handed to the transport layer
//! - **Logging**: structured `tracing` setup
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use cheer_server::config::DatabaseConfig;
//! use cheer_server::database::repositories::ProgramRepository;
//! use cheer_server::database::Database;
//! use cheer_server::errors::AppResult;
//! use uuid::Uuid;
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let db = Database::from_config(&DatabaseConfig::from_env()?).await?;
//!     let programs = db.programs().list_programs(Uuid::new_v4(), None).await?;
//!     println!("{} programs", programs.len());
//!     Ok(())
//! }
//! ```

/// Environment-driven configuration
pub mod config;

/// `SQLite` store, migrations, managers and repository traits
pub mod database;

/// Unified error handling (re-exported from `cheer-core`)
pub mod errors;

/// Structured logging setup
pub mod logging;

/// Domain models (re-exported from `cheer-core`)
pub mod models;

pub use cheer_core::{analytics, constants};
