// ABOUTME: SQLite store for the Cheer server: pool setup, migrations and manager access
// ABOUTME: Hands out the repository implementations the transport layer depends on
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Database Management
//!
//! [`Database`] owns the `SQLite` pool. The managers in this module run the
//! actual statements; the [`repositories`] traits are the seam the HTTP layer
//! talks to.
//!
//! Every manager scopes its reads and writes by the acting user. A program
//! owned by someone else is reported exactly like a program that does not
//! exist.

mod columns;
mod measurements;
mod program_details;
mod programs;
mod schema;
mod workouts;

/// Repository traits and their `SQLite` implementations
pub mod repositories;

/// RAII transaction guard
pub mod transactions;

pub use measurements::MeasurementAnalytics;
pub use program_details::ProgramDetailAggregator;
pub use programs::ProgramManager;
pub use transactions::{SqliteTransactionGuard, TransactionGuard};
pub use workouts::WorkoutRecorder;

use crate::config::{DatabaseConfig, DatabaseUrl};
use crate::errors::{AppResult, DatabaseError};
use repositories::{MeasurementRepositoryImpl, ProgramRepositoryImpl, WorkoutRepositoryImpl};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use tracing::{debug, info};

/// Handle to the `SQLite` store
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open a database from a URL string and run migrations
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid, the pool cannot be opened or a
    /// migration step fails
    pub async fn new(database_url: &str) -> AppResult<Self> {
        let config = DatabaseConfig {
            url: DatabaseUrl::parse_url(database_url)?,
            ..DatabaseConfig::default()
        };
        Self::from_config(&config).await
    }

    /// Open a database from configuration, migrating when `auto_migrate` is set
    ///
    /// # Errors
    ///
    /// Returns an error if the pool cannot be opened or a migration step fails
    pub async fn from_config(config: &DatabaseConfig) -> AppResult<Self> {
        let pool = Self::connect(&config.url, config.max_connections).await?;
        let db = Self { pool };
        if config.auto_migrate {
            db.migrate().await?;
        }
        Ok(db)
    }

    async fn connect(url: &DatabaseUrl, max_connections: u32) -> AppResult<SqlitePool> {
        let options = SqliteConnectOptions::from_str(&url.to_connection_string())
            .map_err(|e| DatabaseError::connection("Invalid SQLite connection string", e))?
            .create_if_missing(true)
            .foreign_keys(true);

        // Each in-memory connection is a separate database, so keep exactly one alive
        let pool_options = if url.is_memory() {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(max_connections)
        };

        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(|e| DatabaseError::connection("Failed to open SQLite database", e))?;

        info!(database.url = %url, "Database pool opened");
        Ok(pool)
    }

    /// Get a reference to the pool for fixtures and seeding
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Create every table and index that does not exist yet
    ///
    /// # Errors
    ///
    /// Returns an error naming the migration step that failed
    pub async fn migrate(&self) -> AppResult<()> {
        for (step, statement) in schema::MIGRATIONS {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(|e| DatabaseError::migration(format!("Migration failed: {step}"), e))?;
            debug!(migration = step, "Migration applied");
        }
        info!(steps = schema::MIGRATIONS.len(), "Database migrations complete");
        Ok(())
    }

    /// Program composition and program details
    #[must_use]
    pub fn programs(&self) -> ProgramRepositoryImpl {
        ProgramRepositoryImpl::new(self.clone())
    }

    /// Workout logging
    #[must_use]
    pub fn workouts(&self) -> WorkoutRepositoryImpl {
        WorkoutRepositoryImpl::new(self.clone())
    }

    /// Team leaderboards, athlete progress and measurement sessions
    #[must_use]
    pub fn measurements(&self) -> MeasurementRepositoryImpl {
        MeasurementRepositoryImpl::new(self.clone())
    }
}
