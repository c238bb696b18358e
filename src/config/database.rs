// ABOUTME: Database configuration types for SQLite connections
// ABOUTME: Parses DATABASE_URL, migration toggle and pool size from the environment
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::database::{DEFAULT_DATABASE_URL, DEFAULT_MAX_CONNECTIONS};
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::path::PathBuf;

/// Type-safe database location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DatabaseUrl {
    /// `SQLite` database with file path
    SQLite {
        /// Path to `SQLite` database file
        path: PathBuf,
    },
    /// In-memory `SQLite` (for testing)
    Memory,
}

impl DatabaseUrl {
    /// Parse from string with validation
    ///
    /// # Errors
    ///
    /// Returns a config error for `PostgreSQL` URLs (only `SQLite` is shipped)
    /// and for empty input
    pub fn parse_url(s: &str) -> AppResult<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(AppError::config("DATABASE_URL is empty"));
        }
        if s.starts_with("postgresql://") || s.starts_with("postgres://") {
            return Err(AppError::config(
                "PostgreSQL is not supported; use a sqlite: URL",
            ));
        }

        let path_str = s.strip_prefix("sqlite:").unwrap_or(s);
        let path_str = path_str.strip_prefix("//").unwrap_or(path_str);
        if path_str == ":memory:" {
            Ok(Self::Memory)
        } else {
            Ok(Self::SQLite {
                path: PathBuf::from(path_str),
            })
        }
    }

    /// Convert to a `sqlx` connection string
    #[must_use]
    pub fn to_connection_string(&self) -> String {
        match self {
            Self::SQLite { path } => format!("sqlite:{}", path.display()),
            Self::Memory => DEFAULT_DATABASE_URL.to_owned(),
        }
    }

    /// Check if this is an in-memory database
    #[must_use]
    pub const fn is_memory(&self) -> bool {
        matches!(self, Self::Memory)
    }
}

impl Default for DatabaseUrl {
    fn default() -> Self {
        Self::Memory
    }
}

impl Display for DatabaseUrl {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.to_connection_string())
    }
}

/// Database connection and management configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database location
    pub url: DatabaseUrl,
    /// Run schema migrations when the pool is opened
    pub auto_migrate: bool,
    /// Pool size for file-backed databases (in-memory always uses one connection)
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: DatabaseUrl::default(),
            auto_migrate: true,
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }
}

impl DatabaseConfig {
    /// Load database configuration from environment
    ///
    /// Reads `DATABASE_URL`, `AUTO_MIGRATE` and `DATABASE_MAX_CONNECTIONS`.
    ///
    /// # Errors
    ///
    /// Returns an error if any of the variables hold an invalid value
    pub fn from_env() -> AppResult<Self> {
        let max_connections: u32 = env_var_or(
            "DATABASE_MAX_CONNECTIONS",
            &DEFAULT_MAX_CONNECTIONS.to_string(),
        )
        .parse()
        .map_err(|e| {
            AppError::invalid_input(format!("Invalid DATABASE_MAX_CONNECTIONS value: {e}"))
        })?;
        if max_connections == 0 {
            return Err(AppError::invalid_input(
                "Invalid DATABASE_MAX_CONNECTIONS value: must be at least 1",
            ));
        }

        Ok(Self {
            url: DatabaseUrl::parse_url(&env_var_or("DATABASE_URL", DEFAULT_DATABASE_URL))?,
            auto_migrate: env_var_or("AUTO_MIGRATE", "true")
                .parse()
                .map_err(|e| AppError::invalid_input(format!("Invalid AUTO_MIGRATE value: {e}")))?,
            max_connections,
        })
    }
}

/// Get environment variable or default value
fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}
