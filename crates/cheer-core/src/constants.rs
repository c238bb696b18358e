// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Filter sentinels, service names, and default values shared across the workspace
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Program list filtering
pub mod programs {
    /// Type filter value meaning "no filter"
    pub const TYPE_FILTER_ALL: &str = "all";
    /// Separator used for the concatenated exercise-name display string
    pub const EXERCISE_NAME_SEPARATOR: &str = ", ";
    /// Status assigned to a new exercise slot when none is supplied
    pub const DEFAULT_SLOT_STATUS: i64 = 0;
}

/// Service identity
pub mod service_names {
    /// Service name used in structured logs
    pub const CHEER_SERVER: &str = "cheer-server";
}

/// Database defaults
pub mod database {
    /// Default `DATABASE_URL` when unset
    pub const DEFAULT_DATABASE_URL: &str = "sqlite::memory:";
    /// Default pool size for file-backed `SQLite`
    pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
}
