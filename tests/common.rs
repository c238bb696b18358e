// ABOUTME: Shared test utilities and fixtures for integration tests
// ABOUTME: Provides an in-memory database plus user, roster, catalog and session helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used
)]
//! Shared test utilities for `cheer_server`
//!
//! Fixtures write straight to the pool: users, rosters, the exercise catalog
//! and measurement types are owned by other services in production.

use anyhow::Result;
use chrono::{DateTime, Duration, SecondsFormat, Utc};
use cheer_server::database::Database;
use sqlx::SqlitePool;
use std::sync::Once;
use uuid::Uuid;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            Ok("WARN" | "ERROR") | _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Fresh migrated in-memory database
pub async fn create_test_database() -> Result<Database> {
    init_test_logging();
    Ok(Database::new("sqlite::memory:").await?)
}

/// Stored timestamp text for `days_ago` days before now
pub fn days_ago(days: i64) -> String {
    stored_timestamp(Utc::now() - Duration::days(days))
}

pub fn stored_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Insert an active user with a profile
pub async fn create_user(pool: &SqlitePool, first_name: &str, last_name: &str) -> Result<Uuid> {
    let id = Uuid::new_v4();
    let now = days_ago(0);
    sqlx::query("INSERT INTO users (id, email, is_active, created_at) VALUES ($1, $2, 1, $3)")
        .bind(id.to_string())
        .bind(format!("{id}@test.cheer"))
        .bind(&now)
        .execute(pool)
        .await?;
    sqlx::query(
        "INSERT INTO user_profiles (user_id, first_name, last_name, updated_at) VALUES ($1, $2, $3, $4)",
    )
    .bind(id.to_string())
    .bind(first_name)
    .bind(last_name)
    .bind(&now)
    .execute(pool)
    .await?;
    Ok(id)
}

/// Insert an active user without a profile row
pub async fn create_user_without_profile(pool: &SqlitePool) -> Result<Uuid> {
    let id = Uuid::new_v4();
    sqlx::query("INSERT INTO users (id, email, is_active, created_at) VALUES ($1, $2, 1, $3)")
        .bind(id.to_string())
        .bind(format!("{id}@test.cheer"))
        .bind(days_ago(0))
        .execute(pool)
        .await?;
    Ok(id)
}

pub async fn deactivate_user(pool: &SqlitePool, user: Uuid) -> Result<()> {
    sqlx::query("UPDATE users SET is_active = 0 WHERE id = $1")
        .bind(user.to_string())
        .execute(pool)
        .await?;
    Ok(())
}

/// Link `athlete` to `coach` with the given relationship state
pub async fn link_athlete(
    pool: &SqlitePool,
    coach: Uuid,
    athlete: Uuid,
    is_active: bool,
) -> Result<()> {
    sqlx::query(
        "INSERT INTO coach_athletes (coach_id, athlete_id, is_active, created_at) VALUES ($1, $2, $3, $4)",
    )
    .bind(coach.to_string())
    .bind(athlete.to_string())
    .bind(i64::from(is_active))
    .bind(days_ago(0))
    .execute(pool)
    .await?;
    Ok(())
}

/// Insert a catalog exercise and return its id
pub async fn create_exercise(pool: &SqlitePool, name: &str) -> Result<i64> {
    let now = days_ago(0);
    let result = sqlx::query(
        r"
        INSERT INTO exercises (name, description, cues, video_url, image_url, created_at, updated_at)
        VALUES ($1, $2, $3, $4, NULL, $5, $5)
        ",
    )
    .bind(name)
    .bind(format!("{name} description"))
    .bind(format!("{name} cues"))
    .bind(format!("https://video.test/{}", name.to_lowercase().replace(' ', "-")))
    .bind(&now)
    .execute(pool)
    .await?;
    Ok(result.last_insert_rowid())
}

/// Insert a measurement type and return its id
pub async fn create_measurement(pool: &SqlitePool, name: &str, unit: Option<&str>) -> Result<i64> {
    let result =
        sqlx::query("INSERT INTO measurements (name, unit, created_at) VALUES ($1, $2, $3)")
            .bind(name)
            .bind(unit)
            .bind(days_ago(0))
            .execute(pool)
            .await?;
    Ok(result.last_insert_rowid())
}

/// Insert a measurement session with an explicit creation time
pub async fn insert_session(
    pool: &SqlitePool,
    athlete: Uuid,
    measurement_id: i64,
    result: Option<f64>,
    unit: Option<&str>,
    created_at: &str,
) -> Result<i64> {
    let inserted = sqlx::query(
        r"
        INSERT INTO measurement_sessions (
            athlete_id, measurement_id, result, status, measurement_unit, created_at, updated_at
        ) VALUES ($1, $2, $3, 1, $4, $5, $5)
        ",
    )
    .bind(athlete.to_string())
    .bind(measurement_id)
    .bind(result)
    .bind(unit)
    .bind(created_at)
    .execute(pool)
    .await?;
    Ok(inserted.last_insert_rowid())
}

/// Count rows in `table`
pub async fn count_rows(pool: &SqlitePool, table: &str) -> i64 {
    let (count,): (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await
        .unwrap();
    count
}
