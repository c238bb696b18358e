// ABOUTME: Measurement session store operations: team leaderboards, athlete progress, rosters
// ABOUTME: Lower results are better; ranking and summary math live in cheer_core::analytics
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::columns::{now_timestamp, parse_timestamp, parse_user_id, write_error};
use super::transactions::SqliteTransactionGuard;
use crate::analytics::{rank_leaderboard, summarize_progress};
use crate::errors::{AppError, AppResult, DatabaseError};
use crate::models::{
    AthleteBest, AthleteProgress, CoachAthlete, MeasurementGroup, MeasurementSession,
    NewMeasurement, ProgressEntry,
};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use tracing::{debug, info};
use uuid::Uuid;

/// Store manager for measurement sessions and the analytics built on them
pub struct MeasurementAnalytics {
    pool: SqlitePool,
}

impl MeasurementAnalytics {
    /// Create a new measurement manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Per-measurement leaderboards for a coach's active athletes
    ///
    /// Each athlete's best result is their minimum non-null result. Athletes
    /// with an inactive account or an inactive coaching relationship are left
    /// out. Ranks are 1-based output positions, so ties get consecutive ranks.
    ///
    /// # Errors
    ///
    /// Returns an error if the store query fails
    pub async fn team_leaderboard(&self, coach: Uuid) -> AppResult<Vec<MeasurementGroup>> {
        let rows = sqlx::query(
            r"
            SELECT m.measurement_id, m.name AS measurement_name, m.unit,
                   ms.athlete_id, up.first_name, up.last_name,
                   MIN(ms.result) AS best_result
            FROM coach_athletes ca
            JOIN users u ON u.id = ca.athlete_id AND u.is_active = 1
            JOIN measurement_sessions ms
                 ON ms.athlete_id = ca.athlete_id AND ms.result IS NOT NULL
            JOIN measurements m ON m.measurement_id = ms.measurement_id
            LEFT JOIN user_profiles up ON up.user_id = ca.athlete_id
            WHERE ca.coach_id = $1 AND ca.is_active = 1
            GROUP BY m.measurement_id, m.name, m.unit, ms.athlete_id, up.first_name, up.last_name
            ORDER BY m.measurement_id ASC, best_result ASC, ms.athlete_id ASC
            ",
        )
        .bind(coach.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DatabaseError::query("Failed to load team leaderboard", e))?;

        let bests = rows
            .iter()
            .map(row_to_athlete_best)
            .collect::<AppResult<Vec<_>>>()?;
        let groups = rank_leaderboard(bests);
        debug!(coach.id = %coach, measurements = groups.len(), "Built team leaderboard");
        Ok(groups)
    }

    /// Progress history for one athlete and measurement, newest first
    ///
    /// The summary's baseline is the second-most-recent session; see
    /// [`summarize_progress`].
    ///
    /// # Errors
    ///
    /// Returns an error if the store query fails
    pub async fn athlete_progress(
        &self,
        athlete: Uuid,
        measurement_id: i64,
    ) -> AppResult<AthleteProgress> {
        let rows = sqlx::query(
            r"
            SELECT session_id, result, measurement_unit, status, created_at
            FROM measurement_sessions
            WHERE athlete_id = $1 AND measurement_id = $2 AND result IS NOT NULL
            ORDER BY created_at DESC, session_id DESC
            ",
        )
        .bind(athlete.to_string())
        .bind(measurement_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DatabaseError::query("Failed to load athlete progress", e))?;

        let history = rows
            .iter()
            .map(row_to_progress_entry)
            .collect::<AppResult<Vec<_>>>()?;
        Ok(summarize_progress(history))
    }

    /// Active roster of a coach, ordered by last name then first name
    ///
    /// # Errors
    ///
    /// Returns an error if the store query fails
    pub async fn list_athletes_of_coach(&self, coach: Uuid) -> AppResult<Vec<CoachAthlete>> {
        let rows = sqlx::query(
            r"
            SELECT ca.athlete_id, up.first_name, up.last_name, u.is_active
            FROM coach_athletes ca
            JOIN users u ON u.id = ca.athlete_id
            LEFT JOIN user_profiles up ON up.user_id = ca.athlete_id
            WHERE ca.coach_id = $1 AND ca.is_active = 1
            ORDER BY up.last_name ASC, up.first_name ASC, ca.athlete_id ASC
            ",
        )
        .bind(coach.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DatabaseError::query("Failed to list coach athletes", e))?;

        rows.iter()
            .map(|row| {
                let athlete_id: String = row.get("athlete_id");
                let is_active: i64 = row.get("is_active");
                Ok(CoachAthlete {
                    athlete_id: parse_user_id(&athlete_id, "coach_athletes.athlete_id")?,
                    first_name: row.get("first_name"),
                    last_name: row.get("last_name"),
                    is_active: is_active != 0,
                })
            })
            .collect()
    }

    /// Append one measurement session
    ///
    /// The unit defaults to the measurement type's unit.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a non-finite result or an unknown athlete,
    /// `NotFound` when the measurement type does not exist, or a store failure
    pub async fn record_measurement(
        &self,
        measurement: &NewMeasurement,
    ) -> AppResult<MeasurementSession> {
        if !measurement.result.is_finite() {
            return Err(AppError::invalid_input(
                "Measurement result must be a finite number",
            ));
        }

        let mut guard = SqliteTransactionGuard::begin(&self.pool, "record measurement").await?;

        let now = now_timestamp();
        let result = sqlx::query(
            r"
            INSERT INTO measurement_sessions (
                athlete_id, measurement_id, result, status, measurement_unit,
                created_at, updated_at
            )
            SELECT $1, m.measurement_id, $2, $3, COALESCE($4, m.unit), $5, $5
            FROM measurements m
            WHERE m.measurement_id = $6
            ",
        )
        .bind(measurement.athlete_id.to_string())
        .bind(measurement.result)
        .bind(measurement.status)
        .bind(measurement.unit.as_deref())
        .bind(&now)
        .bind(measurement.measurement_id)
        .execute(guard.executor()?)
        .await
        .map_err(write_error("Failed to record measurement", "athlete"))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Measurement"));
        }
        let session_id = result.last_insert_rowid();

        let row = sqlx::query(
            r"
            SELECT session_id, athlete_id, measurement_id, result, status, measurement_unit,
                   created_at, updated_at
            FROM measurement_sessions
            WHERE session_id = $1
            ",
        )
        .bind(session_id)
        .fetch_one(guard.executor()?)
        .await
        .map_err(|e| DatabaseError::query("Failed to read measurement session", e))?;
        let session = row_to_session(&row)?;

        guard.commit().await?;
        info!(
            athlete.id = %measurement.athlete_id,
            measurement.id = measurement.measurement_id,
            session.id = session_id,
            "Measurement recorded"
        );
        Ok(session)
    }
}

fn row_to_athlete_best(row: &SqliteRow) -> AppResult<AthleteBest> {
    let athlete_id: String = row.get("athlete_id");
    Ok(AthleteBest {
        measurement_id: row.get("measurement_id"),
        measurement_name: row.get("measurement_name"),
        unit: row.get("unit"),
        athlete_id: parse_user_id(&athlete_id, "measurement_sessions.athlete_id")?,
        first_name: row.get("first_name"),
        last_name: row.get("last_name"),
        best_result: row.get("best_result"),
    })
}

fn row_to_progress_entry(row: &SqliteRow) -> AppResult<ProgressEntry> {
    let created_at: String = row.get("created_at");
    Ok(ProgressEntry {
        session_id: row.get("session_id"),
        result: row.get("result"),
        unit: row.get("measurement_unit"),
        status: row.get("status"),
        created_at: parse_timestamp(&created_at, "measurement_sessions.created_at")?,
    })
}

fn row_to_session(row: &SqliteRow) -> AppResult<MeasurementSession> {
    let athlete_id: String = row.get("athlete_id");
    let created_at: String = row.get("created_at");
    let updated_at: String = row.get("updated_at");
    Ok(MeasurementSession {
        session_id: row.get("session_id"),
        athlete_id: parse_user_id(&athlete_id, "measurement_sessions.athlete_id")?,
        measurement_id: row.get("measurement_id"),
        result: row.get("result"),
        status: row.get("status"),
        measurement_unit: row.get("measurement_unit"),
        created_at: parse_timestamp(&created_at, "measurement_sessions.created_at")?,
        updated_at: parse_timestamp(&updated_at, "measurement_sessions.updated_at")?,
    })
}
