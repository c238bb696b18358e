// ABOUTME: Appends workout log entries against a program-exercise slot
// ABOUTME: Slot resolution, insert and re-read run in one transaction
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::columns::{
    decode_sets, encode_sets, now_timestamp, parse_timestamp, parse_user_id, write_error,
};
use super::transactions::SqliteTransactionGuard;
use crate::errors::{AppError, AppResult, DatabaseError};
use crate::models::{ExerciseSets, RecordWorkoutRequest, TrainingData};
use sqlx::{sqlite::SqliteRow, Row, SqliteConnection, SqlitePool};
use tracing::info;
use uuid::Uuid;

/// Store writer for the workout log
pub struct WorkoutRecorder {
    pool: SqlitePool,
}

impl WorkoutRecorder {
    /// Create a new recorder
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Log one workout for `user` against a slot of one of their programs
    ///
    /// The sets payload is validated before any store access. The slot must be
    /// visible and attached to `request.program_id`, and that program must be
    /// visible to `user`. When `exercise_id` is absent it is taken from the
    /// slot. Resolution, insert and re-read share one transaction, so a
    /// failure at any step leaves nothing behind.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a malformed sets payload or an unknown
    /// supplied exercise id, `NotFound` when the slot does not belong to the
    /// program, or a store failure
    pub async fn record_workout(
        &self,
        user: Uuid,
        request: &RecordWorkoutRequest,
    ) -> AppResult<TrainingData> {
        let sets = ExerciseSets::try_from(request.sets.clone())?;
        let encoded_sets = encode_sets(&sets)?;

        let mut guard = SqliteTransactionGuard::begin(&self.pool, "record workout").await?;

        let slot_exercise_id = resolve_slot(
            guard.executor()?,
            user,
            request.program_id,
            request.program_exercise_id,
        )
        .await?
        .ok_or_else(|| AppError::not_found("Program exercise"))?;
        let exercise_id = request.exercise_id.unwrap_or(slot_exercise_id);

        let now = now_timestamp();
        let result = sqlx::query(
            r"
            INSERT INTO training_data (
                program_exercise_id, user_id, exercise_id, sets, note, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $6)
            ",
        )
        .bind(request.program_exercise_id)
        .bind(user.to_string())
        .bind(exercise_id)
        .bind(&encoded_sets)
        .bind(request.note.as_deref().unwrap_or_default())
        .bind(&now)
        .execute(guard.executor()?)
        .await
        .map_err(write_error("Failed to record workout", "exercise id"))?;
        let training_data_id = result.last_insert_rowid();

        let row = sqlx::query(
            r"
            SELECT training_data_id, program_exercise_id, user_id, exercise_id, sets, note,
                   created_at, updated_at
            FROM training_data
            WHERE training_data_id = $1
            ",
        )
        .bind(training_data_id)
        .fetch_one(guard.executor()?)
        .await
        .map_err(|e| DatabaseError::query("Failed to read recorded workout", e))?;
        let entry = row_to_training_data(&row)?;

        guard.commit().await?;
        info!(
            user.id = %user,
            program.id = request.program_id,
            program_exercise.id = request.program_exercise_id,
            training_data.id = training_data_id,
            sets = sets.len(),
            "Workout recorded"
        );
        Ok(entry)
    }
}

/// Exercise id of a visible slot attached to a visible program owned by `user`
async fn resolve_slot(
    conn: &mut SqliteConnection,
    user: Uuid,
    program_id: i64,
    program_exercise_id: i64,
) -> AppResult<Option<i64>> {
    let row = sqlx::query(
        r"
        SELECT pe.exercise_id
        FROM program_exercises pe
        JOIN programs p ON p.program_id = pe.program_id
        WHERE pe.program_exercise_id = $1
          AND pe.program_id = $2
          AND (pe.is_deleted = 0 OR pe.is_deleted IS NULL)
          AND p.created_by = $3
          AND (p.is_deleted = 0 OR p.is_deleted IS NULL)
        ",
    )
    .bind(program_exercise_id)
    .bind(program_id)
    .bind(user.to_string())
    .fetch_optional(conn)
    .await
    .map_err(|e| DatabaseError::query("Failed to resolve program exercise", e))?;

    Ok(row.map(|r| r.get("exercise_id")))
}

fn row_to_training_data(row: &SqliteRow) -> AppResult<TrainingData> {
    let user_id: String = row.get("user_id");
    let created_at: String = row.get("created_at");
    let updated_at: String = row.get("updated_at");

    Ok(TrainingData {
        training_data_id: row.get("training_data_id"),
        program_exercise_id: row.get("program_exercise_id"),
        user_id: parse_user_id(&user_id, "training_data.user_id")?,
        exercise_id: row.get("exercise_id"),
        sets: decode_sets(row.get("sets"))?.unwrap_or_default(),
        note: row.get("note"),
        created_at: parse_timestamp(&created_at, "training_data.created_at")?,
        updated_at: parse_timestamp(&updated_at, "training_data.updated_at")?,
    })
}
