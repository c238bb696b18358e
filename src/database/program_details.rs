// ABOUTME: Builds the nested program detail document in one store round trip
// ABOUTME: Flat program/slot/exercise/workout rows are folded into slots with their past workouts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::columns::{decode_sets, parse_date, parse_timestamp};
use super::programs::{row_to_exercise, EXERCISE_COLUMNS};
use crate::errors::{AppError, AppResult, DatabaseError};
use crate::models::{ExerciseSlotDetail, PastWorkout, ProgramDetail};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use tracing::debug;
use uuid::Uuid;

/// Store reader for the program detail view
pub struct ProgramDetailAggregator {
    pool: SqlitePool,
}

impl ProgramDetailAggregator {
    /// Create a new aggregator
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// One program with every visible slot, its catalog metadata and the
    /// requesting user's workout history for that exercise (newest first)
    ///
    /// All of it comes from a single query, so the document reflects one
    /// consistent point in time.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when the program does not exist, is soft-deleted or
    /// is owned by someone else
    pub async fn get_program_details(
        &self,
        owner: Uuid,
        program_id: i64,
    ) -> AppResult<ProgramDetail> {
        let query = format!(
            r"
            SELECT p.program_id, p.name, p.type, p.training_type, p.started_at, p.finished_at,
                   p.created_at, p.updated_at,
                   pe.program_exercise_id, pe.type AS slot_type, pe.status AS slot_status,
                   pe.sets AS slot_sets,
                   {EXERCISE_COLUMNS},
                   td.training_data_id, td.sets AS workout_sets, td.note AS workout_note,
                   td.created_at AS workout_created_at, td.updated_at AS workout_updated_at
            FROM programs p
            LEFT JOIN program_exercises pe
                   ON pe.program_id = p.program_id
                  AND (pe.is_deleted = 0 OR pe.is_deleted IS NULL)
            LEFT JOIN exercises e ON e.exercise_id = pe.exercise_id
            LEFT JOIN training_data td
                   ON td.exercise_id = pe.exercise_id
                  AND td.user_id = $2
            WHERE p.program_id = $1
              AND p.created_by = $2
              AND (p.is_deleted = 0 OR p.is_deleted IS NULL)
            ORDER BY pe.program_exercise_id ASC, td.created_at DESC, td.training_data_id DESC
            "
        );

        let rows = sqlx::query(&query)
            .bind(program_id)
            .bind(owner.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DatabaseError::query("Failed to load program details", e))?;

        let rows = rows
            .iter()
            .map(row_to_detail_row)
            .collect::<AppResult<Vec<_>>>()?;
        let detail = fold_detail(rows).ok_or_else(|| AppError::not_found("Program"))?;

        debug!(
            user.id = %owner,
            program.id = program_id,
            exercises = detail.exercises.len(),
            "Loaded program details"
        );
        Ok(detail)
    }
}

/// One joined row: the program, optionally a slot, optionally one past workout
#[derive(Debug, Clone)]
struct DetailRow {
    program: ProgramDetail,
    slot: Option<ExerciseSlotDetail>,
    workout: Option<PastWorkout>,
}

fn row_to_detail_row(row: &SqliteRow) -> AppResult<DetailRow> {
    let created_at: String = row.get("created_at");
    let updated_at: String = row.get("updated_at");
    let program = ProgramDetail {
        program_id: row.get("program_id"),
        name: row.get("name"),
        program_type: row.get("type"),
        training_type: row.get("training_type"),
        started_at: parse_date(row.get("started_at"), "programs.started_at")?,
        finished_at: parse_date(row.get("finished_at"), "programs.finished_at")?,
        created_at: parse_timestamp(&created_at, "programs.created_at")?,
        updated_at: parse_timestamp(&updated_at, "programs.updated_at")?,
        exercises: Vec::new(),
    };

    let slot_id: Option<i64> = row.get("program_exercise_id");
    let exercise_id: Option<i64> = row.get("exercise_exercise_id");
    let slot = match (slot_id, exercise_id) {
        (Some(program_exercise_id), Some(_)) => {
            let exercise = row_to_exercise(row)?;
            Some(ExerciseSlotDetail {
                program_exercise_id,
                exercise_id: exercise.exercise_id,
                name: exercise.name.clone(),
                slot_type: row.get("slot_type"),
                status: row.get("slot_status"),
                sets: decode_sets(row.get("slot_sets"))?,
                exercise_meta: exercise.meta(),
                past_workouts: Vec::new(),
            })
        }
        _ => None,
    };

    let workout_id: Option<i64> = row.get("training_data_id");
    let workout = match workout_id {
        Some(training_data_id) => {
            let created_at: String = row.get("workout_created_at");
            let updated_at: String = row.get("workout_updated_at");
            Some(PastWorkout {
                training_data_id,
                created_at: parse_timestamp(&created_at, "training_data.created_at")?,
                updated_at: parse_timestamp(&updated_at, "training_data.updated_at")?,
                note: row.get("workout_note"),
                sets: decode_sets(row.get("workout_sets"))?.unwrap_or_default(),
            })
        }
        None => None,
    };

    Ok(DetailRow {
        program,
        slot,
        workout,
    })
}

/// Fold rows ordered by slot, then workout recency, into one document
///
/// Returns `None` for an empty row set (no visible program).
fn fold_detail(rows: Vec<DetailRow>) -> Option<ProgramDetail> {
    let mut rows = rows.into_iter();
    let first = rows.next()?;
    let mut detail = first.program.clone();

    for DetailRow { slot, workout, .. } in std::iter::once(first).chain(rows) {
        let Some(slot) = slot else {
            continue;
        };
        let same_slot = detail
            .exercises
            .last()
            .is_some_and(|last| last.program_exercise_id == slot.program_exercise_id);
        if !same_slot {
            detail.exercises.push(slot);
        }
        if let (Some(workout), Some(current)) = (workout, detail.exercises.last_mut()) {
            current.past_workouts.push(workout);
        }
    }

    Some(detail)
}
