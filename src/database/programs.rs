// ABOUTME: Program composition store operations: programs and their exercise slots
// ABOUTME: Owner-scoped CRUD, soft delete, name search and the flat-rows-to-summary fold
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::columns::{
    contains_pattern, decode_sets, encode_sets, fold_name, format_date, is_deleted,
    now_timestamp, parse_date, parse_timestamp, parse_user_id, write_error,
};
use super::transactions::SqliteTransactionGuard;
use crate::constants::programs::EXERCISE_NAME_SEPARATOR;
use crate::errors::{AppError, AppResult, DatabaseError};
use crate::models::{
    type_filter, CreatedProgram, Exercise, ExerciseSlotSummary, NewProgram, Program,
    ProgramExercise, ProgramExerciseSpec, ProgramExerciseWithExercise, ProgramPatch,
    ProgramSummary,
};
use sqlx::{sqlite::SqliteRow, QueryBuilder, Row, Sqlite, SqliteConnection, SqlitePool};
use tracing::{debug, info};
use uuid::Uuid;

const PROGRAM_COLUMNS: &str = "program_id, name, type, training_type, started_at, finished_at, \
     created_at, updated_at, created_by, copied_from, is_deleted";

const SLOT_COLUMNS: &str = "pe.program_exercise_id, pe.program_id, pe.exercise_id, pe.type, \
     pe.sets, pe.status, pe.is_deleted, pe.created_at, pe.updated_at";

/// Catalog columns aliased so they never collide with slot or program columns
pub(super) const EXERCISE_COLUMNS: &str = "e.exercise_id AS exercise_exercise_id, \
     e.name AS exercise_name, e.description AS exercise_description, e.cues AS exercise_cues, \
     e.video_url AS exercise_video_url, e.image_url AS exercise_image_url, \
     e.created_at AS exercise_created_at, e.updated_at AS exercise_updated_at";

/// Store manager for programs and their exercise slots
pub struct ProgramManager {
    pool: SqlitePool,
}

impl ProgramManager {
    /// Create a new program manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// All visible programs owned by `owner`, newest first, with their slots
    ///
    /// `type_filter` of `None`, blank or `"all"` applies no type restriction.
    ///
    /// # Errors
    ///
    /// Returns an error if the store query fails
    pub async fn list_programs(
        &self,
        owner: Uuid,
        program_type: Option<&str>,
    ) -> AppResult<Vec<ProgramSummary>> {
        self.fetch_summaries(owner, None, type_filter(program_type))
            .await
    }

    /// Case-insensitive substring search on program names
    ///
    /// LIKE wildcards in `term` match literally. A blank term returns an empty
    /// list without touching the store.
    ///
    /// # Errors
    ///
    /// Returns an error if the store query fails
    pub async fn search_programs_by_name(
        &self,
        owner: Uuid,
        term: &str,
        program_type: Option<&str>,
    ) -> AppResult<Vec<ProgramSummary>> {
        let term = term.trim();
        if term.is_empty() {
            return Ok(Vec::new());
        }
        self.fetch_summaries(owner, Some(term), type_filter(program_type))
            .await
    }

    async fn fetch_summaries(
        &self,
        owner: Uuid,
        name_term: Option<&str>,
        program_type: Option<&str>,
    ) -> AppResult<Vec<ProgramSummary>> {
        let mut builder = QueryBuilder::<Sqlite>::new(
            r"
            SELECT p.program_id, p.name, p.type, p.training_type, p.started_at, p.finished_at,
                   p.created_at, p.updated_at,
                   pe.program_exercise_id, pe.exercise_id, pe.type AS slot_type,
                   pe.status AS slot_status, pe.sets AS slot_sets, e.name AS exercise_name
            FROM programs p
            LEFT JOIN program_exercises pe
                   ON pe.program_id = p.program_id
                  AND (pe.is_deleted = 0 OR pe.is_deleted IS NULL)
            LEFT JOIN exercises e ON e.exercise_id = pe.exercise_id
            WHERE (p.is_deleted = 0 OR p.is_deleted IS NULL)
              AND p.created_by = ",
        );
        builder.push_bind(owner.to_string());
        if let Some(program_type) = program_type {
            builder.push(" AND p.type = ").push_bind(program_type.to_owned());
        }
        if let Some(term) = name_term {
            builder
                .push(r" AND p.name_folded LIKE ")
                .push_bind(contains_pattern(term))
                .push(r" ESCAPE '\'");
        }
        builder.push(
            " ORDER BY p.created_at DESC, p.program_id DESC, pe.program_exercise_id ASC",
        );

        let rows = builder
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DatabaseError::query("Failed to list programs", e))?;

        let rows = rows
            .iter()
            .map(row_to_summary_row)
            .collect::<AppResult<Vec<_>>>()?;
        let summaries = fold_summaries(rows);
        debug!(
            user.id = %owner,
            programs = summaries.len(),
            search = name_term.is_some(),
            "Listed programs"
        );
        Ok(summaries)
    }

    /// Create a program owned by `owner`
    ///
    /// Only the allow-listed fields of [`NewProgram`] are written; ownership,
    /// timestamps and the delete flag are always server-assigned.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when the name is missing or `copied_from` names
    /// no program, or a store failure
    pub async fn create_program(&self, owner: Uuid, fields: &NewProgram) -> AppResult<Program> {
        Ok(self
            .create_program_with_exercises(owner, fields, &[])
            .await?
            .program)
    }

    /// Create a program and attach its exercise slots atomically
    ///
    /// Either the program and every slot are committed, or nothing is.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when the name is missing or an id (exercise or
    /// `copied_from`) names nothing, or a store failure. Nothing is written on
    /// any error.
    pub async fn create_program_with_exercises(
        &self,
        owner: Uuid,
        fields: &NewProgram,
        exercises: &[ProgramExerciseSpec],
    ) -> AppResult<CreatedProgram> {
        let name = fields.validated_name()?;
        let mut guard = SqliteTransactionGuard::begin(&self.pool, "create program").await?;

        let program_id = insert_program(guard.executor()?, owner, name, fields).await?;
        for spec in exercises {
            insert_slot(guard.executor()?, program_id, spec).await?;
        }
        let program = fetch_program(guard.executor()?, owner, program_id)
            .await?
            .ok_or_else(|| AppError::internal("Created program could not be re-read"))?;

        guard.commit().await?;
        info!(
            user.id = %owner,
            program.id = program_id,
            exercises = exercises.len(),
            "Program created"
        );
        Ok(CreatedProgram {
            program,
            total_exercises: exercises.len(),
        })
    }

    /// A single visible program
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when the program does not exist, is soft-deleted or
    /// belongs to someone else
    pub async fn get_program(&self, owner: Uuid, program_id: i64) -> AppResult<Program> {
        let mut conn = self
            .pool
            .acquire()
            .await
            .map_err(|e| DatabaseError::connection("Failed to acquire connection", e))?;
        fetch_program(&mut *conn, owner, program_id)
            .await?
            .ok_or_else(|| AppError::not_found("Program"))
    }

    /// Update only the fields present in `patch`, always bumping `updated_at`
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when the patch carries no allow-listed field or a
    /// blank name or an unknown `copied_from`, and `NotFound` when no visible
    /// owned row was updated
    pub async fn update_program(
        &self,
        owner: Uuid,
        program_id: i64,
        patch: &ProgramPatch,
    ) -> AppResult<()> {
        if patch.is_empty() {
            return Err(AppError::invalid_input("No fields to update"));
        }

        let mut builder = QueryBuilder::<Sqlite>::new("UPDATE programs SET updated_at = ");
        builder.push_bind(now_timestamp());
        if let Some(name) = &patch.name {
            let name = name.trim();
            if name.is_empty() {
                return Err(AppError::invalid_input("Program name cannot be blank"));
            }
            builder.push(", name = ").push_bind(name.to_owned());
            builder.push(", name_folded = ").push_bind(fold_name(name));
        }
        if let Some(program_type) = &patch.program_type {
            builder.push(", type = ").push_bind(program_type.clone());
        }
        if let Some(training_type) = &patch.training_type {
            builder.push(", training_type = ").push_bind(training_type.clone());
        }
        if let Some(started_at) = patch.started_at {
            builder.push(", started_at = ").push_bind(format_date(started_at));
        }
        if let Some(finished_at) = patch.finished_at {
            builder.push(", finished_at = ").push_bind(format_date(finished_at));
        }
        if let Some(copied_from) = patch.copied_from {
            builder.push(", copied_from = ").push_bind(copied_from);
        }
        builder
            .push(" WHERE program_id = ")
            .push_bind(program_id)
            .push(" AND created_by = ")
            .push_bind(owner.to_string())
            .push(" AND (is_deleted = 0 OR is_deleted IS NULL)");

        let result = builder
            .build()
            .execute(&self.pool)
            .await
            .map_err(write_error("Failed to update program", "copied_from program"))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Program"));
        }
        info!(user.id = %owner, program.id = program_id, "Program updated");
        Ok(())
    }

    /// Soft-delete (default) or physically delete an owned program
    ///
    /// The hard path also removes slots and logged workouts through the
    /// schema's cascading foreign keys.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when no owned row matches (for the soft path, no
    /// visible owned row)
    pub async fn delete_program(&self, owner: Uuid, program_id: i64, hard: bool) -> AppResult<()> {
        let outcome = if hard {
            sqlx::query("DELETE FROM programs WHERE program_id = $1 AND created_by = $2")
                .bind(program_id)
                .bind(owner.to_string())
                .execute(&self.pool)
                .await
        } else {
            sqlx::query(
                r"
                UPDATE programs SET is_deleted = 1, updated_at = $1
                WHERE program_id = $2 AND created_by = $3
                  AND (is_deleted = 0 OR is_deleted IS NULL)
                ",
            )
            .bind(now_timestamp())
            .bind(program_id)
            .bind(owner.to_string())
            .execute(&self.pool)
            .await
        };
        let result = outcome.map_err(|e| DatabaseError::query("Failed to delete program", e))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Program"));
        }
        info!(user.id = %owner, program.id = program_id, hard, "Program deleted");
        Ok(())
    }

    /// Visible slots of an owned program with their catalog exercise, in slot order
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when the program is not visible to `owner`
    pub async fn list_program_exercises(
        &self,
        owner: Uuid,
        program_id: i64,
    ) -> AppResult<Vec<ProgramExerciseWithExercise>> {
        self.get_program(owner, program_id).await?;

        let query = format!(
            r"
            SELECT {SLOT_COLUMNS}, {EXERCISE_COLUMNS}
            FROM program_exercises pe
            JOIN exercises e ON e.exercise_id = pe.exercise_id
            WHERE pe.program_id = $1
              AND (pe.is_deleted = 0 OR pe.is_deleted IS NULL)
            ORDER BY pe.program_exercise_id ASC
            "
        );
        let rows = sqlx::query(&query)
            .bind(program_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DatabaseError::query("Failed to list program exercises", e))?;

        rows.iter()
            .map(|row| {
                Ok(ProgramExerciseWithExercise {
                    slot: row_to_program_exercise(row)?,
                    exercise: row_to_exercise(row)?,
                })
            })
            .collect()
    }

    /// Attach one exercise slot to an existing owned program
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when the program is not visible to `owner`, or
    /// `InvalidInput` for an unknown exercise id
    pub async fn add_exercise_slot(
        &self,
        owner: Uuid,
        program_id: i64,
        spec: &ProgramExerciseSpec,
    ) -> AppResult<ProgramExercise> {
        let mut guard = SqliteTransactionGuard::begin(&self.pool, "add exercise slot").await?;

        if fetch_program(guard.executor()?, owner, program_id)
            .await?
            .is_none()
        {
            return Err(AppError::not_found("Program"));
        }
        let slot_id = insert_slot(guard.executor()?, program_id, spec).await?;

        let query =
            format!("SELECT {SLOT_COLUMNS} FROM program_exercises pe WHERE pe.program_exercise_id = $1");
        let row = sqlx::query(&query)
            .bind(slot_id)
            .fetch_one(guard.executor()?)
            .await
            .map_err(|e| DatabaseError::query("Failed to read exercise slot", e))?;
        let slot = row_to_program_exercise(&row)?;

        guard.commit().await?;
        info!(
            user.id = %owner,
            program.id = program_id,
            program_exercise.id = slot_id,
            "Exercise slot added"
        );
        Ok(slot)
    }

    /// Soft-delete one slot of an owned program
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when the program is not visible to `owner` or the slot
    /// is missing, already deleted or attached to another program
    pub async fn remove_exercise_slot(
        &self,
        owner: Uuid,
        program_id: i64,
        program_exercise_id: i64,
    ) -> AppResult<()> {
        let result = sqlx::query(
            r"
            UPDATE program_exercises SET is_deleted = 1, updated_at = $1
            WHERE program_exercise_id = $2
              AND program_id = $3
              AND (is_deleted = 0 OR is_deleted IS NULL)
              AND EXISTS (
                  SELECT 1 FROM programs p
                  WHERE p.program_id = $3 AND p.created_by = $4
                    AND (p.is_deleted = 0 OR p.is_deleted IS NULL)
              )
            ",
        )
        .bind(now_timestamp())
        .bind(program_exercise_id)
        .bind(program_id)
        .bind(owner.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| DatabaseError::query("Failed to remove exercise slot", e))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Program exercise"));
        }
        info!(
            user.id = %owner,
            program.id = program_id,
            program_exercise.id = program_exercise_id,
            "Exercise slot removed"
        );
        Ok(())
    }
}

async fn insert_program(
    conn: &mut SqliteConnection,
    owner: Uuid,
    name: &str,
    fields: &NewProgram,
) -> AppResult<i64> {
    let now = now_timestamp();
    let result = sqlx::query(
        r"
        INSERT INTO programs (
            name, name_folded, type, training_type, started_at, finished_at,
            created_at, updated_at, created_by, copied_from, is_deleted
        ) VALUES ($1, $2, $3, $4, $5, $6, $7, $7, $8, $9, 0)
        ",
    )
    .bind(name)
    .bind(fold_name(name))
    .bind(fields.program_type.as_deref())
    .bind(fields.training_type.as_deref())
    .bind(format_date(fields.started_at))
    .bind(format_date(fields.finished_at))
    .bind(&now)
    .bind(owner.to_string())
    .bind(fields.copied_from)
    .execute(conn)
    .await
    .map_err(write_error("Failed to create program", "copied_from program"))?;

    Ok(result.last_insert_rowid())
}

async fn insert_slot(
    conn: &mut SqliteConnection,
    program_id: i64,
    spec: &ProgramExerciseSpec,
) -> AppResult<i64> {
    let sets = spec.sets.as_ref().map(encode_sets).transpose()?;
    let now = now_timestamp();
    let result = sqlx::query(
        r"
        INSERT INTO program_exercises (
            program_id, exercise_id, type, sets, status, is_deleted, created_at, updated_at
        ) VALUES ($1, $2, $3, $4, $5, 0, $6, $6)
        ",
    )
    .bind(program_id)
    .bind(spec.exercise_id)
    .bind(spec.slot_type.as_deref())
    .bind(sets)
    .bind(spec.status_or_default())
    .bind(&now)
    .execute(conn)
    .await
    .map_err(write_error("Failed to attach exercise to program", "exercise id"))?;

    Ok(result.last_insert_rowid())
}

/// Owner-scoped lookup of a visible program
pub(super) async fn fetch_program(
    conn: &mut SqliteConnection,
    owner: Uuid,
    program_id: i64,
) -> AppResult<Option<Program>> {
    let query = format!(
        r"
        SELECT {PROGRAM_COLUMNS}
        FROM programs
        WHERE program_id = $1 AND created_by = $2
          AND (is_deleted = 0 OR is_deleted IS NULL)
        "
    );
    let row = sqlx::query(&query)
        .bind(program_id)
        .bind(owner.to_string())
        .fetch_optional(conn)
        .await
        .map_err(|e| DatabaseError::query("Failed to get program", e))?;

    row.map(|r| row_to_program(&r)).transpose()
}

fn row_to_program(row: &SqliteRow) -> AppResult<Program> {
    let created_at: String = row.get("created_at");
    let updated_at: String = row.get("updated_at");
    let created_by: String = row.get("created_by");

    Ok(Program {
        program_id: row.get("program_id"),
        name: row.get("name"),
        program_type: row.get("type"),
        training_type: row.get("training_type"),
        started_at: parse_date(row.get("started_at"), "programs.started_at")?,
        finished_at: parse_date(row.get("finished_at"), "programs.finished_at")?,
        created_at: parse_timestamp(&created_at, "programs.created_at")?,
        updated_at: parse_timestamp(&updated_at, "programs.updated_at")?,
        created_by: parse_user_id(&created_by, "programs.created_by")?,
        copied_from: row.get("copied_from"),
        is_deleted: is_deleted(row.get("is_deleted")),
    })
}

fn row_to_program_exercise(row: &SqliteRow) -> AppResult<ProgramExercise> {
    let created_at: String = row.get("created_at");
    let updated_at: String = row.get("updated_at");

    Ok(ProgramExercise {
        program_exercise_id: row.get("program_exercise_id"),
        program_id: row.get("program_id"),
        exercise_id: row.get("exercise_id"),
        slot_type: row.get("type"),
        sets: decode_sets(row.get("sets"))?,
        status: row.get("status"),
        is_deleted: is_deleted(row.get("is_deleted")),
        created_at: parse_timestamp(&created_at, "program_exercises.created_at")?,
        updated_at: parse_timestamp(&updated_at, "program_exercises.updated_at")?,
    })
}

/// Decode a catalog exercise selected with [`EXERCISE_COLUMNS`]
pub(super) fn row_to_exercise(row: &SqliteRow) -> AppResult<Exercise> {
    let created_at: String = row.get("exercise_created_at");
    let updated_at: String = row.get("exercise_updated_at");

    Ok(Exercise {
        exercise_id: row.get("exercise_exercise_id"),
        name: row.get("exercise_name"),
        description: row.get("exercise_description"),
        cues: row.get("exercise_cues"),
        video_url: row.get("exercise_video_url"),
        image_url: row.get("exercise_image_url"),
        created_at: parse_timestamp(&created_at, "exercises.created_at")?,
        updated_at: parse_timestamp(&updated_at, "exercises.updated_at")?,
    })
}

/// One joined row of the summary query: a program and at most one of its slots
#[derive(Debug, Clone)]
struct SummaryRow {
    program: ProgramSummary,
    slot: Option<ExerciseSlotSummary>,
}

fn row_to_summary_row(row: &SqliteRow) -> AppResult<SummaryRow> {
    let created_at: String = row.get("created_at");
    let updated_at: String = row.get("updated_at");
    let program = ProgramSummary {
        program_id: row.get("program_id"),
        name: row.get("name"),
        program_type: row.get("type"),
        training_type: row.get("training_type"),
        started_at: parse_date(row.get("started_at"), "programs.started_at")?,
        finished_at: parse_date(row.get("finished_at"), "programs.finished_at")?,
        created_at: parse_timestamp(&created_at, "programs.created_at")?,
        updated_at: parse_timestamp(&updated_at, "programs.updated_at")?,
        exercise_names: None,
        exercises: Vec::new(),
    };

    let slot_id: Option<i64> = row.get("program_exercise_id");
    let exercise_name: Option<String> = row.get("exercise_name");
    let slot = match (slot_id, exercise_name) {
        (Some(program_exercise_id), Some(name)) => Some(ExerciseSlotSummary {
            program_exercise_id,
            exercise_id: row.get("exercise_id"),
            name,
            slot_type: row.get("slot_type"),
            status: row.get("slot_status"),
            sets: decode_sets(row.get("slot_sets"))?,
        }),
        _ => None,
    };

    Ok(SummaryRow { program, slot })
}

/// Collapse joined rows into one summary per program
///
/// Rows must arrive grouped by program (the query orders by program, then
/// slot). Slots keep their row order; `exercise_names` lists each distinct
/// exercise name once, in first-seen order.
fn fold_summaries(rows: Vec<SummaryRow>) -> Vec<ProgramSummary> {
    let mut summaries: Vec<ProgramSummary> = Vec::new();

    for SummaryRow { program, slot } in rows {
        let same_program = summaries
            .last()
            .is_some_and(|last| last.program_id == program.program_id);
        if !same_program {
            summaries.push(program);
        }
        if let (Some(slot), Some(current)) = (slot, summaries.last_mut()) {
            current.exercises.push(slot);
        }
    }

    for summary in &mut summaries {
        let mut names: Vec<&str> = Vec::new();
        for slot in &summary.exercises {
            if !names.contains(&slot.name.as_str()) {
                names.push(&slot.name);
            }
        }
        if !names.is_empty() {
            summary.exercise_names = Some(names.join(EXERCISE_NAME_SEPARATOR));
        }
    }

    summaries
}
