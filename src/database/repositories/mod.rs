// ABOUTME: Repository traits the transport layer depends on, one per domain area
// ABOUTME: SQLite implementations delegate to the store managers in crate::database
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Repository pattern for the Cheer store
//!
//! Each trait groups the operations of one domain area. Callers hold a trait
//! object or a concrete `*RepositoryImpl` obtained from
//! [`Database`](crate::database::Database), and never see `sqlx` types.
//! Every user-scoped method takes the acting user's id explicitly; nothing is
//! inferred from ambient state.

mod measurement_repository;
mod program_repository;
mod workout_repository;

pub use measurement_repository::MeasurementRepositoryImpl;
pub use program_repository::ProgramRepositoryImpl;
pub use workout_repository::WorkoutRepositoryImpl;

use crate::errors::AppResult;
use crate::models::{
    AthleteProgress, CoachAthlete, CreatedProgram, MeasurementGroup, MeasurementSession,
    NewMeasurement, NewProgram, Program, ProgramDetail, ProgramExercise, ProgramExerciseSpec,
    ProgramExerciseWithExercise, ProgramPatch, ProgramSummary, RecordWorkoutRequest,
    TrainingData,
};
use async_trait::async_trait;
use uuid::Uuid;

/// Program composition and the program detail view
#[async_trait]
pub trait ProgramRepository: Send + Sync {
    /// Visible programs of `owner`, newest first, optionally filtered by type
    async fn list_programs(
        &self,
        owner: Uuid,
        program_type: Option<&str>,
    ) -> AppResult<Vec<ProgramSummary>>;

    /// Case-insensitive, wildcard-safe name search; blank terms yield `[]`
    async fn search_programs_by_name(
        &self,
        owner: Uuid,
        term: &str,
        program_type: Option<&str>,
    ) -> AppResult<Vec<ProgramSummary>>;

    /// Create a program from the allow-listed fields
    async fn create_program(&self, owner: Uuid, fields: &NewProgram) -> AppResult<Program>;

    /// Create a program and its slots atomically
    async fn create_program_with_exercises(
        &self,
        owner: Uuid,
        fields: &NewProgram,
        exercises: &[ProgramExerciseSpec],
    ) -> AppResult<CreatedProgram>;

    /// One visible, owned program
    async fn get_program(&self, owner: Uuid, program_id: i64) -> AppResult<Program>;

    /// Partial update of an owned program
    async fn update_program(
        &self,
        owner: Uuid,
        program_id: i64,
        patch: &ProgramPatch,
    ) -> AppResult<()>;

    /// Soft delete, or physical delete when `hard` is set
    async fn delete_program(&self, owner: Uuid, program_id: i64, hard: bool) -> AppResult<()>;

    /// Visible slots of an owned program with their catalog exercise
    async fn list_program_exercises(
        &self,
        owner: Uuid,
        program_id: i64,
    ) -> AppResult<Vec<ProgramExerciseWithExercise>>;

    /// Attach one slot to an existing owned program
    async fn add_exercise_slot(
        &self,
        owner: Uuid,
        program_id: i64,
        spec: &ProgramExerciseSpec,
    ) -> AppResult<ProgramExercise>;

    /// Soft-delete one slot of an owned program
    async fn remove_exercise_slot(
        &self,
        owner: Uuid,
        program_id: i64,
        program_exercise_id: i64,
    ) -> AppResult<()>;

    /// Nested program document with slots, metadata and past workouts
    async fn get_program_details(&self, owner: Uuid, program_id: i64)
        -> AppResult<ProgramDetail>;
}

/// Workout logging
#[async_trait]
pub trait WorkoutRepository: Send + Sync {
    /// Append one workout entry against a program-exercise slot
    async fn record_workout(
        &self,
        user: Uuid,
        request: &RecordWorkoutRequest,
    ) -> AppResult<TrainingData>;
}

/// Measurement sessions, rosters and analytics
#[async_trait]
pub trait MeasurementRepository: Send + Sync {
    /// Per-measurement leaderboards of a coach's active athletes
    async fn team_leaderboard(&self, coach: Uuid) -> AppResult<Vec<MeasurementGroup>>;

    /// History and summary for one athlete and measurement type
    async fn athlete_progress(
        &self,
        athlete: Uuid,
        measurement_id: i64,
    ) -> AppResult<AthleteProgress>;

    /// Active roster of a coach
    async fn list_athletes_of_coach(&self, coach: Uuid) -> AppResult<Vec<CoachAthlete>>;

    /// Append one measurement session
    async fn record_measurement(
        &self,
        measurement: &NewMeasurement,
    ) -> AppResult<MeasurementSession>;
}
