// ABOUTME: Program repository implementation over SQLite
// ABOUTME: Delegates composition to ProgramManager and the detail view to ProgramDetailAggregator
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::ProgramRepository;
use crate::database::{Database, ProgramDetailAggregator, ProgramManager};
use crate::errors::AppResult;
use crate::models::{
    CreatedProgram, NewProgram, Program, ProgramDetail, ProgramExercise, ProgramExerciseSpec,
    ProgramExerciseWithExercise, ProgramPatch, ProgramSummary,
};
use async_trait::async_trait;
use uuid::Uuid;

/// `SQLite` implementation of `ProgramRepository`
pub struct ProgramRepositoryImpl {
    db: Database,
}

impl ProgramRepositoryImpl {
    /// Create a new `ProgramRepository` with the given database connection
    #[must_use]
    pub const fn new(db: Database) -> Self {
        Self { db }
    }

    fn manager(&self) -> ProgramManager {
        ProgramManager::new(self.db.pool().clone())
    }
}

#[async_trait]
impl ProgramRepository for ProgramRepositoryImpl {
    async fn list_programs(
        &self,
        owner: Uuid,
        program_type: Option<&str>,
    ) -> AppResult<Vec<ProgramSummary>> {
        self.manager().list_programs(owner, program_type).await
    }

    async fn search_programs_by_name(
        &self,
        owner: Uuid,
        term: &str,
        program_type: Option<&str>,
    ) -> AppResult<Vec<ProgramSummary>> {
        self.manager()
            .search_programs_by_name(owner, term, program_type)
            .await
    }

    async fn create_program(&self, owner: Uuid, fields: &NewProgram) -> AppResult<Program> {
        self.manager().create_program(owner, fields).await
    }

    async fn create_program_with_exercises(
        &self,
        owner: Uuid,
        fields: &NewProgram,
        exercises: &[ProgramExerciseSpec],
    ) -> AppResult<CreatedProgram> {
        self.manager()
            .create_program_with_exercises(owner, fields, exercises)
            .await
    }

    async fn get_program(&self, owner: Uuid, program_id: i64) -> AppResult<Program> {
        self.manager().get_program(owner, program_id).await
    }

    async fn update_program(
        &self,
        owner: Uuid,
        program_id: i64,
        patch: &ProgramPatch,
    ) -> AppResult<()> {
        self.manager().update_program(owner, program_id, patch).await
    }

    async fn delete_program(&self, owner: Uuid, program_id: i64, hard: bool) -> AppResult<()> {
        self.manager().delete_program(owner, program_id, hard).await
    }

    async fn list_program_exercises(
        &self,
        owner: Uuid,
        program_id: i64,
    ) -> AppResult<Vec<ProgramExerciseWithExercise>> {
        self.manager()
            .list_program_exercises(owner, program_id)
            .await
    }

    async fn add_exercise_slot(
        &self,
        owner: Uuid,
        program_id: i64,
        spec: &ProgramExerciseSpec,
    ) -> AppResult<ProgramExercise> {
        self.manager()
            .add_exercise_slot(owner, program_id, spec)
            .await
    }

    async fn remove_exercise_slot(
        &self,
        owner: Uuid,
        program_id: i64,
        program_exercise_id: i64,
    ) -> AppResult<()> {
        self.manager()
            .remove_exercise_slot(owner, program_id, program_exercise_id)
            .await
    }

    async fn get_program_details(
        &self,
        owner: Uuid,
        program_id: i64,
    ) -> AppResult<ProgramDetail> {
        ProgramDetailAggregator::new(self.db.pool().clone())
            .get_program_details(owner, program_id)
            .await
    }
}
