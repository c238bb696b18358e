// ABOUTME: Workout repository implementation over SQLite
// ABOUTME: Thin delegation to WorkoutRecorder
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::WorkoutRepository;
use crate::database::{Database, WorkoutRecorder};
use crate::errors::AppResult;
use crate::models::{RecordWorkoutRequest, TrainingData};
use async_trait::async_trait;
use uuid::Uuid;

/// `SQLite` implementation of `WorkoutRepository`
pub struct WorkoutRepositoryImpl {
    db: Database,
}

impl WorkoutRepositoryImpl {
    /// Create a new `WorkoutRepository` with the given database connection
    #[must_use]
    pub const fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl WorkoutRepository for WorkoutRepositoryImpl {
    async fn record_workout(
        &self,
        user: Uuid,
        request: &RecordWorkoutRequest,
    ) -> AppResult<TrainingData> {
        WorkoutRecorder::new(self.db.pool().clone())
            .record_workout(user, request)
            .await
    }
}
