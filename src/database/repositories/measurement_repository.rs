// ABOUTME: Measurement repository implementation over SQLite
// ABOUTME: Leaderboards, progress, rosters and session logging via MeasurementAnalytics
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::MeasurementRepository;
use crate::database::{Database, MeasurementAnalytics};
use crate::errors::AppResult;
use crate::models::{
    AthleteProgress, CoachAthlete, MeasurementGroup, MeasurementSession, NewMeasurement,
};
use async_trait::async_trait;
use uuid::Uuid;

/// `SQLite` implementation of `MeasurementRepository`
pub struct MeasurementRepositoryImpl {
    db: Database,
}

impl MeasurementRepositoryImpl {
    /// Create a new `MeasurementRepository` with the given database connection
    #[must_use]
    pub const fn new(db: Database) -> Self {
        Self { db }
    }

    fn manager(&self) -> MeasurementAnalytics {
        MeasurementAnalytics::new(self.db.pool().clone())
    }
}

#[async_trait]
impl MeasurementRepository for MeasurementRepositoryImpl {
    async fn team_leaderboard(&self, coach: Uuid) -> AppResult<Vec<MeasurementGroup>> {
        self.manager().team_leaderboard(coach).await
    }

    async fn athlete_progress(
        &self,
        athlete: Uuid,
        measurement_id: i64,
    ) -> AppResult<AthleteProgress> {
        self.manager().athlete_progress(athlete, measurement_id).await
    }

    async fn list_athletes_of_coach(&self, coach: Uuid) -> AppResult<Vec<CoachAthlete>> {
        self.manager().list_athletes_of_coach(coach).await
    }

    async fn record_measurement(
        &self,
        measurement: &NewMeasurement,
    ) -> AppResult<MeasurementSession> {
        self.manager().record_measurement(measurement).await
    }
}
