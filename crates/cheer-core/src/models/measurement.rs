// ABOUTME: Measurement session models, team leaderboard groups, and athlete progress
// ABOUTME: Results are numeric and lower-is-better for the timed and distance events tracked here
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One recorded performance test
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementSession {
    /// Surrogate key
    pub session_id: i64,
    /// Athlete tested
    pub athlete_id: Uuid,
    /// Measurement type
    pub measurement_id: i64,
    /// Numeric result, absent for sessions that were never completed
    pub result: Option<f64>,
    /// Session status
    pub status: Option<i64>,
    /// Unit the result was recorded in
    pub measurement_unit: Option<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// Input for appending a measurement session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewMeasurement {
    /// Athlete tested
    pub athlete_id: Uuid,
    /// Measurement type
    pub measurement_id: i64,
    /// Numeric result
    pub result: f64,
    /// Unit override; defaults to the measurement type's unit
    #[serde(default)]
    pub unit: Option<String>,
    /// Session status
    #[serde(default)]
    pub status: Option<i64>,
}

/// An athlete's best result for one measurement type, before ranking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AthleteBest {
    /// Measurement type
    pub measurement_id: i64,
    /// Measurement type name
    pub measurement_name: String,
    /// Measurement type unit
    pub unit: Option<String>,
    /// Athlete
    pub athlete_id: Uuid,
    /// Athlete first name
    pub first_name: Option<String>,
    /// Athlete last name
    pub last_name: Option<String>,
    /// Minimum non-null result
    pub best_result: f64,
}

/// One row of a leaderboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    /// 1-based output position; ties get consecutive ranks
    pub rank: usize,
    /// Athlete first name
    pub first_name: Option<String>,
    /// Athlete last name
    pub last_name: Option<String>,
    /// Best result
    pub result: f64,
}

/// Leaderboard for one measurement type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementGroup {
    /// Measurement type
    pub measurement_id: i64,
    /// Measurement type name
    pub measurement_name: String,
    /// Measurement type unit
    pub unit: Option<String>,
    /// Athletes ordered best first
    pub rankings: Vec<LeaderboardEntry>,
}

/// One point of an athlete's progress history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressEntry {
    /// Session id
    pub session_id: i64,
    /// Numeric result
    pub result: f64,
    /// Unit the result was recorded in
    pub unit: Option<String>,
    /// Session status
    pub status: Option<i64>,
    /// When the session was recorded
    pub created_at: DateTime<Utc>,
}

/// Headline numbers for an athlete's progress on one measurement
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSummary {
    /// Most recent result
    pub latest_result: Option<f64>,
    /// Baseline result (the second-most-recent session)
    pub first_result: Option<f64>,
    /// Absolute difference between baseline and latest
    pub total_change: Option<f64>,
    /// Unit of the most recent session
    pub unit: Option<String>,
}

/// Progress summary plus the full history, most recent first
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AthleteProgress {
    /// Headline numbers
    pub summary: ProgressSummary,
    /// Every non-null session, most recent first
    pub history: Vec<ProgressEntry>,
}

/// An athlete on a coach's roster
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoachAthlete {
    /// Athlete user id
    pub athlete_id: Uuid,
    /// First name
    pub first_name: Option<String>,
    /// Last name
    pub last_name: Option<String>,
    /// Whether the athlete's account is active
    pub is_active: bool,
}
