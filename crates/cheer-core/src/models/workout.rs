// ABOUTME: Workout logging models: structured sets, training data entries, and program details
// ABOUTME: Sets payloads are validated as an array of objects before any store interaction
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use super::ExerciseMeta;
use crate::errors::{AppError, AppResult};

/// A list of sets, each an open-ended object such as `{"reps": 5, "weight": 100}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExerciseSets(pub Vec<Map<String, Value>>);

impl ExerciseSets {
    /// Number of sets
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when no sets were recorded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Parse a stored JSON column
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a JSON array of objects
    pub fn from_json_str(raw: &str) -> AppResult<Self> {
        Ok(serde_json::from_str(raw)?)
    }
}

impl TryFrom<Value> for ExerciseSets {
    type Error = AppError;

    fn try_from(value: Value) -> AppResult<Self> {
        let Value::Array(items) = value else {
            return Err(AppError::invalid_format("sets must be an array"));
        };
        items
            .into_iter()
            .enumerate()
            .map(|(index, item)| match item {
                Value::Object(set) => Ok(set),
                _ => Err(AppError::invalid_format(format!(
                    "sets[{index}] must be an object"
                ))),
            })
            .collect::<AppResult<Vec<_>>>()
            .map(Self)
    }
}

/// One logged workout entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingData {
    /// Surrogate key
    pub training_data_id: i64,
    /// Slot the workout was logged against
    pub program_exercise_id: i64,
    /// Acting user
    pub user_id: Uuid,
    /// Exercise performed
    pub exercise_id: i64,
    /// Sets as actually performed
    pub sets: ExerciseSets,
    /// Free-form note
    pub note: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// Input for logging a workout against a program-exercise slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordWorkoutRequest {
    /// Program the slot must belong to
    pub program_id: i64,
    /// Slot the workout is logged against
    pub program_exercise_id: i64,
    /// Exercise id; resolved from the slot when absent
    #[serde(default)]
    pub exercise_id: Option<i64>,
    /// Free-form note
    #[serde(default)]
    pub note: Option<String>,
    /// Raw sets payload, validated with [`ExerciseSets::try_from`]
    #[serde(default = "empty_sets")]
    pub sets: Value,
}

fn empty_sets() -> Value {
    Value::Array(Vec::new())
}

/// A previous workout as embedded in program details
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PastWorkout {
    /// Surrogate key
    pub training_data_id: i64,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
    /// Free-form note
    pub note: String,
    /// Sets as performed
    pub sets: ExerciseSets,
}

/// One slot of a program detail document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseSlotDetail {
    /// Slot id
    pub program_exercise_id: i64,
    /// Catalog exercise id
    pub exercise_id: i64,
    /// Catalog exercise name
    pub name: String,
    /// Slot type
    #[serde(rename = "type")]
    pub slot_type: Option<String>,
    /// Slot status
    pub status: i64,
    /// Planned sets
    pub sets: Option<ExerciseSets>,
    /// Static catalog metadata
    pub exercise_meta: ExerciseMeta,
    /// The requesting user's history for this exercise, most recent first
    pub past_workouts: Vec<PastWorkout>,
}

/// Full program document: program fields plus nested slots and history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgramDetail {
    /// Surrogate key
    pub program_id: i64,
    /// Display name
    pub name: String,
    /// Program category
    #[serde(rename = "type")]
    pub program_type: Option<String>,
    /// Training style
    pub training_type: Option<String>,
    /// First day of the plan
    pub started_at: Option<NaiveDate>,
    /// Last day of the plan
    pub finished_at: Option<NaiveDate>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
    /// Attached slots in slot order
    pub exercises: Vec<ExerciseSlotDetail>,
}
