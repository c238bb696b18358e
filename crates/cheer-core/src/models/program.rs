// ABOUTME: Program aggregate models: programs, exercise slots, and write payloads
// ABOUTME: Write payloads carry only the allow-listed program fields; anything else is dropped
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use super::{Exercise, ExerciseSets};
use crate::constants::programs::{DEFAULT_SLOT_STATUS, TYPE_FILTER_ALL};
use crate::errors::{AppError, AppResult};

/// A training program owned by one user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Program {
    /// Surrogate key
    pub program_id: i64,
    /// Display name
    pub name: String,
    /// Program category (free-form, used by the type filter)
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
    /// Owner
    pub created_by: Uuid,
    /// Program this one was copied from
    pub copied_from: Option<i64>,
    /// Soft-delete flag
    pub is_deleted: bool,
}

/// Fields accepted when creating a program
///
/// Unknown JSON keys are ignored during deserialization, so ownership,
/// timestamps and the delete flag can never be supplied by a caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProgram {
    /// Display name (required)
    #[serde(default)]
    pub name: Option<String>,
    /// Program category
    #[serde(default, rename = "type")]
    pub program_type: Option<String>,
    /// Training style
    #[serde(default)]
    pub training_type: Option<String>,
    /// First day of the plan
    #[serde(default)]
    pub started_at: Option<NaiveDate>,
    /// Last day of the plan
    #[serde(default)]
    pub finished_at: Option<NaiveDate>,
    /// Program this one was copied from
    #[serde(default)]
    pub copied_from: Option<i64>,
}

impl NewProgram {
    /// Create a payload with just a name
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Trimmed, non-empty program name
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when the name is missing or blank
    pub fn validated_name(&self) -> AppResult<&str> {
        match self.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => Ok(name),
            _ => Err(AppError::missing_field("name")),
        }
    }
}

/// Partial program update
///
/// An absent key leaves the column untouched. For nullable columns an explicit
/// `null` clears the column, which is why those fields are double options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramPatch {
    /// New display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New category, or `Some(None)` to clear it
    #[serde(
        default,
        rename = "type",
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub program_type: Option<Option<String>>,
    /// New training style, or `Some(None)` to clear it
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub training_type: Option<Option<String>>,
    /// New start date, or `Some(None)` to clear it
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub started_at: Option<Option<NaiveDate>>,
    /// New end date, or `Some(None)` to clear it
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub finished_at: Option<Option<NaiveDate>>,
    /// New copy source, or `Some(None)` to clear it
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub copied_from: Option<Option<i64>>,
}

impl ProgramPatch {
    /// True when no allow-listed field is present
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.program_type.is_none()
            && self.training_type.is_none()
            && self.started_at.is_none()
            && self.finished_at.is_none()
            && self.copied_from.is_none()
    }
}

/// Marks a key as present even when its value is `null`
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// Configuration for one exercise slot when attaching it to a program
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgramExerciseSpec {
    /// Catalog exercise to attach
    pub exercise_id: i64,
    /// Slot type (e.g. "strength", "warmup")
    #[serde(default, rename = "type")]
    pub slot_type: Option<String>,
    /// Planned sets
    #[serde(default)]
    pub sets: Option<ExerciseSets>,
    /// Slot status
    #[serde(default)]
    pub status: Option<i64>,
}

impl ProgramExerciseSpec {
    /// Spec for a bare slot with no type, plan or status
    #[must_use]
    pub const fn for_exercise(exercise_id: i64) -> Self {
        Self {
            exercise_id,
            slot_type: None,
            sets: None,
            status: None,
        }
    }

    /// Status to store, falling back to the default slot status
    #[must_use]
    pub fn status_or_default(&self) -> i64 {
        self.status.unwrap_or(DEFAULT_SLOT_STATUS)
    }
}

/// One exercise slot inside a program summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseSlotSummary {
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
}

/// A program row as shown in list and search results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgramSummary {
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
    /// Distinct exercise names in slot order, joined with ", "; `None` without slots
    pub exercise_names: Option<String>,
    /// Attached slots in slot order
    pub exercises: Vec<ExerciseSlotSummary>,
}

/// A program-exercise slot row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgramExercise {
    /// Slot id
    pub program_exercise_id: i64,
    /// Owning program
    pub program_id: i64,
    /// Catalog exercise id
    pub exercise_id: i64,
    /// Slot type
    #[serde(rename = "type")]
    pub slot_type: Option<String>,
    /// Planned sets
    pub sets: Option<ExerciseSets>,
    /// Slot status
    pub status: i64,
    /// Soft-delete flag
    pub is_deleted: bool,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// A slot together with the catalog exercise it points at
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgramExerciseWithExercise {
    /// Slot configuration
    #[serde(flatten)]
    pub slot: ProgramExercise,
    /// Catalog entry
    pub exercise: Exercise,
}

/// Result of creating a program together with its slots
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatedProgram {
    /// The stored program
    #[serde(flatten)]
    pub program: Program,
    /// Number of slots inserted alongside it
    pub total_exercises: usize,
}

/// Normalize an optional program-type filter
///
/// `None`, blank strings and the sentinel `"all"` all mean "no filter".
#[must_use]
pub fn type_filter(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim)
        .filter(|t| !t.is_empty() && *t != TYPE_FILTER_ALL)
}
