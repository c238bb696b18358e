// ABOUTME: Core data models for the Cheer coaching platform
// ABOUTME: Re-exports program, exercise, workout and measurement types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! Plain, serializable structures handed between the store managers and the
//! HTTP layer. Store-side tri-states (nullable delete flags) never appear here;
//! every model exposes a clean `bool`.

mod exercise;
mod measurement;
mod program;
mod workout;

// Program domain
pub use program::{
    type_filter, CreatedProgram, ExerciseSlotSummary, NewProgram, Program, ProgramExercise,
    ProgramExerciseSpec, ProgramExerciseWithExercise, ProgramPatch, ProgramSummary,
};

// Exercise catalog
pub use exercise::{Exercise, ExerciseMeta};

// Workout domain
pub use workout::{
    ExerciseSets, ExerciseSlotDetail, PastWorkout, ProgramDetail, RecordWorkoutRequest,
    TrainingData,
};

// Measurement domain
pub use measurement::{
    AthleteBest, AthleteProgress, CoachAthlete, LeaderboardEntry, MeasurementGroup,
    MeasurementSession, NewMeasurement, ProgressEntry, ProgressSummary,
};
