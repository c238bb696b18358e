// ABOUTME: Core types and constants for the Cheer coaching platform
// ABOUTME: Foundation crate with error handling, domain models, constants, and analytics folds
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Cheer Core
//!
//! Foundation crate providing shared types for the Cheer coaching platform.
//! Nothing in here touches the store; the root crate owns every query.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and `DatabaseError`
//! - **constants**: Application-wide constants organized by domain
//! - **models**: Programs, exercise slots, workouts and measurement sessions
//! - **analytics**: Pure leaderboard ranking and progress summary folds

/// Unified error handling system with standard error codes and failure kinds
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models (Program, ProgramExercise, TrainingData, MeasurementSession, ...)
pub mod models;

/// Leaderboard ranking and progress-over-time calculations
pub mod analytics;
