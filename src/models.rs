// ABOUTME: Re-exports the domain models from cheer-core
// ABOUTME: Programs, exercise slots, workouts, measurement sessions and analytics documents
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub use cheer_core::models::*;
