// ABOUTME: Re-exports the unified error types from cheer-core
// ABOUTME: Keeps `crate::errors::*` paths stable for managers and binaries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub use cheer_core::errors::{
    AppError, AppResult, DatabaseError, ErrorCode, ErrorKind, ErrorResponse, ErrorResponseDetails,
};
