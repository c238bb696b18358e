// ABOUTME: Structured error types for store operations with sqlx conversion
// ABOUTME: Keeps raw store text in logs and out of caller-visible messages
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{AppError, ErrorCode};
use thiserror::Error;

/// Failure raised by the relational store, tagged with what we were doing
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// A statement failed to execute or decode
    #[error("{context}")]
    QueryFailed {
        /// What the caller was attempting
        context: String,
        /// Raw store error
        #[source]
        source: sqlx::Error,
    },

    /// Begin, commit or rollback failed
    #[error("{context}")]
    TransactionFailed {
        /// What the caller was attempting
        context: String,
        /// Raw store error
        #[source]
        source: sqlx::Error,
    },

    /// Schema creation failed
    #[error("{context}")]
    MigrationFailed {
        /// Which migration step failed
        context: String,
        /// Raw store error
        #[source]
        source: sqlx::Error,
    },

    /// The pool could not be opened
    #[error("{context}")]
    ConnectionFailed {
        /// Connection target description (never includes credentials)
        context: String,
        /// Raw store error
        #[source]
        source: sqlx::Error,
    },

    /// A value could not be encoded for storage
    #[error("{context}")]
    SerializationError {
        /// Which value failed
        context: String,
        /// Raw serde error
        #[source]
        source: serde_json::Error,
    },

    /// A stored value could not be decoded
    #[error("{context}")]
    DeserializationError {
        /// Which column failed
        context: String,
    },
}

impl DatabaseError {
    /// Wrap a failed statement
    pub fn query(context: impl Into<String>, source: sqlx::Error) -> Self {
        Self::QueryFailed {
            context: context.into(),
            source,
        }
    }

    /// Wrap a failed begin/commit/rollback
    pub fn transaction(context: impl Into<String>, source: sqlx::Error) -> Self {
        Self::TransactionFailed {
            context: context.into(),
            source,
        }
    }

    /// Wrap a failed migration step
    pub fn migration(context: impl Into<String>, source: sqlx::Error) -> Self {
        Self::MigrationFailed {
            context: context.into(),
            source,
        }
    }

    /// Wrap a failed pool creation
    pub fn connection(context: impl Into<String>, source: sqlx::Error) -> Self {
        Self::ConnectionFailed {
            context: context.into(),
            source,
        }
    }

    /// Wrap a value that could not be encoded as JSON
    pub fn serialization(context: impl Into<String>, source: serde_json::Error) -> Self {
        Self::SerializationError {
            context: context.into(),
            source,
        }
    }

    /// A stored column held something we cannot decode
    pub fn decode(context: impl Into<String>) -> Self {
        Self::DeserializationError {
            context: context.into(),
        }
    }

    const fn error_code(&self) -> ErrorCode {
        match self {
            Self::SerializationError { .. } | Self::DeserializationError { .. } => {
                ErrorCode::SerializationError
            }
            _ => ErrorCode::DatabaseError,
        }
    }
}

impl From<DatabaseError> for AppError {
    fn from(error: DatabaseError) -> Self {
        let code = error.error_code();
        let context = error.to_string();
        match std::error::Error::source(&error) {
            Some(raw) => tracing::error!(context = %context, error = %raw, "Store operation failed"),
            None => tracing::error!(context = %context, "Store operation failed"),
        }
        Self::new(code, context).with_source(error)
    }
}
