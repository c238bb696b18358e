// ABOUTME: RAII transaction guard for multi-statement writes
// ABOUTME: Commits explicitly; rolls back automatically when dropped on any early-return path
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Transaction management
//!
//! Every multi-statement write (creating a program together with its slots,
//! recording a workout) runs through a [`TransactionGuard`]:
//!
//! ```text
//! let mut guard = SqliteTransactionGuard::begin(&pool, "create program").await?;
//!
//! sqlx::query("INSERT INTO programs ...").execute(guard.executor()?).await?;
//! sqlx::query("INSERT INTO program_exercises ...").execute(guard.executor()?).await?;
//!
//! // If this line isn't reached the transaction rolls back
//! guard.commit().await?;
//! ```
//!
//! While a guard is open, issue every statement through `guard.executor()`.
//! With an in-memory pool the guard holds the only connection, so a query sent
//! to the pool instead would wait forever.

use sqlx::{Database, Pool, Transaction};
use tracing::{debug, warn};

use crate::errors::{AppError, AppResult, DatabaseError};

/// RAII guard for database transactions ensuring automatic rollback on drop
///
/// Wraps a `SQLx` `Transaction`. Dropping the guard without calling
/// [`commit`](Self::commit) rolls the transaction back and returns the
/// connection to the pool.
pub struct TransactionGuard<'c, DB: Database> {
    transaction: Option<Transaction<'c, DB>>,
    label: &'static str,
}

impl<'c, DB: Database> TransactionGuard<'c, DB> {
    /// Wrap an already-started transaction
    #[must_use]
    pub fn new(transaction: Transaction<'c, DB>, label: &'static str) -> Self {
        debug!(transaction = label, "Transaction started");
        Self {
            transaction: Some(transaction),
            label,
        }
    }

    /// Commit the transaction and consume the guard
    ///
    /// # Errors
    ///
    /// Returns an error if the guard was already consumed or the commit fails
    pub async fn commit(mut self) -> AppResult<()> {
        let Some(tx) = self.transaction.take() else {
            return Err(AppError::internal(
                "Transaction already consumed - cannot commit",
            ));
        };
        tx.commit().await.map_err(|e| {
            DatabaseError::transaction(format!("Failed to commit transaction: {}", self.label), e)
        })?;
        debug!(transaction = self.label, "Transaction committed");
        Ok(())
    }

    /// Explicitly roll back the transaction and consume the guard
    ///
    /// # Errors
    ///
    /// Returns an error if the guard was already consumed or the rollback fails
    pub async fn rollback(mut self) -> AppResult<()> {
        let Some(tx) = self.transaction.take() else {
            return Err(AppError::internal(
                "Transaction already consumed - cannot rollback",
            ));
        };
        tx.rollback().await.map_err(|e| {
            DatabaseError::transaction(
                format!("Failed to roll back transaction: {}", self.label),
                e,
            )
        })?;
        debug!(transaction = self.label, "Transaction rolled back");
        Ok(())
    }

    /// Connection to run statements on inside the transaction
    ///
    /// # Errors
    ///
    /// Returns an error if the guard was already committed or rolled back
    pub fn executor(&mut self) -> AppResult<&mut <DB as Database>::Connection> {
        self.transaction.as_deref_mut().ok_or_else(|| {
            AppError::internal("Transaction already consumed - guard used after commit/rollback")
        })
    }
}

impl<DB: Database> TransactionGuard<'static, DB> {
    /// Begin a transaction on `pool` and guard it
    ///
    /// # Errors
    ///
    /// Returns a store failure if no connection could be acquired
    pub async fn begin(pool: &Pool<DB>, label: &'static str) -> AppResult<Self> {
        let transaction = pool.begin().await.map_err(|e| {
            DatabaseError::transaction(format!("Failed to begin transaction: {label}"), e)
        })?;
        Ok(Self::new(transaction, label))
    }
}

impl<DB: Database> Drop for TransactionGuard<'_, DB> {
    fn drop(&mut self) {
        if self.transaction.is_some() {
            warn!(
                transaction = self.label,
                "Transaction dropped without commit - rolling back"
            );
        }
    }
}

/// `SQLite` transaction guard
pub type SqliteTransactionGuard<'c> = TransactionGuard<'c, sqlx::Sqlite>;
