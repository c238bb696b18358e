// ABOUTME: Column encoding helpers shared by the store managers
// ABOUTME: Timestamps, dates, user ids, JSON sets, name folding and write error mapping
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::{AppError, AppResult, DatabaseError};
use crate::models::ExerciseSets;
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use tracing::warn;
use uuid::Uuid;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Current time in the stored timestamp format
pub(crate) fn now_timestamp() -> String {
    format_timestamp(Utc::now())
}

/// RFC 3339, UTC, fixed microsecond precision: lexical order is chronological
pub(crate) fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub(crate) fn parse_timestamp(raw: &str, column: &str) -> AppResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|at| at.with_timezone(&Utc))
        .map_err(|_| AppError::from(DatabaseError::decode(format!("Invalid timestamp in {column}"))))
}

pub(crate) fn format_date(date: Option<NaiveDate>) -> Option<String> {
    date.map(|d| d.format(DATE_FORMAT).to_string())
}

pub(crate) fn parse_date(raw: Option<String>, column: &str) -> AppResult<Option<NaiveDate>> {
    raw.map(|value| {
        NaiveDate::parse_from_str(&value, DATE_FORMAT)
            .map_err(|_| AppError::from(DatabaseError::decode(format!("Invalid date in {column}"))))
    })
    .transpose()
}

pub(crate) fn parse_user_id(raw: &str, column: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw)
        .map_err(|_| AppError::from(DatabaseError::decode(format!("Invalid user id in {column}"))))
}

/// Stored delete flags are tri-state; NULL means "not deleted"
pub(crate) fn is_deleted(flag: Option<i64>) -> bool {
    flag.is_some_and(|value| value != 0)
}

pub(crate) fn encode_sets(sets: &ExerciseSets) -> AppResult<String> {
    serde_json::to_string(sets)
        .map_err(|e| AppError::from(DatabaseError::serialization("Failed to encode sets", e)))
}

pub(crate) fn decode_sets(raw: Option<String>) -> AppResult<Option<ExerciseSets>> {
    raw.map(|value| ExerciseSets::from_json_str(&value)).transpose()
}

/// Escape LIKE wildcards so user input matches literally (used with `ESCAPE '\'`)
pub(crate) fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

/// Unicode-aware case folding shared by stored search columns and search terms
///
/// SQLite's `LOWER` and `LIKE` only fold ASCII, so both sides are folded here.
pub(crate) fn fold_name(name: &str) -> String {
    name.to_lowercase()
}

/// Substring pattern for a LIKE comparison against a [`fold_name`] column
pub(crate) fn contains_pattern(term: &str) -> String {
    format!("%{}%", escape_like(&fold_name(term)))
}

/// Map a failed write whose ids came from the caller
///
/// A foreign-key violation means one of those ids names nothing, so it is the
/// caller's mistake (`InvalidInput`) rather than a store failure.
pub(crate) fn write_error(
    context: &'static str,
    reference: &'static str,
) -> impl FnOnce(sqlx::Error) -> AppError {
    move |e| {
        if e
            .as_database_error()
            .is_some_and(|db| db.is_foreign_key_violation())
        {
            warn!(reference, "{context}: unknown reference");
            return AppError::invalid_input(format!("Unknown {reference}"));
        }
        AppError::from(DatabaseError::query(context, e))
    }
}
