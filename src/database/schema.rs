// ABOUTME: Idempotent SQLite schema for programs, workouts, rosters and measurement sessions
// ABOUTME: Applied in order by Database::migrate; every statement is IF NOT EXISTS
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Table layout
//!
//! User ids are stored as hyphenated UUID text. Timestamps are RFC 3339 text
//! with fixed microsecond precision so lexical order is chronological order.
//! `is_deleted` columns are nullable: NULL reads as "not deleted".

/// Named migration steps, applied in order
pub(super) const MIGRATIONS: &[(&str, &str)] = &[
    (
        "users",
        r"
        CREATE TABLE IF NOT EXISTS users (
            id TEXT PRIMARY KEY,
            email TEXT NOT NULL UNIQUE,
            is_active INTEGER NOT NULL DEFAULT 1,
            created_at TEXT NOT NULL
        )
        ",
    ),
    (
        "user_profiles",
        r"
        CREATE TABLE IF NOT EXISTS user_profiles (
            user_id TEXT PRIMARY KEY REFERENCES users(id) ON DELETE CASCADE,
            first_name TEXT,
            last_name TEXT,
            updated_at TEXT NOT NULL
        )
        ",
    ),
    (
        "coach_athletes",
        r"
        CREATE TABLE IF NOT EXISTS coach_athletes (
            coach_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            athlete_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            is_active INTEGER NOT NULL DEFAULT 1,
            created_at TEXT NOT NULL,
            PRIMARY KEY (coach_id, athlete_id)
        )
        ",
    ),
    (
        "exercises",
        r"
        CREATE TABLE IF NOT EXISTS exercises (
            exercise_id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            description TEXT,
            cues TEXT,
            video_url TEXT,
            image_url TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        ",
    ),
    (
        "programs",
        r"
        CREATE TABLE IF NOT EXISTS programs (
            program_id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            name_folded TEXT NOT NULL,
            type TEXT,
            training_type TEXT,
            started_at TEXT,
            finished_at TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            created_by TEXT NOT NULL,
            copied_from INTEGER REFERENCES programs(program_id) ON DELETE SET NULL,
            is_deleted INTEGER DEFAULT 0
        )
        ",
    ),
    (
        "programs_owner_index",
        "CREATE INDEX IF NOT EXISTS idx_programs_owner ON programs(created_by, created_at)",
    ),
    (
        "program_exercises",
        r"
        CREATE TABLE IF NOT EXISTS program_exercises (
            program_exercise_id INTEGER PRIMARY KEY AUTOINCREMENT,
            program_id INTEGER NOT NULL REFERENCES programs(program_id) ON DELETE CASCADE,
            exercise_id INTEGER NOT NULL REFERENCES exercises(exercise_id),
            type TEXT,
            sets TEXT,
            status INTEGER NOT NULL DEFAULT 0,
            is_deleted INTEGER DEFAULT 0,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        ",
    ),
    (
        "program_exercises_program_index",
        "CREATE INDEX IF NOT EXISTS idx_program_exercises_program ON program_exercises(program_id)",
    ),
    (
        "training_data",
        r"
        CREATE TABLE IF NOT EXISTS training_data (
            training_data_id INTEGER PRIMARY KEY AUTOINCREMENT,
            program_exercise_id INTEGER NOT NULL
                REFERENCES program_exercises(program_exercise_id) ON DELETE CASCADE,
            user_id TEXT NOT NULL,
            exercise_id INTEGER NOT NULL REFERENCES exercises(exercise_id),
            sets TEXT NOT NULL,
            note TEXT NOT NULL DEFAULT '',
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        ",
    ),
    (
        "training_data_user_exercise_index",
        "CREATE INDEX IF NOT EXISTS idx_training_data_user_exercise ON training_data(user_id, exercise_id, created_at)",
    ),
    (
        "measurements",
        r"
        CREATE TABLE IF NOT EXISTS measurements (
            measurement_id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            unit TEXT,
            created_at TEXT NOT NULL
        )
        ",
    ),
    (
        "measurement_sessions",
        r"
        CREATE TABLE IF NOT EXISTS measurement_sessions (
            session_id INTEGER PRIMARY KEY AUTOINCREMENT,
            athlete_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            measurement_id INTEGER NOT NULL REFERENCES measurements(measurement_id),
            result REAL,
            status INTEGER,
            measurement_unit TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        ",
    ),
    (
        "measurement_sessions_athlete_index",
        "CREATE INDEX IF NOT EXISTS idx_measurement_sessions_athlete ON measurement_sessions(athlete_id, measurement_id, created_at)",
    ),
];
