// ABOUTME: Demo data seeding utility for the Cheer server
// ABOUTME: Seeds a coach, a small team, an exercise catalog, measurement sessions and one program
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Demo data seeder for the Cheer server.
//!
//! Creates one coach with a roster of athletes, a small exercise catalog,
//! timed measurement types with a few sessions per athlete, and a demo
//! program with a logged workout. Prints the resulting team leaderboard.
//!
//! Usage:
//! ```bash
//! # Seed demo data (uses DATABASE_URL from environment)
//! cargo run --bin cheer-seed
//!
//! # Override database URL
//! cargo run --bin cheer-seed -- --database-url sqlite:./data/cheer.db
//!
//! # Force re-seed (replaces existing demo data)
//! cargo run --bin cheer-seed -- --force
//! ```

use anyhow::Result;
use chrono::{Duration, SecondsFormat, Utc};
use clap::Parser;
use cheer_server::constants::database::DEFAULT_DATABASE_URL;
use cheer_server::database::repositories::{
    MeasurementRepository, ProgramRepository, WorkoutRepository,
};
use cheer_server::database::Database;
use cheer_server::models::{NewProgram, ProgramExerciseSpec, RecordWorkoutRequest};
use serde_json::json;
use sqlx::SqlitePool;
use std::env;
use tracing::info;
use uuid::Uuid;

#[derive(Parser)]
#[command(
    name = "cheer-seed",
    about = "Cheer Server Demo Data Seeder",
    long_about = "Create a demo coach, athletes, exercises, measurement sessions and a program"
)]
struct SeedArgs {
    /// Database URL override
    #[arg(long)]
    database_url: Option<String>,

    /// Force re-seed even if data already exists
    #[arg(long)]
    force: bool,

    /// Enable verbose logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

struct AthleteData {
    email: &'static str,
    first_name: &'static str,
    last_name: &'static str,
    /// Results per measurement, oldest first
    results: &'static [&'static [f64]],
}

const COACH_EMAIL: &str = "coach@cheer.demo";

const EXERCISES: &[(&str, &str)] = &[
    ("Back Squat", "Brace, sit between the heels, drive up through mid-foot"),
    ("Bench Press", "Shoulder blades pinned, bar path over the wrists"),
    ("Deadlift", "Push the floor away, keep the bar against the legs"),
    ("Pull Up", "Full hang at the bottom, chin over the bar at the top"),
];

const MEASUREMENTS: &[(&str, &str)] = &[("Beep Test", "s"), ("40m Sprint", "s")];

const ATHLETES: &[AthleteData] = &[
    AthleteData {
        email: "ava@cheer.demo",
        first_name: "Ava",
        last_name: "Nguyen",
        results: &[&[612.0, 598.5, 590.0], &[6.1, 5.9]],
    },
    AthleteData {
        email: "ben@cheer.demo",
        first_name: "Ben",
        last_name: "Okafor",
        results: &[&[640.0, 630.0], &[5.8, 5.85]],
    },
    AthleteData {
        email: "chloe@cheer.demo",
        first_name: "Chloe",
        last_name: "Martin",
        results: &[&[590.0], &[6.4, 6.2, 6.0]],
    },
];

#[tokio::main]
async fn main() -> Result<()> {
    let args = SeedArgs::parse();

    let log_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt().with_env_filter(log_level).init();

    info!("=== Cheer Server Demo Data Seeder ===");

    let database_url = args
        .database_url
        .or_else(|| env::var("DATABASE_URL").ok())
        .unwrap_or_else(|| DEFAULT_DATABASE_URL.into());

    info!("Connecting to database: {}", database_url);
    let db = Database::new(&database_url).await?;
    let pool = db.pool();

    let (user_count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await?;
    if user_count > 0 {
        if !args.force {
            info!(
                "Demo data already seeded ({} users). Use --force to re-seed.",
                user_count
            );
            return Ok(());
        }
        clear_existing(pool).await?;
    }

    let coach = seed_user(pool, COACH_EMAIL, "Casey", "Coach").await?;

    info!("Seeding {} exercises...", EXERCISES.len());
    let mut exercise_ids = Vec::with_capacity(EXERCISES.len());
    for (name, cues) in EXERCISES {
        exercise_ids.push(seed_exercise(pool, name, cues).await?);
    }

    info!("Seeding {} measurement types...", MEASUREMENTS.len());
    let mut measurement_ids = Vec::with_capacity(MEASUREMENTS.len());
    for (name, unit) in MEASUREMENTS {
        measurement_ids.push(seed_measurement(pool, name, unit).await?);
    }

    info!("Seeding {} athletes...", ATHLETES.len());
    for athlete in ATHLETES {
        let athlete_id =
            seed_user(pool, athlete.email, athlete.first_name, athlete.last_name).await?;
        link_athlete(pool, coach, athlete_id).await?;
        for (measurement_id, results) in measurement_ids.iter().zip(athlete.results) {
            seed_sessions(pool, athlete_id, *measurement_id, results).await?;
        }
    }

    let program = db
        .programs()
        .create_program_with_exercises(
            coach,
            &NewProgram {
                program_type: Some("strength".into()),
                training_type: Some("hypertrophy".into()),
                ..NewProgram::named("Demo Strength Block")
            },
            &exercise_ids
                .iter()
                .map(|id| ProgramExerciseSpec::for_exercise(*id))
                .collect::<Vec<_>>(),
        )
        .await?;
    info!(
        "Created program '{}' with {} exercises",
        program.program.name, program.total_exercises
    );

    let slots = db
        .programs()
        .list_program_exercises(coach, program.program.program_id)
        .await?;
    if let Some(first) = slots.first() {
        db.workouts()
            .record_workout(
                coach,
                &RecordWorkoutRequest {
                    program_id: program.program.program_id,
                    program_exercise_id: first.slot.program_exercise_id,
                    exercise_id: None,
                    note: Some("Felt strong".into()),
                    sets: json!([{"reps": 5, "weight": 100}, {"reps": 5, "weight": 105}]),
                },
            )
            .await?;
    }

    for group in db.measurements().team_leaderboard(coach).await? {
        info!("Leaderboard: {}", group.measurement_name);
        for entry in group.rankings {
            info!(
                "  #{} {} {} - {}{}",
                entry.rank,
                entry.first_name.unwrap_or_default(),
                entry.last_name.unwrap_or_default(),
                entry.result,
                group.unit.as_deref().unwrap_or("")
            );
        }
    }

    info!("=== Seeding Complete ===");
    Ok(())
}

fn timestamp(offset_days: i64) -> String {
    (Utc::now() - Duration::days(offset_days)).to_rfc3339_opts(SecondsFormat::Micros, true)
}

async fn clear_existing(pool: &SqlitePool) -> Result<()> {
    info!("Removing existing demo data...");
    for table in [
        "training_data",
        "program_exercises",
        "programs",
        "measurement_sessions",
        "measurements",
        "exercises",
        "coach_athletes",
        "user_profiles",
        "users",
    ] {
        sqlx::query(&format!("DELETE FROM {table}"))
            .execute(pool)
            .await?;
    }
    Ok(())
}

async fn seed_user(
    pool: &SqlitePool,
    email: &str,
    first_name: &str,
    last_name: &str,
) -> Result<Uuid> {
    let id = Uuid::new_v4();
    let now = timestamp(0);
    sqlx::query("INSERT INTO users (id, email, is_active, created_at) VALUES ($1, $2, 1, $3)")
        .bind(id.to_string())
        .bind(email)
        .bind(&now)
        .execute(pool)
        .await?;
    sqlx::query(
        "INSERT INTO user_profiles (user_id, first_name, last_name, updated_at) VALUES ($1, $2, $3, $4)",
    )
    .bind(id.to_string())
    .bind(first_name)
    .bind(last_name)
    .bind(&now)
    .execute(pool)
    .await?;
    Ok(id)
}

async fn link_athlete(pool: &SqlitePool, coach: Uuid, athlete: Uuid) -> Result<()> {
    sqlx::query(
        "INSERT INTO coach_athletes (coach_id, athlete_id, is_active, created_at) VALUES ($1, $2, 1, $3)",
    )
    .bind(coach.to_string())
    .bind(athlete.to_string())
    .bind(timestamp(0))
    .execute(pool)
    .await?;
    Ok(())
}

async fn seed_exercise(pool: &SqlitePool, name: &str, cues: &str) -> Result<i64> {
    let now = timestamp(0);
    let result = sqlx::query(
        "INSERT INTO exercises (name, cues, created_at, updated_at) VALUES ($1, $2, $3, $3)",
    )
    .bind(name)
    .bind(cues)
    .bind(&now)
    .execute(pool)
    .await?;
    Ok(result.last_insert_rowid())
}

async fn seed_measurement(pool: &SqlitePool, name: &str, unit: &str) -> Result<i64> {
    let result =
        sqlx::query("INSERT INTO measurements (name, unit, created_at) VALUES ($1, $2, $3)")
            .bind(name)
            .bind(unit)
            .bind(timestamp(0))
            .execute(pool)
            .await?;
    Ok(result.last_insert_rowid())
}

async fn seed_sessions(
    pool: &SqlitePool,
    athlete: Uuid,
    measurement_id: i64,
    results: &[f64],
) -> Result<()> {
    // Results are oldest first, one week apart, ending today
    for (weeks_ago, value) in (0_i64..).zip(results.iter().rev()) {
        let at = timestamp(weeks_ago * 7);
        sqlx::query(
            r"
            INSERT INTO measurement_sessions (
                athlete_id, measurement_id, result, status, measurement_unit, created_at, updated_at
            )
            SELECT $1, measurement_id, $2, 1, unit, $3, $3
            FROM measurements WHERE measurement_id = $4
            ",
        )
        .bind(athlete.to_string())
        .bind(value)
        .bind(&at)
        .bind(measurement_id)
        .execute(pool)
        .await?;
    }
    Ok(())
}
