// ABOUTME: Tests for environment-driven database and logging configuration
// ABOUTME: Env-mutating tests run serially; also checks migrations and file-backed persistence
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(missing_docs, clippy::unwrap_used)]

mod common;

use anyhow::Result;
use cheer_server::config::{DatabaseConfig, DatabaseUrl};
use cheer_server::database::repositories::ProgramRepository;
use cheer_server::database::Database;
use cheer_server::errors::ErrorKind;
use cheer_server::logging::{LogFormat, LoggingConfig};
use cheer_server::models::NewProgram;
use serial_test::serial;
use std::env;
use uuid::Uuid;

const DATABASE_VARS: &[&str] = &["DATABASE_URL", "AUTO_MIGRATE", "DATABASE_MAX_CONNECTIONS"];
const LOGGING_VARS: &[&str] = &["ENVIRONMENT", "RUST_LOG", "LOG_FORMAT", "SERVICE_NAME"];

fn clear(vars: &[&str]) {
    for var in vars {
        env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_database_config_defaults() {
    clear(DATABASE_VARS);

    let config = DatabaseConfig::from_env().unwrap();
    assert_eq!(config.url, DatabaseUrl::Memory);
    assert!(config.auto_migrate);
    assert_eq!(config.max_connections, 5);
}

#[test]
#[serial]
fn test_database_config_from_env() {
    clear(DATABASE_VARS);
    env::set_var("DATABASE_URL", "sqlite:./data/cheer.db");
    env::set_var("AUTO_MIGRATE", "false");
    env::set_var("DATABASE_MAX_CONNECTIONS", "12");

    let config = DatabaseConfig::from_env().unwrap();
    assert_eq!(config.url.to_connection_string(), "sqlite:./data/cheer.db");
    assert!(!config.auto_migrate);
    assert_eq!(config.max_connections, 12);

    clear(DATABASE_VARS);
}

#[test]
#[serial]
fn test_database_config_rejects_invalid_values() {
    clear(DATABASE_VARS);

    env::set_var("DATABASE_MAX_CONNECTIONS", "0");
    assert_eq!(
        DatabaseConfig::from_env().unwrap_err().kind(),
        ErrorKind::InvalidInput
    );

    env::set_var("DATABASE_MAX_CONNECTIONS", "many");
    assert!(DatabaseConfig::from_env().is_err());

    clear(DATABASE_VARS);
    env::set_var("AUTO_MIGRATE", "sometimes");
    assert!(DatabaseConfig::from_env().is_err());

    clear(DATABASE_VARS);
    env::set_var("DATABASE_URL", "postgresql://localhost/cheer");
    assert_eq!(
        DatabaseConfig::from_env().unwrap_err().kind(),
        ErrorKind::Config
    );

    clear(DATABASE_VARS);
}

#[test]
#[serial]
fn test_logging_config_follows_environment() {
    clear(LOGGING_VARS);

    let development = LoggingConfig::from_env();
    assert_eq!(development.format, LogFormat::Pretty);
    assert_eq!(development.level, "info");
    assert_eq!(development.service_name, "cheer-server");
    assert!(!development.include_location);

    env::set_var("ENVIRONMENT", "production");
    let production = LoggingConfig::from_env();
    assert_eq!(production.format, LogFormat::Json);
    assert!(production.include_location);
    assert!(production.include_thread);

    env::set_var("LOG_FORMAT", "compact");
    assert_eq!(LoggingConfig::from_env().format, LogFormat::Compact);

    clear(LOGGING_VARS);
}

#[tokio::test]
async fn test_migrations_are_idempotent() -> Result<()> {
    let db = common::create_test_database().await?;
    db.migrate().await?;
    db.migrate().await?;
    assert_eq!(common::count_rows(db.pool(), "programs").await, 0);
    Ok(())
}

#[tokio::test]
async fn test_file_database_persists_across_reopen() -> Result<()> {
    common::init_test_logging();
    let dir = tempfile::tempdir()?;
    let url = format!("sqlite:{}", dir.path().join("cheer.db").display());
    let owner = Uuid::new_v4();

    let program_id = {
        let db = Database::new(&url).await?;
        let created = db
            .programs()
            .create_program(owner, &NewProgram::named("Persisted"))
            .await?;
        db.pool().close().await;
        created.program_id
    };

    let reopened = Database::new(&url).await?;
    let program = reopened.programs().get_program(owner, program_id).await?;
    assert_eq!(program.name, "Persisted");
    Ok(())
}
