// ABOUTME: Integration tests for team leaderboards, athlete progress, rosters and session logging
// ABOUTME: Lower results rank higher; only active athletes of the coach are counted
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(missing_docs, clippy::unwrap_used, clippy::float_cmp)]

mod common;

use anyhow::Result;
use cheer_server::database::repositories::MeasurementRepository;
use cheer_server::errors::ErrorKind;
use cheer_server::models::{AthleteProgress, NewMeasurement};
use common::{
    create_measurement, create_test_database, create_user, create_user_without_profile,
    days_ago, deactivate_user, insert_session, link_athlete,
};

#[tokio::test]
async fn test_team_leaderboard_ranks_best_results() -> Result<()> {
    let db = create_test_database().await?;
    let pool = db.pool();
    let coach = create_user(pool, "Casey", "Coach").await?;
    let beep = create_measurement(pool, "Beep Test", Some("s")).await?;
    let sprint = create_measurement(pool, "40m Sprint", Some("s")).await?;
    let untested = create_measurement(pool, "Vertical Jump", Some("cm")).await?;

    let ava = create_user(pool, "Ava", "Nguyen").await?;
    let ben = create_user(pool, "Ben", "Okafor").await?;
    let cleo = create_user(pool, "Cleo", "Martin").await?;
    let anon = create_user_without_profile(pool).await?;
    for athlete in [ava, ben, cleo, anon] {
        link_athlete(pool, coach, athlete, true).await?;
    }

    insert_session(pool, ava, beep, Some(10.0), Some("s"), &days_ago(14)).await?;
    insert_session(pool, ava, beep, Some(12.0), Some("s"), &days_ago(7)).await?;
    insert_session(pool, ben, beep, Some(7.0), Some("s"), &days_ago(7)).await?;
    insert_session(pool, cleo, beep, Some(7.0), Some("s"), &days_ago(3)).await?;
    insert_session(pool, cleo, beep, None, Some("s"), &days_ago(1)).await?;
    insert_session(pool, anon, beep, Some(12.0), Some("s"), &days_ago(2)).await?;
    insert_session(pool, ava, sprint, Some(5.9), Some("s"), &days_ago(2)).await?;

    let groups = db.measurements().team_leaderboard(coach).await?;
    assert_eq!(groups.len(), 2);
    assert!(groups.iter().all(|g| g.measurement_id != untested));

    let beep_board = &groups[0];
    assert_eq!(beep_board.measurement_id, beep);
    assert_eq!(beep_board.measurement_name, "Beep Test");
    assert_eq!(beep_board.unit.as_deref(), Some("s"));

    let ranks: Vec<usize> = beep_board.rankings.iter().map(|e| e.rank).collect();
    assert_eq!(ranks, vec![1, 2, 3, 4]);
    let results: Vec<f64> = beep_board.rankings.iter().map(|e| e.result).collect();
    assert_eq!(results, vec![7.0, 7.0, 10.0, 12.0]);

    let mut tied: Vec<&str> = beep_board.rankings[..2]
        .iter()
        .filter_map(|e| e.first_name.as_deref())
        .collect();
    tied.sort_unstable();
    assert_eq!(tied, vec!["Ben", "Cleo"]);
    assert_eq!(beep_board.rankings[2].last_name.as_deref(), Some("Nguyen"));
    assert_eq!(beep_board.rankings[3].first_name, None);
    assert_eq!(beep_board.rankings[3].last_name, None);

    let sprint_board = &groups[1];
    assert_eq!(sprint_board.measurement_id, sprint);
    assert_eq!(sprint_board.rankings.len(), 1);
    assert_eq!(sprint_board.rankings[0].rank, 1);
    assert_eq!(sprint_board.rankings[0].result, 5.9);
    Ok(())
}

#[tokio::test]
async fn test_team_leaderboard_skips_inactive_and_foreign_athletes() -> Result<()> {
    let db = create_test_database().await?;
    let pool = db.pool();
    let coach = create_user(pool, "Casey", "Coach").await?;
    let rival_coach = create_user(pool, "Rory", "Rival").await?;
    let beep = create_measurement(pool, "Beep Test", Some("s")).await?;

    let active = create_user(pool, "Ava", "Active").await?;
    let benched = create_user(pool, "Bo", "Benched").await?;
    let deactivated = create_user(pool, "Dee", "Deactivated").await?;
    let foreign = create_user(pool, "Fay", "Foreign").await?;

    link_athlete(pool, coach, active, true).await?;
    link_athlete(pool, coach, benched, false).await?;
    link_athlete(pool, coach, deactivated, true).await?;
    link_athlete(pool, rival_coach, foreign, true).await?;
    deactivate_user(pool, deactivated).await?;

    for (athlete, result) in [(active, 9.0), (benched, 1.0), (deactivated, 2.0), (foreign, 0.5)] {
        insert_session(pool, athlete, beep, Some(result), Some("s"), &days_ago(1)).await?;
    }

    let groups = db.measurements().team_leaderboard(coach).await?;
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].rankings.len(), 1);
    assert_eq!(groups[0].rankings[0].first_name.as_deref(), Some("Ava"));
    assert_eq!(groups[0].rankings[0].result, 9.0);

    let lonely = create_user(pool, "Lee", "Lonely").await?;
    assert!(db.measurements().team_leaderboard(lonely).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_athlete_progress_uses_second_latest_as_baseline() -> Result<()> {
    let db = create_test_database().await?;
    let pool = db.pool();
    let athlete = create_user(pool, "Ava", "Nguyen").await?;
    let run = create_measurement(pool, "5k Run", Some("s")).await?;
    let other = create_measurement(pool, "Plank", Some("s")).await?;

    insert_session(pool, athlete, run, Some(3000.0), Some("s"), &days_ago(40)).await?;
    insert_session(pool, athlete, run, Some(5999.0), Some("s"), &days_ago(20)).await?;
    insert_session(pool, athlete, run, None, Some("s"), &days_ago(10)).await?;
    let latest = insert_session(pool, athlete, run, Some(3294.0), Some("min"), &days_ago(0)).await?;
    insert_session(pool, athlete, other, Some(90.0), Some("s"), &days_ago(0)).await?;

    let progress = db.measurements().athlete_progress(athlete, run).await?;
    assert_eq!(progress.history.len(), 3);
    assert_eq!(progress.history[0].session_id, latest);
    let results: Vec<f64> = progress.history.iter().map(|e| e.result).collect();
    assert_eq!(results, vec![3294.0, 5999.0, 3000.0]);

    assert_eq!(progress.summary.latest_result, Some(3294.0));
    assert_eq!(progress.summary.first_result, Some(5999.0));
    assert_eq!(progress.summary.total_change, Some(2705.0));
    assert_eq!(progress.summary.unit.as_deref(), Some("min"));
    Ok(())
}

#[tokio::test]
async fn test_athlete_progress_with_one_or_no_sessions() -> Result<()> {
    let db = create_test_database().await?;
    let pool = db.pool();
    let athlete = create_user(pool, "Ava", "Nguyen").await?;
    let run = create_measurement(pool, "5k Run", Some("s")).await?;

    let empty = db.measurements().athlete_progress(athlete, run).await?;
    assert_eq!(empty, AthleteProgress::default());

    insert_session(pool, athlete, run, Some(1500.0), Some("s"), &days_ago(0)).await?;
    let single = db.measurements().athlete_progress(athlete, run).await?;
    assert_eq!(single.history.len(), 1);
    assert_eq!(single.summary.latest_result, Some(1500.0));
    assert_eq!(single.summary.first_result, None);
    assert_eq!(single.summary.total_change, None);
    Ok(())
}

#[tokio::test]
async fn test_list_athletes_of_coach() -> Result<()> {
    let db = create_test_database().await?;
    let pool = db.pool();
    let coach = create_user(pool, "Casey", "Coach").await?;
    let zed = create_user(pool, "Zed", "Young").await?;
    let amy = create_user(pool, "Amy", "Adams").await?;
    let retired = create_user(pool, "Rex", "Retired").await?;
    let dropped = create_user(pool, "Dot", "Dropped").await?;

    link_athlete(pool, coach, zed, true).await?;
    link_athlete(pool, coach, amy, true).await?;
    link_athlete(pool, coach, retired, true).await?;
    link_athlete(pool, coach, dropped, false).await?;
    deactivate_user(pool, retired).await?;

    let roster = db.measurements().list_athletes_of_coach(coach).await?;
    let names: Vec<&str> = roster
        .iter()
        .filter_map(|a| a.last_name.as_deref())
        .collect();
    assert_eq!(names, vec!["Adams", "Retired", "Young"]);
    assert!(roster[0].is_active);
    assert!(!roster[1].is_active);
    assert_eq!(roster[2].athlete_id, zed);
    Ok(())
}

#[tokio::test]
async fn test_record_measurement_defaults_unit() -> Result<()> {
    let db = create_test_database().await?;
    let pool = db.pool();
    let athlete = create_user(pool, "Ava", "Nguyen").await?;
    let jump = create_measurement(pool, "Vertical Jump", Some("cm")).await?;

    let stored = db
        .measurements()
        .record_measurement(&NewMeasurement {
            athlete_id: athlete,
            measurement_id: jump,
            result: 52.5,
            unit: None,
            status: Some(1),
        })
        .await?;
    assert_eq!(stored.athlete_id, athlete);
    assert_eq!(stored.result, Some(52.5));
    assert_eq!(stored.measurement_unit.as_deref(), Some("cm"));
    assert_eq!(stored.status, Some(1));

    let overridden = db
        .measurements()
        .record_measurement(&NewMeasurement {
            athlete_id: athlete,
            measurement_id: jump,
            result: 20.5,
            unit: Some("in".into()),
            status: None,
        })
        .await?;
    assert_eq!(overridden.measurement_unit.as_deref(), Some("in"));

    let progress = db.measurements().athlete_progress(athlete, jump).await?;
    assert_eq!(progress.history.len(), 2);
    assert_eq!(progress.summary.latest_result, Some(20.5));
    Ok(())
}

#[tokio::test]
async fn test_record_measurement_rejects_bad_input() -> Result<()> {
    let db = create_test_database().await?;
    let pool = db.pool();
    let athlete = create_user(pool, "Ava", "Nguyen").await?;
    let jump = create_measurement(pool, "Vertical Jump", Some("cm")).await?;
    let measurements = db.measurements();

    let not_finite = measurements
        .record_measurement(&NewMeasurement {
            athlete_id: athlete,
            measurement_id: jump,
            result: f64::NAN,
            unit: None,
            status: None,
        })
        .await
        .unwrap_err();
    assert_eq!(not_finite.kind(), ErrorKind::InvalidInput);

    let unknown_type = measurements
        .record_measurement(&NewMeasurement {
            athlete_id: athlete,
            measurement_id: jump + 100,
            result: 40.0,
            unit: None,
            status: None,
        })
        .await
        .unwrap_err();
    assert_eq!(unknown_type.kind(), ErrorKind::NotFound);
    assert_eq!(unknown_type.message, "Measurement not found");

    let unknown_athlete = measurements
        .record_measurement(&NewMeasurement {
            athlete_id: uuid::Uuid::new_v4(),
            measurement_id: jump,
            result: 40.0,
            unit: None,
            status: None,
        })
        .await
        .unwrap_err();
    assert_eq!(unknown_athlete.kind(), ErrorKind::InvalidInput);
    assert_eq!(unknown_athlete.message, "Unknown athlete");
    assert_eq!(common::count_rows(pool, "measurement_sessions").await, 0);
    Ok(())
}
