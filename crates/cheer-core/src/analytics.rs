// ABOUTME: Pure leaderboard ranking and progress summary calculations
// ABOUTME: Operates on rows already fetched from the measurement session log
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Measurement analytics folds
//!
//! The store returns flat rows. These functions shape them into the documents
//! the HTTP layer serializes, and are kept free of I/O so they can be tested
//! on literal data.

use crate::models::{
    AthleteBest, AthleteProgress, LeaderboardEntry, MeasurementGroup, ProgressEntry,
    ProgressSummary,
};

/// Group per-athlete bests by measurement type and rank them
///
/// Groups appear in the order their measurement type is first seen. Inside a
/// group athletes are ordered by ascending best result (lower is better) with a
/// stable sort, so equal results keep their input order. Ranks are output
/// positions starting at 1: ties never share a rank.
#[must_use]
pub fn rank_leaderboard(rows: Vec<AthleteBest>) -> Vec<MeasurementGroup> {
    let mut groups: Vec<(MeasurementGroup, Vec<AthleteBest>)> = Vec::new();

    for row in rows {
        match groups
            .iter_mut()
            .find(|(group, _)| group.measurement_id == row.measurement_id)
        {
            Some((_, members)) => members.push(row),
            None => {
                let group = MeasurementGroup {
                    measurement_id: row.measurement_id,
                    measurement_name: row.measurement_name.clone(),
                    unit: row.unit.clone(),
                    rankings: Vec::new(),
                };
                groups.push((group, vec![row]));
            }
        }
    }

    groups
        .into_iter()
        .map(|(mut group, mut members)| {
            members.sort_by(|a, b| a.best_result.total_cmp(&b.best_result));
            group.rankings = members
                .into_iter()
                .enumerate()
                .map(|(position, member)| LeaderboardEntry {
                    rank: position + 1,
                    first_name: member.first_name,
                    last_name: member.last_name,
                    result: member.best_result,
                })
                .collect();
            group
        })
        .collect()
}

/// Summarize an athlete's history for one measurement
///
/// `history` must be ordered most recent first. The latest result is
/// `history[0]`; the baseline ("first") result is `history[1]`, the
/// second-most-recent session, not the oldest one. With a single session there
/// is no baseline, so `first_result` and `total_change` stay `None`.
#[must_use]
pub fn summarize_progress(history: Vec<ProgressEntry>) -> AthleteProgress {
    let Some(latest) = history.first() else {
        return AthleteProgress::default();
    };

    let first_result = history.get(1).map(|entry| entry.result);
    let summary = ProgressSummary {
        latest_result: Some(latest.result),
        first_result,
        total_change: first_result.map(|first| (first - latest.result).abs()),
        unit: latest.unit.clone(),
    };

    AthleteProgress { summary, history }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    fn best(measurement_id: i64, last_name: &str, best_result: f64) -> AthleteBest {
        AthleteBest {
            measurement_id,
            measurement_name: format!("m{measurement_id}"),
            unit: Some("sec".to_owned()),
            athlete_id: Uuid::new_v4(),
            first_name: Some("A".to_owned()),
            last_name: Some(last_name.to_owned()),
            best_result,
        }
    }

    fn entry(session_id: i64, result: f64, unit: &str) -> ProgressEntry {
        ProgressEntry {
            session_id,
            result,
            unit: Some(unit.to_owned()),
            status: None,
            created_at: Utc.timestamp_opt(1_700_000_000 - session_id, 0).unwrap(),
        }
    }

    #[test]
    fn test_ties_receive_consecutive_ranks() {
        let groups = rank_leaderboard(vec![
            best(1, "ten", 10.0),
            best(1, "seven-a", 7.0),
            best(1, "seven-b", 7.0),
            best(1, "twelve", 12.0),
        ]);

        assert_eq!(groups.len(), 1);
        let ranks: Vec<usize> = groups[0].rankings.iter().map(|r| r.rank).collect();
        let results: Vec<f64> = groups[0].rankings.iter().map(|r| r.result).collect();
        assert_eq!(ranks, vec![1, 2, 3, 4]);
        assert_eq!(results, vec![7.0, 7.0, 10.0, 12.0]);
        assert_eq!(groups[0].rankings[0].last_name.as_deref(), Some("seven-a"));
    }

    #[test]
    fn test_groups_keep_first_seen_order() {
        let groups = rank_leaderboard(vec![
            best(4, "x", 3.0),
            best(2, "y", 1.0),
            best(4, "z", 2.0),
        ]);
        let ids: Vec<i64> = groups.iter().map(|g| g.measurement_id).collect();
        assert_eq!(ids, vec![4, 2]);
        assert_eq!(groups[0].rankings[0].last_name.as_deref(), Some("z"));
        assert_eq!(groups[0].unit.as_deref(), Some("sec"));
    }

    #[test]
    fn test_empty_leaderboard() {
        assert!(rank_leaderboard(Vec::new()).is_empty());
    }

    #[test]
    fn test_progress_uses_second_most_recent_as_baseline() {
        let progress = summarize_progress(vec![
            entry(3, 3294.0, "ms"),
            entry(2, 5999.0, "ms"),
            entry(1, 5999.0, "ms"),
        ]);

        assert_eq!(progress.summary.latest_result, Some(3294.0));
        assert_eq!(progress.summary.first_result, Some(5999.0));
        assert_eq!(progress.summary.total_change, Some(2705.0));
        assert_eq!(progress.summary.unit.as_deref(), Some("ms"));
        assert_eq!(progress.history.len(), 3);
    }

    #[test]
    fn test_progress_change_is_absolute() {
        let progress = summarize_progress(vec![entry(2, 12.5, "sec"), entry(1, 11.0, "sec")]);
        assert_eq!(progress.summary.total_change, Some(1.5));
    }

    #[test]
    fn test_empty_history_yields_null_summary() {
        let progress = summarize_progress(Vec::new());
        assert_eq!(progress.summary, ProgressSummary::default());
        assert!(progress.history.is_empty());
    }

    #[test]
    fn test_single_session_has_no_baseline() {
        let progress = summarize_progress(vec![entry(1, 9.8, "sec")]);
        assert_eq!(progress.summary.latest_result, Some(9.8));
        assert_eq!(progress.summary.first_result, None);
        assert_eq!(progress.summary.total_change, None);
    }

    #[test]
    fn test_summary_serializes_camel_case() {
        let json = serde_json::to_value(ProgressSummary::default()).unwrap();
        assert!(json.get("latestResult").is_some());
        assert!(json.get("totalChange").is_some());
    }
}
