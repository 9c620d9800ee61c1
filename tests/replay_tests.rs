// Unit tests for replay module
//
// Tests the core functionality of the replay engine including:
// - Loading JSONL log files
// - Replaying individual turns
// - Validating expected moves
// - Generating statistics

use battlesnake_planner::config::Config;
use battlesnake_planner::planner::DecisionReason;
use battlesnake_planner::replay::ReplayEngine;
use battlesnake_planner::scoring::Strategy;
use battlesnake_planner::types::Direction;
use std::path::PathBuf;

/// Helper function to get the path to test fixtures
fn fixture_path(filename: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(filename)
}

fn engine() -> ReplayEngine {
    ReplayEngine::new(Config::default_hardcoded(), false)
}

#[test]
fn test_load_log_file_pathfinder_food() {
    let entries = engine()
        .load_log_file(fixture_path("pathfinder_food.jsonl"))
        .expect("Failed to load pathfinder_food.jsonl");

    assert_eq!(entries.len(), 3, "Expected 3 log entries");
    for (i, entry) in entries.iter().enumerate() {
        assert_eq!(entry.turn, i as i32, "Turn number should match index");
        assert_eq!(entry.strategy, Strategy::Pathfinder);
        assert_eq!(entry.chosen_move, "up");
        assert_eq!(entry.you_id, "me");
    }
    assert_eq!(entries[2].board.snakes[0].health, 88);
}

#[test]
fn test_replay_all_pathfinder_matches() {
    let engine = engine();
    let entries = engine
        .load_log_file(fixture_path("pathfinder_food.jsonl"))
        .unwrap();

    let results = engine.replay_all(&entries);
    assert_eq!(results.len(), 3);
    for result in &results {
        assert!(result.matches, "Turn {} should replay as logged", result.turn);
        assert_eq!(result.replayed_move, Direction::Up);
        assert_eq!(result.reason, DecisionReason::PathToFood);
        assert_eq!(result.replayed_score, None, "Path following is unscored");
    }
}

#[test]
fn test_replay_reports_mismatch() {
    let engine = engine();
    let entries = engine
        .load_log_file(fixture_path("safe_mismatch.jsonl"))
        .unwrap();

    let results = engine.replay_all(&entries);
    assert_eq!(results.len(), 2);

    // Turn 3 was logged as right, but every move has equal space so up wins
    assert_eq!(results[0].turn, 3);
    assert_eq!(results[0].original_move, Direction::Right);
    assert_eq!(results[0].replayed_move, Direction::Up);
    assert!(!results[0].matches);
    assert_eq!(results[0].reason, DecisionReason::Scored);
    assert_eq!(results[0].replayed_score, Some(96.0));

    assert!(results[1].matches);

    let report = engine.format_report(&results);
    assert!(report.contains("Mismatches:     1"));
    assert!(report.contains("Turn 3: right → up"));
}

#[test]
fn test_replay_specific_turns() {
    let engine = engine();
    let entries = engine
        .load_log_file(fixture_path("safe_mismatch.jsonl"))
        .unwrap();

    let results = engine.replay_turns(&entries, &[4]).unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].turn, 4);
    assert!(results[0].matches);

    assert!(engine.replay_turns(&entries, &[99]).is_err());
}

#[test]
fn test_strategy_override_replaces_logged_strategy() {
    let engine = engine().with_strategy(Strategy::Pathfinder);
    let entries = engine
        .load_log_file(fixture_path("safe_mismatch.jsonl"))
        .unwrap();

    let results = engine.replay_all(&entries);
    // No food on these boards, so the path follower takes the first legal move
    assert!(results
        .iter()
        .all(|r| r.reason == DecisionReason::FirstLegal));
    assert_eq!(results[0].replayed_move, Direction::Up);
}

#[test]
fn test_invalid_entries_are_skipped() {
    let engine = engine();
    let entries = engine
        .load_log_file(fixture_path("invalid_entries.jsonl"))
        .unwrap();
    assert_eq!(entries.len(), 3);

    // Turn 1 lacks our snake, turn 2 logged an unknown move
    let results = engine.replay_all(&entries);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].turn, 0);

    assert!(engine.replay_entry(&entries[1]).is_err());
    assert!(engine.replay_entry(&entries[2]).is_err());
}

#[test]
fn test_generate_stats() {
    let engine = engine();
    let entries = engine
        .load_log_file(fixture_path("safe_mismatch.jsonl"))
        .unwrap();

    let stats = engine.generate_stats(&engine.replay_all(&entries));
    assert_eq!(stats.total_turns, 2);
    assert_eq!(stats.matches, 1);
    assert_eq!(stats.mismatches, 1);
    assert_eq!(stats.match_rate, 50.0);
}

#[test]
fn test_validate_expected_moves_success() {
    let engine = engine();
    let entries = engine
        .load_log_file(fixture_path("pathfinder_food.jsonl"))
        .unwrap();

    let expected = vec![(0, vec![Direction::Up]), (2, vec![Direction::Up])];
    assert!(engine.validate_expected_moves(&entries, &expected).is_ok());
}

#[test]
fn test_validate_expected_moves_multiple_acceptable() {
    let engine = engine();
    let entries = engine
        .load_log_file(fixture_path("safe_mismatch.jsonl"))
        .unwrap();

    let expected = vec![(3, vec![Direction::Up, Direction::Right])];
    assert!(engine.validate_expected_moves(&entries, &expected).is_ok());
}

#[test]
fn test_validate_expected_moves_failure() {
    let engine = engine();
    let entries = engine
        .load_log_file(fixture_path("safe_mismatch.jsonl"))
        .unwrap();

    let err = engine
        .validate_expected_moves(&entries, &[(3, vec![Direction::Up])])
        .unwrap_err();
    assert!(err.contains("Turn 3"));

    assert!(engine
        .validate_expected_moves(&entries, &[(42, vec![Direction::Up])])
        .is_err());
}

#[test]
fn test_load_nonexistent_file() {
    let result = engine().load_log_file(fixture_path("does_not_exist.jsonl"));
    assert!(result.is_err());
    assert!(result.unwrap_err().contains("Failed to open log file"));
}

#[test]
fn test_load_malformed_line_reports_line_number() {
    let err = engine()
        .load_log_file(fixture_path("malformed.jsonl"))
        .unwrap_err();
    assert!(err.contains("line 2"), "unexpected error: {}", err);
}

#[test]
fn test_replay_empty_entries() {
    let engine = engine();
    let results = engine.replay_all(&[]);
    assert!(results.is_empty());

    let stats = engine.generate_stats(&results);
    assert_eq!(stats.total_turns, 0);
    assert_eq!(stats.match_rate, 0.0);
}
