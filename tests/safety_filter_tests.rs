// Integration tests for the safety filter
//
// Each rule is exercised in isolation on hand-built boards:
// reversal, bounds, occupancy (with the tail exceptions) and head-to-head avoidance.

use battlesnake_planner::config::{Config, SafetyConfig};
use battlesnake_planner::safety::{contested_cells, filter_moves, head_to_head_is_risky};
use battlesnake_planner::snapshot::BoardSnapshot;
use battlesnake_planner::types::{Battlesnake, Board, Coord, Direction};

fn snake(id: &str, body: &[(i32, i32)]) -> Battlesnake {
    let body: Vec<Coord> = body.iter().map(|&(x, y)| Coord::new(x, y)).collect();
    Battlesnake {
        id: id.to_string(),
        name: id.to_string(),
        health: 90,
        head: body[0],
        length: body.len() as i32,
        body,
        latency: "0".to_string(),
        shout: None,
    }
}

fn board(snakes: Vec<Battlesnake>) -> Board {
    Board {
        height: 11,
        width: 11,
        food: vec![],
        snakes,
        hazards: vec![],
    }
}

fn safety() -> SafetyConfig {
    Config::default_hardcoded().safety
}

fn directions(b: &Board, config: &SafetyConfig) -> Vec<Direction> {
    let snapshot = BoardSnapshot::from_board(0, b, "me").expect("valid board");
    filter_moves(&snapshot, config)
        .candidates
        .iter()
        .map(|c| c.direction)
        .collect()
}

#[test]
fn test_reversal_into_neck_is_excluded() {
    let b = board(vec![snake("me", &[(5, 5), (4, 5), (3, 5)])]);
    let dirs = directions(&b, &safety());
    assert_eq!(dirs, vec![Direction::Up, Direction::Down, Direction::Right]);
}

#[test]
fn test_corner_with_neck_to_the_right() {
    // Head at (0,0), neck at (1,0): right reverses, left and down leave the board
    let b = board(vec![snake("me", &[(0, 0), (1, 0), (2, 0)])]);
    let dirs = directions(&b, &safety());
    assert!(!dirs.contains(&Direction::Left));
    assert!(!dirs.contains(&Direction::Right));
    assert_eq!(dirs, vec![Direction::Up]);
}

#[test]
fn test_single_segment_snake_has_no_reversal_rule() {
    let b = board(vec![snake("me", &[(5, 5)])]);
    assert_eq!(directions(&b, &safety()), Direction::all().to_vec());
}

#[test]
fn test_bounds_rule_at_top_right_corner() {
    let b = board(vec![snake("me", &[(10, 10), (10, 9)])]);
    assert_eq!(directions(&b, &safety()), vec![Direction::Left]);
}

#[test]
fn test_opponent_body_is_blocked() {
    let b = board(vec![
        snake("me", &[(5, 5), (5, 4), (5, 3)]),
        snake("enemy", &[(8, 8), (8, 7), (7, 7), (6, 7), (6, 6), (6, 5), (6, 4)]),
    ]);
    let dirs = directions(&b, &safety());
    assert!(!dirs.contains(&Direction::Right), "(6,5) is enemy body");
    assert_eq!(dirs, vec![Direction::Up, Direction::Left]);
}

#[test]
fn test_opponent_tail_stays_blocked() {
    // Enemy tail at (4,5) is not treated as vacating
    let b = board(vec![
        snake("me", &[(5, 5), (5, 4), (5, 3)]),
        snake("enemy", &[(1, 1), (2, 1), (3, 1), (3, 2), (3, 3), (3, 4), (4, 4), (4, 5)]),
    ]);
    assert!(!directions(&b, &safety()).contains(&Direction::Left));
}

#[test]
fn test_own_tail_vacates_when_not_stacked() {
    let b = board(vec![snake("me", &[(5, 5), (5, 4), (4, 4), (4, 5)])]);
    let dirs = directions(&b, &safety());
    assert_eq!(dirs, vec![Direction::Up, Direction::Left, Direction::Right]);
}

#[test]
fn test_stacked_tail_stays_blocked() {
    let b = board(vec![snake("me", &[(5, 5), (5, 4), (4, 4), (4, 5), (4, 5)])]);
    let dirs = directions(&b, &safety());
    assert!(!dirs.contains(&Direction::Left));

    // The unconditional approximation frees it again
    let mut config = safety();
    config.stacked_tail_blocks = false;
    assert!(directions(&b, &config).contains(&Direction::Left));
}

#[test]
fn test_head_to_head_avoided_at_equal_length() {
    let b = board(vec![
        snake("me", &[(5, 5), (5, 4), (5, 3)]),
        snake("enemy", &[(7, 5), (8, 5), (9, 5)]),
    ]);
    let snapshot = BoardSnapshot::from_board(0, &b, "me").unwrap();
    assert!(head_to_head_is_risky(&snapshot));

    let contested = contested_cells(&snapshot);
    assert!(contested.contains(&Coord::new(6, 5)));
    assert!(contested.contains(&Coord::new(7, 6)));
    assert!(!contested.contains(&Coord::new(5, 6)), "own head neighbours are not contested");

    assert_eq!(directions(&b, &safety()), vec![Direction::Up, Direction::Left]);
}

#[test]
fn test_head_to_head_allowed_when_strictly_longer() {
    let b = board(vec![
        snake("me", &[(5, 5), (5, 4), (5, 3)]),
        snake("enemy", &[(7, 5), (8, 5)]),
    ]);
    assert_eq!(
        directions(&b, &safety()),
        vec![Direction::Up, Direction::Left, Direction::Right]
    );
}

#[test]
fn test_head_to_head_rule_can_be_disabled() {
    let b = board(vec![
        snake("me", &[(5, 5), (5, 4), (5, 3)]),
        snake("enemy", &[(7, 5), (8, 5), (9, 5), (10, 5)]),
    ]);
    let mut config = safety();
    config.avoid_contested_heads = false;
    assert!(directions(&b, &config).contains(&Direction::Right));
}

#[test]
fn test_no_opponents_means_no_contested_cells() {
    let b = board(vec![snake("me", &[(5, 5), (5, 4)])]);
    let snapshot = BoardSnapshot::from_board(0, &b, "me").unwrap();
    assert!(!head_to_head_is_risky(&snapshot));
    assert!(filter_moves(&snapshot, &safety()).contested.is_empty());
}

#[test]
fn test_completely_boxed_in_yields_nothing() {
    // Own body wraps the head; the enemy closes the last gap
    let b = board(vec![
        snake("me", &[(5, 5), (5, 4), (4, 4), (4, 5), (4, 6), (5, 6), (5, 6)]),
        snake("enemy", &[(6, 5), (7, 5), (8, 5)]),
    ]);
    let snapshot = BoardSnapshot::from_board(0, &b, "me").unwrap();
    assert!(filter_moves(&snapshot, &safety()).is_empty());
}
