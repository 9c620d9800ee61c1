// Typed, validated view of a single turn
//
// The wire types in `types` mirror the JSON the game server sends. Everything
// downstream of the HTTP boundary works on a `BoardSnapshot` instead, which is
// checked once here so the planner never has to re-validate its input.

use std::collections::HashSet;
use std::fmt;

use crate::types::{Board, Bounds, Coord};

/// Maximum health a snake can have
pub const MAX_HEALTH: u8 = 100;

/// Reasons a game state cannot be turned into a `BoardSnapshot`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    /// Width or height is not positive
    InvalidDimensions { width: i32, height: i32 },
    /// Turn counter is negative
    NegativeTurn(i32),
    /// The planner's own snake is not on the board
    MissingOwnSnake(String),
    /// A snake has no body segments at all
    EmptyBody(String),
    /// A snake's `head` field disagrees with `body[0]`
    HeadMismatch(String),
    /// A snake's `length` field disagrees with its body
    LengthMismatch {
        id: String,
        length: i32,
        body_len: usize,
    },
    /// Health outside 0..=100
    HealthOutOfRange { id: String, health: i32 },
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotError::InvalidDimensions { width, height } => {
                write!(f, "invalid board dimensions {}x{}", width, height)
            }
            SnapshotError::NegativeTurn(turn) => write!(f, "negative turn number {}", turn),
            SnapshotError::MissingOwnSnake(id) => {
                write!(f, "own snake '{}' not found on the board", id)
            }
            SnapshotError::EmptyBody(id) => write!(f, "snake '{}' has an empty body", id),
            SnapshotError::HeadMismatch(id) => {
                write!(f, "snake '{}' head does not match its first body segment", id)
            }
            SnapshotError::LengthMismatch {
                id,
                length,
                body_len,
            } => write!(
                f,
                "snake '{}' reports length {} but has {} body segments",
                id, length, body_len
            ),
            SnapshotError::HealthOutOfRange { id, health } => {
                write!(f, "snake '{}' has health {} outside 0..=100", id, health)
            }
        }
    }
}

impl std::error::Error for SnapshotError {}

/// A snake as seen by the planner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    pub id: String,
    /// Head first, tail last; never empty
    body: Vec<Coord>,
    pub health: u8,
    pub is_you: bool,
}

impl Snake {
    pub fn body(&self) -> &[Coord] {
        &self.body
    }

    pub fn head(&self) -> Coord {
        self.body[0]
    }

    /// Second segment, present once the snake has length >= 2
    pub fn neck(&self) -> Option<Coord> {
        self.body.get(1).copied()
    }

    pub fn tail(&self) -> Coord {
        self.body[self.body.len() - 1]
    }

    pub fn length(&self) -> usize {
        self.body.len()
    }

    /// True when the last two segments share a cell, which happens right
    /// after eating: the tail will not move on the next turn.
    pub fn tail_is_stacked(&self) -> bool {
        let n = self.body.len();
        n >= 2 && self.body[n - 1] == self.body[n - 2]
    }
}

/// Immutable board state for one turn
#[derive(Debug, Clone)]
pub struct BoardSnapshot {
    pub turn: u32,
    pub bounds: Bounds,
    pub food: Vec<Coord>,
    /// Our snake is always `snakes[you_index]`
    pub snakes: Vec<Snake>,
    you_index: usize,
}

impl BoardSnapshot {
    /// Builds a snapshot from the board, identifying our snake by id
    pub fn from_board(turn: i32, board: &Board, you_id: &str) -> Result<Self, SnapshotError> {
        if board.width <= 0 || board.height <= 0 {
            return Err(SnapshotError::InvalidDimensions {
                width: board.width,
                height: board.height,
            });
        }
        if turn < 0 {
            return Err(SnapshotError::NegativeTurn(turn));
        }

        let mut snakes = Vec::with_capacity(board.snakes.len());
        let mut you_index = None;

        for (index, raw) in board.snakes.iter().enumerate() {
            let Some(&first) = raw.body.first() else {
                return Err(SnapshotError::EmptyBody(raw.id.clone()));
            };
            if first != raw.head {
                return Err(SnapshotError::HeadMismatch(raw.id.clone()));
            }
            if raw.length < 0 || raw.length as usize != raw.body.len() {
                return Err(SnapshotError::LengthMismatch {
                    id: raw.id.clone(),
                    length: raw.length,
                    body_len: raw.body.len(),
                });
            }
            let health = u8::try_from(raw.health)
                .ok()
                .filter(|h| *h <= MAX_HEALTH)
                .ok_or_else(|| SnapshotError::HealthOutOfRange {
                    id: raw.id.clone(),
                    health: raw.health,
                })?;

            let is_you = raw.id == you_id;
            if is_you {
                you_index = Some(index);
            }

            snakes.push(Snake {
                id: raw.id.clone(),
                body: raw.body.clone(),
                health,
                is_you,
            });
        }

        let you_index = you_index.ok_or_else(|| SnapshotError::MissingOwnSnake(you_id.to_string()))?;

        Ok(BoardSnapshot {
            turn: turn as u32,
            bounds: Bounds::new(board.width, board.height),
            food: board.food.clone(),
            snakes,
            you_index,
        })
    }

    pub fn you(&self) -> &Snake {
        &self.snakes[self.you_index]
    }

    pub fn opponents(&self) -> impl Iterator<Item = &Snake> {
        self.snakes.iter().filter(|s| !s.is_you)
    }

    pub fn largest_opponent_length(&self) -> Option<usize> {
        self.opponents().map(Snake::length).max()
    }

    pub fn in_bounds(&self, coord: &Coord) -> bool {
        self.bounds.contains(coord)
    }

    /// Union of every snake's body cells
    pub fn occupied_cells(&self) -> HashSet<Coord> {
        self.snakes
            .iter()
            .flat_map(|s| s.body.iter().copied())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Battlesnake;

    fn raw_snake(id: &str, body: &[(i32, i32)]) -> Battlesnake {
        let body: Vec<Coord> = body.iter().map(|&(x, y)| Coord::new(x, y)).collect();
        Battlesnake {
            id: id.to_string(),
            name: id.to_string(),
            health: 80,
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
            food: vec![Coord::new(3, 3)],
            snakes,
            hazards: vec![],
        }
    }

    #[test]
    fn test_valid_board_marks_own_snake() {
        let b = board(vec![
            raw_snake("enemy", &[(8, 8), (8, 7)]),
            raw_snake("me", &[(1, 1), (1, 0), (0, 0)]),
        ]);
        let snap = BoardSnapshot::from_board(4, &b, "me").unwrap();

        assert_eq!(snap.turn, 4);
        assert_eq!(snap.you().id, "me");
        assert_eq!(snap.you().length(), 3);
        assert_eq!(snap.opponents().count(), 1);
        assert_eq!(snap.largest_opponent_length(), Some(2));
    }

    #[test]
    fn test_validated_body_is_exposed_read_only() {
        let b = board(vec![raw_snake("me", &[(1, 1), (1, 0), (0, 0), (0, 0)])]);
        let snap = BoardSnapshot::from_board(0, &b, "me").unwrap();
        let me = snap.you();

        assert_eq!(
            me.body(),
            &[Coord::new(1, 1), Coord::new(1, 0), Coord::new(0, 0), Coord::new(0, 0)]
        );
        assert_eq!(me.head(), me.body()[0]);
        assert_eq!(me.tail(), Coord::new(0, 0));
        assert!(me.tail_is_stacked());
    }

    #[test]
    fn test_missing_own_snake_is_rejected() {
        let b = board(vec![raw_snake("enemy", &[(8, 8)])]);
        let err = BoardSnapshot::from_board(0, &b, "me").unwrap_err();
        assert_eq!(err, SnapshotError::MissingOwnSnake("me".to_string()));
    }

    #[test]
    fn test_length_mismatch_is_rejected() {
        let mut me = raw_snake("me", &[(1, 1), (1, 0)]);
        me.length = 5;
        let err = BoardSnapshot::from_board(0, &board(vec![me]), "me").unwrap_err();
        assert!(matches!(err, SnapshotError::LengthMismatch { length: 5, body_len: 2, .. }));
    }

    #[test]
    fn test_head_mismatch_is_rejected() {
        let mut me = raw_snake("me", &[(1, 1), (1, 0)]);
        me.head = Coord::new(4, 4);
        let err = BoardSnapshot::from_board(0, &board(vec![me]), "me").unwrap_err();
        assert_eq!(err, SnapshotError::HeadMismatch("me".to_string()));
    }

    #[test]
    fn test_health_out_of_range_is_rejected() {
        let mut me = raw_snake("me", &[(1, 1)]);
        me.health = 101;
        let err = BoardSnapshot::from_board(0, &board(vec![me]), "me").unwrap_err();
        assert!(matches!(err, SnapshotError::HealthOutOfRange { health: 101, .. }));
    }

    #[test]
    fn test_empty_body_and_bad_dimensions_are_rejected() {
        let mut me = raw_snake("me", &[(1, 1)]);
        me.body.clear();
        me.length = 0;
        let err = BoardSnapshot::from_board(0, &board(vec![me]), "me").unwrap_err();
        assert_eq!(err, SnapshotError::EmptyBody("me".to_string()));

        let mut b = board(vec![raw_snake("me", &[(0, 0)])]);
        b.width = 0;
        assert!(matches!(
            BoardSnapshot::from_board(0, &b, "me"),
            Err(SnapshotError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_stacked_tail_detection() {
        let b = board(vec![raw_snake("me", &[(2, 2), (2, 1), (2, 0), (2, 0)])]);
        let snap = BoardSnapshot::from_board(0, &b, "me").unwrap();
        assert!(snap.you().tail_is_stacked());
        assert_eq!(snap.you().neck(), Some(Coord::new(2, 1)));
    }
}
