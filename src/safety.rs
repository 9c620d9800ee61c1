// Safety filter: which of the four moves are legal this turn
//
// Rules, in order:
// 1. never reverse into the neck
// 2. stay on the board
// 3. never enter a body cell (our own un-stacked tail is about to move away)
// 4. when we are not strictly the longest, avoid every cell an opponent head
//    could also step into

use std::collections::HashSet;

use crate::config::SafetyConfig;
use crate::snapshot::BoardSnapshot;
use crate::types::{Coord, Direction};

/// A legal direction together with the cell it leads to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub direction: Direction,
    pub cell: Coord,
}

/// Output of the safety filter
///
/// `blocked` is the occupancy set the later stages flood and search over;
/// `contested` holds the cells excluded by the head-collision rule (empty
/// when the rule does not apply).
#[derive(Debug, Clone)]
pub struct SafeMoves {
    pub candidates: Vec<Candidate>,
    pub blocked: HashSet<Coord>,
    pub contested: HashSet<Coord>,
}

impl SafeMoves {
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn contains(&self, direction: Direction) -> bool {
        self.candidates.iter().any(|c| c.direction == direction)
    }

    /// Blocked cells plus contested cells, for searches that must respect
    /// the head-collision rule beyond the first step
    pub fn blocked_with_contested(&self) -> HashSet<Coord> {
        self.blocked.union(&self.contested).copied().collect()
    }
}

/// Runs all four rules and returns the surviving candidates in
/// `Direction::all()` order
pub fn filter_moves(snapshot: &BoardSnapshot, config: &SafetyConfig) -> SafeMoves {
    let you = snapshot.you();
    let head = you.head();
    let reverse = you
        .neck()
        .and_then(|neck| Direction::between(&head, &neck));

    let blocked = blocked_cells(snapshot, config);
    let contested = if config.avoid_contested_heads && head_to_head_is_risky(snapshot) {
        contested_cells(snapshot)
    } else {
        HashSet::new()
    };

    let candidates = Direction::all()
        .into_iter()
        .filter(|dir| Some(*dir) != reverse)
        .map(|direction| Candidate {
            direction,
            cell: direction.apply(&head),
        })
        .filter(|c| snapshot.in_bounds(&c.cell))
        .filter(|c| !blocked.contains(&c.cell))
        .filter(|c| !contested.contains(&c.cell))
        .collect();

    SafeMoves {
        candidates,
        blocked,
        contested,
    }
}

/// Every body cell on the board, minus our own tail when it will vacate
pub fn blocked_cells(snapshot: &BoardSnapshot, config: &SafetyConfig) -> HashSet<Coord> {
    let mut blocked = snapshot.occupied_cells();
    let you = snapshot.you();

    if !(config.stacked_tail_blocks && you.tail_is_stacked()) {
        blocked.remove(&you.tail());
    }

    blocked
}

/// True when we are no longer than the largest opponent, so a shared cell
/// would be a tie or a loss
pub fn head_to_head_is_risky(snapshot: &BoardSnapshot) -> bool {
    snapshot
        .largest_opponent_length()
        .is_some_and(|largest| snapshot.you().length() <= largest)
}

/// In-bounds cells one step from any opponent head
pub fn contested_cells(snapshot: &BoardSnapshot) -> HashSet<Coord> {
    snapshot
        .opponents()
        .flat_map(|s| s.head().neighbours())
        .filter(|c| snapshot.in_bounds(c))
        .collect()
}
