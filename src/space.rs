// Space estimation via bounded flood fill
//
// The count of reachable free cells is a proxy for room to maneuver; a small
// number means the move probably leads into a dead end.

use std::collections::{HashSet, VecDeque};

use crate::types::{Bounds, Coord};

/// Counts cells reachable from `start` over 4-connected free cells
///
/// Stops after `limit` cells have been visited, so on large open boards the
/// result saturates at `limit`. Returns 0 when `start` itself is blocked or
/// out of bounds.
///
/// # Arguments
/// * `start` - Cell to flood from (counts as the first visited cell)
/// * `blocked` - Cells that cannot be entered
/// * `bounds` - Board extent
/// * `limit` - Exploration cap
pub fn flood_fill_size(
    start: Coord,
    blocked: &HashSet<Coord>,
    bounds: Bounds,
    limit: usize,
) -> usize {
    if blocked.contains(&start) || !bounds.contains(&start) {
        return 0;
    }

    let mut seen = HashSet::new();
    seen.insert(start);
    let mut queue = VecDeque::new();
    queue.push_back(start);
    let mut count = 0;

    while count < limit {
        let Some(current) = queue.pop_front() else {
            break;
        };
        count += 1;

        for next in current.neighbours() {
            if bounds.contains(&next) && !blocked.contains(&next) && seen.insert(next) {
                queue.push_back(next);
            }
        }
    }

    count
}
