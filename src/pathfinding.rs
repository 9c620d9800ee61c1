// Bounded shortest-path search
//
// All edges cost one step, so the Dijkstra search below visits cells in the
// same order a BFS would. Both are kept: `bfs_distance` answers "how far to
// this cell", `shortest_path_to_any` answers "which way to the nearest target".

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, HashSet, VecDeque};

use crate::types::{Bounds, Coord};

/// Calculates Manhattan distance between two coordinates
pub fn manhattan(a: Coord, b: Coord) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

/// Shortest hop count from `start` to `target` over free cells
///
/// The start cell is not checked against `blocked`; it is usually the
/// snake's own head. Returns `None` when the target is blocked or off the
/// board, or when `limit` cells have been expanded without reaching it.
pub fn bfs_distance(
    start: Coord,
    target: Coord,
    blocked: &HashSet<Coord>,
    bounds: Bounds,
    limit: usize,
) -> Option<usize> {
    if blocked.contains(&target) || !bounds.contains(&target) {
        return None;
    }
    if start == target {
        return Some(0);
    }

    let mut seen = HashSet::new();
    seen.insert(start);
    let mut queue = VecDeque::new();
    queue.push_back((start, 0usize));
    let mut expanded = 0;

    while expanded < limit {
        let (current, dist) = queue.pop_front()?;

        for next in current.neighbours() {
            if !bounds.contains(&next) || blocked.contains(&next) || !seen.insert(next) {
                continue;
            }
            if next == target {
                return Some(dist + 1);
            }
            queue.push_back((next, dist + 1));
        }
        expanded += 1;
    }

    None
}

/// Uniform-cost search from `start` to the closest cell in `targets`
///
/// Returns the path excluding `start`, ending on the reached target. The
/// start cell never counts as a target. Equal-length paths are resolved by
/// discovery order under the fixed neighbour order.
///
/// # Arguments
/// * `start` - Search origin (not checked against `blocked`)
/// * `targets` - Goal cells, typically food
/// * `blocked` - Cells that cannot be entered
/// * `bounds` - Board extent
/// * `limit` - Maximum number of cells popped from the frontier
pub fn shortest_path_to_any(
    start: Coord,
    targets: &HashSet<Coord>,
    blocked: &HashSet<Coord>,
    bounds: Bounds,
    limit: usize,
) -> Option<Vec<Coord>> {
    if targets.is_empty() {
        return None;
    }

    let mut distances: HashMap<Coord, usize> = HashMap::new();
    let mut came_from: HashMap<Coord, Coord> = HashMap::new();
    // (distance, discovery sequence, cell); the sequence keeps pops FIFO among equals
    let mut frontier = BinaryHeap::new();
    let mut sequence: u64 = 0;

    distances.insert(start, 0);
    frontier.push(Reverse((0usize, sequence, start)));
    let mut popped = 0;

    while let Some(Reverse((dist, _, current))) = frontier.pop() {
        if popped >= limit {
            break;
        }
        popped += 1;

        if distances.get(&current).is_some_and(|&best| dist > best) {
            continue;
        }

        if current != start && targets.contains(&current) {
            return Some(reconstruct_path(&came_from, start, current));
        }

        for next in current.neighbours() {
            if !bounds.contains(&next) || blocked.contains(&next) {
                continue;
            }
            let candidate = dist + 1;
            if distances.get(&next).map_or(true, |&best| candidate < best) {
                distances.insert(next, candidate);
                came_from.insert(next, current);
                sequence += 1;
                frontier.push(Reverse((candidate, sequence, next)));
            }
        }
    }

    None
}

fn reconstruct_path(came_from: &HashMap<Coord, Coord>, start: Coord, goal: Coord) -> Vec<Coord> {
    let mut path = vec![goal];
    let mut current = goal;
    while let Some(&prev) = came_from.get(&current) {
        if prev == start {
            break;
        }
        path.push(prev);
        current = prev;
    }
    path.reverse();
    path
}
