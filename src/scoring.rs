// Move scoring strategies
//
// Each strategy prepares whatever it needs once per turn (food target, prey)
// and then scores every legal candidate independently. Higher is better.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::config::{AggressiveConfig, GreedyConfig, SafeConfig};
use crate::pathfinding::{bfs_distance, manhattan};
use crate::safety::{Candidate, SafeMoves};
use crate::snapshot::{BoardSnapshot, Snake};
use crate::space::flood_fill_size;
use crate::types::Coord;

/// Distance used when there is no opponent to compare against
const UNCONTESTED_DISTANCE: i32 = 1_000_000;

/// Which decision function drives the snake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Walk the shortest path to the nearest food, no scoring
    Pathfinder,
    /// Maximise room, eat when hungry
    Safe,
    /// Race for food we can reach first
    Greedy,
    /// Hunt smaller snakes, trap, hold the center
    Aggressive,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Pathfinder => "pathfinder",
            Strategy::Safe => "safe",
            Strategy::Greedy => "greedy",
            Strategy::Aggressive => "aggressive",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pathfinder" => Ok(Strategy::Pathfinder),
            "safe" => Ok(Strategy::Safe),
            "greedy" => Ok(Strategy::Greedy),
            "aggressive" => Ok(Strategy::Aggressive),
            _ => Err(format!("Invalid strategy: {}", s)),
        }
    }
}

/// Read-only inputs shared by every scorer for one turn
#[derive(Debug, Clone, Copy)]
pub struct TurnContext<'a> {
    pub snapshot: &'a BoardSnapshot,
    pub safe: &'a SafeMoves,
}

impl<'a> TurnContext<'a> {
    pub fn new(snapshot: &'a BoardSnapshot, safe: &'a SafeMoves) -> Self {
        TurnContext { snapshot, safe }
    }

    fn space_from(&self, cell: Coord, limit: usize) -> usize {
        flood_fill_size(cell, &self.safe.blocked, self.snapshot.bounds, limit)
    }
}

/// Scores a single legal candidate
pub trait MoveScorer {
    fn score(&self, ctx: &TurnContext<'_>, candidate: &Candidate) -> f64;
}

/// Closest food by Manhattan distance; the first one listed wins ties
pub fn nearest_food(head: Coord, foods: &[Coord]) -> Option<Coord> {
    foods.iter().copied().min_by_key(|f| manhattan(head, *f))
}

/// Food we are strictly closer to than every opponent head
///
/// The closest winnable food is preferred; when none is winnable the nearest
/// food overall is returned instead.
pub fn select_food_target(head: Coord, foods: &[Coord], opponent_heads: &[Coord]) -> Option<Coord> {
    let winnable = foods
        .iter()
        .copied()
        .filter(|f| manhattan(head, *f) < closest_opponent_distance(*f, opponent_heads))
        .min_by_key(|f| manhattan(head, *f));

    winnable.or_else(|| nearest_food(head, foods))
}

fn closest_opponent_distance(cell: Coord, opponent_heads: &[Coord]) -> i32 {
    opponent_heads
        .iter()
        .map(|h| manhattan(*h, cell))
        .min()
        .unwrap_or(UNCONTESTED_DISTANCE)
}

/// Flood-fill space plus a Manhattan food pull while hungry
#[derive(Debug)]
pub struct SafeScorer<'a> {
    config: &'a SafeConfig,
    head: Coord,
    food_target: Option<Coord>,
}

impl<'a> SafeScorer<'a> {
    pub fn prepare(config: &'a SafeConfig, snapshot: &BoardSnapshot) -> Self {
        let you = snapshot.you();
        let hungry = you.health <= config.hunger_threshold;
        let food_target = if hungry {
            nearest_food(you.head(), &snapshot.food)
        } else {
            None
        };

        SafeScorer {
            config,
            head: you.head(),
            food_target,
        }
    }
}

impl MoveScorer for SafeScorer<'_> {
    fn score(&self, ctx: &TurnContext<'_>, candidate: &Candidate) -> f64 {
        let space = ctx.space_from(candidate.cell, self.config.space_limit) as f64;

        let toward = self.food_target.map_or(0.0, |target| {
            (manhattan(self.head, target) - manhattan(candidate.cell, target)) as f64
        });

        space * self.config.space_weight + toward * self.config.food_weight
    }
}

/// BFS food pursuit toward winnable food, mild cramped-space penalty
#[derive(Debug)]
pub struct GreedyScorer<'a> {
    config: &'a GreedyConfig,
    target: Option<Coord>,
    opponent_heads: Vec<Coord>,
    /// BFS distance head -> target, computed once per turn
    current_distance: Option<usize>,
}

impl<'a> GreedyScorer<'a> {
    pub fn prepare(config: &'a GreedyConfig, ctx: &TurnContext<'_>) -> Self {
        let snapshot = ctx.snapshot;
        let head = snapshot.you().head();
        let opponent_heads: Vec<Coord> = snapshot.opponents().map(Snake::head).collect();
        let target = select_food_target(head, &snapshot.food, &opponent_heads);
        let current_distance = target.and_then(|t| {
            bfs_distance(head, t, &ctx.safe.blocked, snapshot.bounds, config.space_limit)
        });

        GreedyScorer {
            config,
            target,
            opponent_heads,
            current_distance,
        }
    }

    pub fn target(&self) -> Option<Coord> {
        self.target
    }
}

impl MoveScorer for GreedyScorer<'_> {
    fn score(&self, ctx: &TurnContext<'_>, candidate: &Candidate) -> f64 {
        let cfg = self.config;
        let space = ctx.space_from(candidate.cell, cfg.space_limit);

        let mut food_score = 0.0;
        let mut bonus = 0.0;
        if let Some(target) = self.target {
            let next_distance = bfs_distance(
                candidate.cell,
                target,
                &ctx.safe.blocked,
                ctx.snapshot.bounds,
                cfg.space_limit,
            );
            food_score = match (self.current_distance, next_distance) {
                (Some(now), Some(next)) => (now as f64 - next as f64) * cfg.food_weight,
                (None, Some(_)) => cfg.newly_reachable_multiplier * cfg.food_weight,
                _ => 0.0,
            };

            if manhattan(candidate.cell, target)
                < closest_opponent_distance(target, &self.opponent_heads)
            {
                bonus += cfg.winnable_food_bonus;
            }
        }

        let cramped_penalty = if space < cfg.cramped_space_threshold {
            (cfg.cramped_space_threshold - space) as f64 * cfg.cramped_space_weight
        } else {
            0.0
        };

        food_score + bonus - cramped_penalty
    }
}

/// Space, hunger, hunting, trapping and a small center pull
#[derive(Debug)]
pub struct AggressiveScorer<'a> {
    config: &'a AggressiveConfig,
    head: Coord,
    length: usize,
    food_target: Option<Coord>,
    /// Nearest opponent by head distance
    prey: Option<&'a Snake>,
}

impl<'a> AggressiveScorer<'a> {
    pub fn prepare(config: &'a AggressiveConfig, snapshot: &'a BoardSnapshot) -> Self {
        let you = snapshot.you();
        let head = you.head();
        let food_target = if you.health <= config.hunger_threshold {
            nearest_food(head, &snapshot.food)
        } else {
            None
        };
        let prey = snapshot
            .opponents()
            .min_by_key(|s| manhattan(head, s.head()));

        AggressiveScorer {
            config,
            head,
            length: you.length(),
            food_target,
            prey,
        }
    }

    fn attack_score(&self, cell: Coord) -> f64 {
        let cfg = self.config;
        let Some(prey) = self.prey else {
            return 0.0;
        };
        if self.length <= prey.length() {
            return 0.0;
        }

        let target = prey.head();
        let closing = (manhattan(self.head, target) - manhattan(cell, target)) as f64;
        let mut score = closing * cfg.approach_weight * cfg.aggression;

        if manhattan(cell, target) == 1 {
            score += cfg.adjacent_kill_bonus * cfg.aggression;
        }
        score
    }

    /// Bonus for every nearby opponent whose best escape shrinks below the
    /// trap threshold once we occupy `cell`
    fn trap_score(&self, ctx: &TurnContext<'_>, cell: Coord) -> f64 {
        let cfg = self.config;
        let bounds = ctx.snapshot.bounds;
        let nearby: Vec<&Snake> = ctx
            .snapshot
            .opponents()
            .filter(|opp| manhattan(opp.head(), cell) <= cfg.trap_radius)
            .collect();
        if nearby.is_empty() {
            return 0.0;
        }

        let mut sim_blocked = ctx.safe.blocked.clone();
        sim_blocked.insert(cell);

        let mut score = 0.0;
        for opp in nearby {
            let min_space = opp
                .head()
                .neighbours()
                .into_iter()
                .filter(|c| bounds.contains(c) && !sim_blocked.contains(c))
                .map(|c| flood_fill_size(c, &sim_blocked, bounds, cfg.space_limit))
                .min();

            if min_space.is_some_and(|space| space < cfg.trap_space_threshold) {
                let size_diff = (self.length as i64 - opp.length() as i64).max(0) as f64;
                score += (cfg.trap_base_bonus + size_diff * cfg.trap_size_advantage_weight)
                    * cfg.aggression;
            }
        }
        score
    }

    fn center_bias(&self, ctx: &TurnContext<'_>, cell: Coord) -> f64 {
        let (cx, cy) = ctx.snapshot.bounds.center();
        let dist = |c: Coord| (c.x as f64 - cx).abs() + (c.y as f64 - cy).abs();
        (dist(self.head) - dist(cell)) * self.config.center_bias_weight
    }
}

impl MoveScorer for AggressiveScorer<'_> {
    fn score(&self, ctx: &TurnContext<'_>, candidate: &Candidate) -> f64 {
        let cfg = self.config;
        let cell = candidate.cell;
        let space = ctx.space_from(cell, cfg.space_limit) as f64;

        let food_score = self.food_target.map_or(0.0, |target| {
            (manhattan(self.head, target) - manhattan(cell, target)) as f64 * cfg.food_weight
        });

        space * cfg.space_weight
            + food_score
            + self.attack_score(cell)
            + self.trap_score(ctx, cell)
            + self.center_bias(ctx, cell)
    }
}
