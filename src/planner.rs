// Turn planner: snapshot -> safe candidates -> scores -> one direction
//
// The planner is pure. It reads the snapshot and the configuration, draws
// tie-break noise from the caller's RNG, and returns a `Decision`.

use log::{debug, warn};
use rand::Rng;
use std::collections::HashSet;

use crate::config::Config;
use crate::pathfinding::shortest_path_to_any;
use crate::safety::{filter_moves, SafeMoves};
use crate::scoring::{AggressiveScorer, GreedyScorer, MoveScorer, SafeScorer, Strategy, TurnContext};
use crate::snapshot::BoardSnapshot;
use crate::tiebreak::{select_best, ScoredMove};
use crate::types::{Coord, Direction};

/// Why a direction was returned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionReason {
    /// Highest scoring legal candidate
    Scored,
    /// First step of the shortest path to food
    PathToFood,
    /// No path to food; first legal candidate in enumeration order
    FirstLegal,
    /// Nothing was legal
    Fallback,
}

/// Result of planning one turn
#[derive(Debug, Clone)]
pub struct Decision {
    pub direction: Direction,
    pub reason: DecisionReason,
    /// Every scored candidate, empty for non-scoring outcomes
    pub scored: Vec<ScoredMove>,
}

impl Decision {
    fn unscored(direction: Direction, reason: DecisionReason) -> Self {
        Decision {
            direction,
            reason,
            scored: Vec::new(),
        }
    }

    /// Score of the chosen move, when it was scored
    pub fn score(&self) -> Option<f64> {
        self.scored
            .iter()
            .find(|m| m.direction == self.direction)
            .map(|m| m.score)
    }
}

/// Stateless per-turn planner
#[derive(Debug, Clone)]
pub struct Planner {
    config: Config,
}

impl Planner {
    pub fn new(config: Config) -> Self {
        Planner { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn strategy(&self) -> Strategy {
        self.config.planner.strategy
    }

    /// Plans one turn with the configured strategy
    ///
    /// # Arguments
    /// * `snapshot` - Validated board state for this turn
    /// * `rng` - Source for tie-break jitter; untouched under the stable policy
    pub fn plan<R: Rng>(&self, snapshot: &BoardSnapshot, rng: &mut R) -> Decision {
        self.plan_with(self.config.planner.strategy, snapshot, rng)
    }

    /// Plans one turn with an explicit strategy, ignoring the configured one
    pub fn plan_with<R: Rng>(
        &self,
        strategy: Strategy,
        snapshot: &BoardSnapshot,
        rng: &mut R,
    ) -> Decision {
        let safe = filter_moves(snapshot, &self.config.safety);

        if safe.is_empty() {
            warn!(
                "Turn {}: no legal moves, falling back to {}",
                snapshot.turn, self.config.planner.fallback_move
            );
            return Decision::unscored(self.config.planner.fallback_move, DecisionReason::Fallback);
        }

        let ctx = TurnContext::new(snapshot, &safe);
        match strategy {
            Strategy::Pathfinder => self.follow_path_to_food(snapshot, &safe),
            Strategy::Safe => {
                let scorer = SafeScorer::prepare(&self.config.safe, snapshot);
                self.select(&scorer, &ctx, rng)
            }
            Strategy::Greedy => {
                let scorer = GreedyScorer::prepare(&self.config.greedy, &ctx);
                debug!("Turn {}: greedy food target {:?}", snapshot.turn, scorer.target());
                self.select(&scorer, &ctx, rng)
            }
            Strategy::Aggressive => {
                let scorer = AggressiveScorer::prepare(&self.config.aggressive, snapshot);
                self.select(&scorer, &ctx, rng)
            }
        }
    }

    fn select<S: MoveScorer, R: Rng>(
        &self,
        scorer: &S,
        ctx: &TurnContext<'_>,
        rng: &mut R,
    ) -> Decision {
        let scored: Vec<ScoredMove> = ctx
            .safe
            .candidates
            .iter()
            .map(|candidate| ScoredMove {
                direction: candidate.direction,
                score: scorer.score(ctx, candidate),
                jitter: self.config.tie_break.jitter(rng),
            })
            .collect();

        for m in &scored {
            debug!(
                "Turn {}: {} scored {:.3} (+{:.4} jitter)",
                ctx.snapshot.turn, m.direction, m.score, m.jitter
            );
        }

        match select_best(&scored).map(|best| best.direction) {
            Some(direction) => Decision {
                direction,
                reason: DecisionReason::Scored,
                scored,
            },
            None => Decision::unscored(self.config.planner.fallback_move, DecisionReason::Fallback),
        }
    }

    /// Takes the first step of the shortest path to any food, respecting
    /// contested head cells along the way
    fn follow_path_to_food(&self, snapshot: &BoardSnapshot, safe: &SafeMoves) -> Decision {
        let head = snapshot.you().head();
        let targets: HashSet<Coord> = snapshot.food.iter().copied().collect();
        let blocked = safe.blocked_with_contested();
        // at least one pop per board cell
        let limit = self.config.pathfinder.max_nodes.max(snapshot.bounds.area());

        let step = shortest_path_to_any(head, &targets, &blocked, snapshot.bounds, limit)
            .and_then(|path| path.first().copied())
            .and_then(|next| Direction::between(&head, &next))
            .filter(|dir| safe.contains(*dir));

        match step {
            Some(direction) => Decision::unscored(direction, DecisionReason::PathToFood),
            None => {
                // safe is non-empty here
                let direction = safe
                    .candidates
                    .first()
                    .map(|c| c.direction)
                    .unwrap_or(self.config.planner.fallback_move);
                Decision::unscored(direction, DecisionReason::FirstLegal)
            }
        }
    }
}
