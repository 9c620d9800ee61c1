// Battlesnake bot: the object behind the HTTP endpoints
//
// The bot owns the planner and the debug logger. Each move request is
// validated into a `BoardSnapshot` and planned independently; nothing is
// carried from one turn to the next.

use log::{info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::{json, Value};

use crate::config::Config;
use crate::debug_logger::DebugLogger;
use crate::planner::{Decision, Planner};
use crate::snapshot::BoardSnapshot;
use crate::types::{Battlesnake, Board, Game};

/// Battlesnake Bot with OOP-style API
/// Takes static configuration dependencies and exposes methods corresponding to API endpoints
#[derive(Debug)]
pub struct Bot {
    planner: Planner,
    logger: DebugLogger,
}

impl Bot {
    /// Creates a new Bot instance with debug logging disabled
    ///
    /// # Arguments
    /// * `config` - Static configuration that does not change during the bot's lifetime
    pub fn new(config: Config) -> Self {
        Self::with_logger(config, DebugLogger::disabled())
    }

    pub fn with_logger(config: Config, logger: DebugLogger) -> Self {
        Bot {
            planner: Planner::new(config),
            logger,
        }
    }

    /// Returns bot metadata and appearance
    /// Corresponds to GET / endpoint
    pub fn info(&self) -> Value {
        info!("INFO");

        json!({
            "apiversion": "1",
            "author": "battlesnake-planner",
            "color": "#e63946",
            "head": "default",
            "tail": "default",
        })
    }

    /// Called when a game starts
    /// Corresponds to POST /start endpoint
    pub fn start(&self, game: &Game, _turn: &i32, _board: &Board, you: &Battlesnake) {
        info!(
            "GAME START {} (snake {}, strategy {})",
            game.id,
            you.id,
            self.planner.strategy()
        );
    }

    /// Called when a game ends
    /// Corresponds to POST /end endpoint
    pub fn end(&self, game: &Game, turn: &i32, _board: &Board, you: &Battlesnake) {
        info!("GAME OVER {} after {} turns (snake {})", game.id, turn, you.id);
    }

    /// Computes and returns the next move
    /// Corresponds to POST /move endpoint
    ///
    /// A board that fails validation is answered with the fallback move, so
    /// the response is always a valid direction.
    ///
    /// # Returns
    /// * `Value` - JSON response containing the chosen move direction
    pub fn get_move(&self, _game: &Game, turn: &i32, board: &Board, you: &Battlesnake) -> Value {
        let chosen = match BoardSnapshot::from_board(*turn, board, &you.id) {
            Ok(snapshot) => {
                let decision = self.decide(&snapshot);
                info!(
                    "MOVE {}: {} ({:?}, score {:?})",
                    turn,
                    decision.direction,
                    decision.reason,
                    decision.score()
                );
                decision.direction
            }
            Err(e) => {
                let fallback = self.planner.config().planner.fallback_move;
                warn!("MOVE {}: rejected board ({}), answering {}", turn, e, fallback);
                fallback
            }
        };

        self.logger.log_move(
            *turn,
            &you.id,
            self.planner.strategy(),
            board.clone(),
            chosen,
        );

        json!({ "move": chosen.as_str() })
    }

    /// Plans with a per-turn RNG: seeded from config when a seed is set,
    /// otherwise the thread-local generator
    pub fn decide(&self, snapshot: &BoardSnapshot) -> Decision {
        match self.planner.config().tie_break.seed {
            Some(seed) => {
                let mut rng = StdRng::seed_from_u64(seed.wrapping_add(u64::from(snapshot.turn)));
                self.planner.plan(snapshot, &mut rng)
            }
            None => self.planner.plan(snapshot, &mut rand::rng()),
        }
    }
}
