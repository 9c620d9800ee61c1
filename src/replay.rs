// Replay module for analyzing historical game states and debugging decision-making
//
// This module provides functionality to:
// 1. Parse JSONL debug logs
// 2. Replay the planner on historical states
// 3. Compare logged vs replayed moves
// 4. Generate analysis reports

use log::{info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::Instant;

use crate::config::Config;
use crate::debug_logger::DebugLogEntry;
use crate::planner::{DecisionReason, Planner};
use crate::scoring::Strategy;
use crate::snapshot::BoardSnapshot;
use crate::types::{Board, Direction};

/// Log lines are the debug logger's entries
pub type LogEntry = DebugLogEntry;

/// Result of replaying a single turn
#[derive(Debug, Clone)]
pub struct ReplayResult {
    pub turn: i32,
    pub original_move: Direction,
    pub replayed_move: Direction,
    pub matches: bool,
    pub reason: DecisionReason,
    pub replayed_score: Option<f64>,
    pub computation_time_us: u128,
}

/// Statistics for a complete replay session
#[derive(Debug, Default)]
pub struct ReplayStats {
    pub total_turns: usize,
    pub matches: usize,
    pub mismatches: usize,
    pub match_rate: f64,
}

/// Replay engine for analyzing debug logs
#[derive(Debug)]
pub struct ReplayEngine {
    planner: Planner,
    /// Replay with this strategy instead of the one recorded per line
    strategy_override: Option<Strategy>,
    verbose: bool,
}

impl ReplayEngine {
    /// Creates a new replay engine with the given configuration
    pub fn new(config: Config, verbose: bool) -> Self {
        ReplayEngine {
            planner: Planner::new(config),
            strategy_override: None,
            verbose,
        }
    }

    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy_override = Some(strategy);
        self
    }

    /// Loads all log entries from a JSONL file
    pub fn load_log_file<P: AsRef<Path>>(&self, log_path: P) -> Result<Vec<LogEntry>, String> {
        let file = File::open(log_path.as_ref())
            .map_err(|e| format!("Failed to open log file: {}", e))?;

        let reader = BufReader::new(file);
        let mut entries = Vec::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| format!("Failed to read line {}: {}", line_num + 1, e))?;

            if line.trim().is_empty() {
                continue;
            }

            let entry: LogEntry = serde_json::from_str(&line)
                .map_err(|e| format!("Failed to parse JSON on line {}: {}", line_num + 1, e))?;

            entries.push(entry);
        }

        info!("Loaded {} log entries", entries.len());
        Ok(entries)
    }

    /// Replays the planner on a single board state
    ///
    /// Jitter is drawn from an RNG seeded with the configured seed (or 0)
    /// plus the turn, so a replay is reproducible even under the jitter policy.
    pub fn replay_turn(
        &self,
        turn: i32,
        board: &Board,
        our_snake_id: &str,
        strategy: Strategy,
    ) -> Result<(Direction, DecisionReason, Option<f64>, u128), String> {
        let snapshot = BoardSnapshot::from_board(turn, board, our_snake_id)
            .map_err(|e| format!("Turn {}: {}", turn, e))?;

        let start_time = Instant::now();
        let seed = self.planner.config().tie_break.seed.unwrap_or(0);
        let mut rng = StdRng::seed_from_u64(seed.wrapping_add(u64::from(snapshot.turn)));
        let decision = self.planner.plan_with(strategy, &snapshot, &mut rng);
        let elapsed = start_time.elapsed().as_micros();

        Ok((decision.direction, decision.reason, decision.score(), elapsed))
    }

    /// Replays a single log entry and compares the result
    pub fn replay_entry(&self, entry: &LogEntry) -> Result<ReplayResult, String> {
        if self.verbose {
            info!("Replaying turn {}...", entry.turn);
        }

        let original_move: Direction = entry.chosen_move.parse()?;
        let strategy = self.strategy_override.unwrap_or(entry.strategy);

        let (replayed_move, reason, replayed_score, computation_time) =
            self.replay_turn(entry.turn, &entry.board, &entry.you_id, strategy)?;

        let matches = original_move == replayed_move;

        if self.verbose {
            if matches {
                info!(
                    "Turn {}: MATCH - {} ({:?}, score: {:?}, time: {}us)",
                    entry.turn, replayed_move, reason, replayed_score, computation_time
                );
            } else {
                warn!(
                    "Turn {}: MISMATCH - Original: {}, Replayed: {} ({:?}, score: {:?}, time: {}us)",
                    entry.turn, original_move, replayed_move, reason, replayed_score, computation_time
                );
            }
        }

        Ok(ReplayResult {
            turn: entry.turn,
            original_move,
            replayed_move,
            matches,
            reason,
            replayed_score,
            computation_time_us: computation_time,
        })
    }

    /// Replays all entries in a log file
    pub fn replay_all(&self, entries: &[LogEntry]) -> Vec<ReplayResult> {
        entries
            .iter()
            .filter_map(|entry| match self.replay_entry(entry) {
                Ok(result) => Some(result),
                Err(e) => {
                    warn!("Failed to replay turn {}: {}", entry.turn, e);
                    None
                }
            })
            .collect()
    }

    /// Replays specific turns from a log file
    pub fn replay_turns(
        &self,
        entries: &[LogEntry],
        turn_numbers: &[i32],
    ) -> Result<Vec<ReplayResult>, String> {
        let mut results = Vec::new();

        for turn_num in turn_numbers {
            let entry = entries
                .iter()
                .find(|e| e.turn == *turn_num)
                .ok_or_else(|| format!("Turn {} not found in log file", turn_num))?;

            match self.replay_entry(entry) {
                Ok(result) => results.push(result),
                Err(e) => {
                    warn!("Failed to replay turn {}: {}", turn_num, e);
                }
            }
        }

        Ok(results)
    }

    /// Generates statistics from replay results
    pub fn generate_stats(&self, results: &[ReplayResult]) -> ReplayStats {
        let total_turns = results.len();
        let matches = results.iter().filter(|r| r.matches).count();
        let mismatches = total_turns - matches;
        let match_rate = if total_turns > 0 {
            (matches as f64 / total_turns as f64) * 100.0
        } else {
            0.0
        };

        ReplayStats {
            total_turns,
            matches,
            mismatches,
            match_rate,
        }
    }

    /// Renders a report of replay results
    pub fn format_report(&self, results: &[ReplayResult]) -> String {
        let stats = self.generate_stats(results);
        let rule = "═".repeat(59);
        let mut out = String::new();

        out.push_str(&format!("\n{}\n", rule));
        out.push_str("                    REPLAY REPORT\n");
        out.push_str(&format!("{}\n", rule));
        out.push_str(&format!("Total Turns:    {}\n", stats.total_turns));
        out.push_str(&format!(
            "Matches:        {} ({:.1}%)\n",
            stats.matches, stats.match_rate
        ));
        out.push_str(&format!("Mismatches:     {}\n", stats.mismatches));
        out.push_str(&format!("{}\n\n", rule));

        if !results.is_empty() {
            let avg_time: f64 = results
                .iter()
                .map(|r| r.computation_time_us as f64)
                .sum::<f64>()
                / results.len() as f64;
            out.push_str(&format!("Average Computation Time:   {:.1}us\n\n", avg_time));
        }

        let mismatches: Vec<_> = results.iter().filter(|r| !r.matches).collect();
        if !mismatches.is_empty() {
            out.push_str(&format!("{}\n", rule));
            out.push_str("                  DETAILED MISMATCHES\n");
            out.push_str(&format!("{}\n", rule));

            for result in mismatches {
                out.push_str(&format!(
                    "Turn {}: {} → {} ({:?}, score: {:?})\n",
                    result.turn,
                    result.original_move,
                    result.replayed_move,
                    result.reason,
                    result.replayed_score
                ));
            }
        }

        out
    }

    /// Validates that specific expected moves were made
    pub fn validate_expected_moves(
        &self,
        entries: &[LogEntry],
        expected_moves: &[(i32, Vec<Direction>)], // (turn, acceptable_moves)
    ) -> Result<(), String> {
        for (turn, acceptable) in expected_moves {
            let entry = entries
                .iter()
                .find(|e| e.turn == *turn)
                .ok_or_else(|| format!("Turn {} not found in log", turn))?;

            let actual_move: Direction = entry.chosen_move.parse()?;

            if !acceptable.contains(&actual_move) {
                return Err(format!(
                    "Turn {}: Expected one of {:?}, but got {}",
                    turn,
                    acceptable.iter().map(|d| d.as_str()).collect::<Vec<_>>(),
                    actual_move
                ));
            }
        }

        Ok(())
    }
}
