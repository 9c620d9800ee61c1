// Configuration module for reading Snake.toml
// Every tunable weight and threshold of the planner lives here

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::scoring::Strategy;
use crate::tiebreak::TieBreakPolicy;
use crate::types::Direction;

/// Main configuration structure containing all tunable parameters
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub planner: PlannerConfig,
    pub safety: SafetyConfig,
    pub tie_break: TieBreakConfig,
    pub pathfinder: PathfinderConfig,
    pub safe: SafeConfig,
    pub greedy: GreedyConfig,
    pub aggressive: AggressiveConfig,
    pub debug: DebugConfig,
}

/// Strategy selection and the move used when nothing is legal
#[derive(Debug, Deserialize, Clone)]
pub struct PlannerConfig {
    pub strategy: Strategy,
    pub fallback_move: Direction,
}

/// Safety filter switches
#[derive(Debug, Deserialize, Clone)]
pub struct SafetyConfig {
    /// Exclude cells an equal-or-longer opponent head could also reach
    pub avoid_contested_heads: bool,
    /// Keep our own tail blocked when it is stacked (we just ate)
    pub stacked_tail_blocks: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TieBreakConfig {
    pub policy: TieBreakPolicy,
    pub jitter_magnitude: f64,
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Dijkstra exploration budget for the pathfinder strategy
#[derive(Debug, Deserialize, Clone)]
pub struct PathfinderConfig {
    pub max_nodes: usize,
}

/// Flood fill first, food only when hungry
#[derive(Debug, Deserialize, Clone)]
pub struct SafeConfig {
    pub space_limit: usize,
    pub space_weight: f64,
    pub food_weight: f64,
    pub hunger_threshold: u8,
}

/// Food racing with BFS distances
#[derive(Debug, Deserialize, Clone)]
pub struct GreedyConfig {
    pub space_limit: usize,
    pub food_weight: f64,
    pub newly_reachable_multiplier: f64,
    pub winnable_food_bonus: f64,
    pub cramped_space_threshold: usize,
    pub cramped_space_weight: f64,
}

/// Hunting, trapping and center positioning
#[derive(Debug, Deserialize, Clone)]
pub struct AggressiveConfig {
    pub space_limit: usize,
    pub space_weight: f64,
    pub hunger_threshold: u8,
    pub food_weight: f64,
    /// Global multiplier on every attack term; above 1 is bolder
    pub aggression: f64,
    pub approach_weight: f64,
    pub adjacent_kill_bonus: f64,
    pub trap_radius: i32,
    pub trap_space_threshold: usize,
    pub trap_base_bonus: f64,
    pub trap_size_advantage_weight: f64,
    pub center_bias_weight: f64,
}

/// Debug configuration
#[derive(Debug, Deserialize, Clone)]
pub struct DebugConfig {
    pub enabled: bool,
    pub log_file_path: String,
}

impl Config {
    /// Loads configuration from a TOML file
    ///
    /// # Arguments
    /// * `path` - Path to the Snake.toml configuration file
    ///
    /// # Returns
    /// * `Result<Config, String>` - Parsed configuration or error message
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let contents = fs::read_to_string(path.as_ref())
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, String> {
        toml::from_str(contents).map_err(|e| format!("Failed to parse config file: {}", e))
    }

    /// Loads default configuration from Snake.toml in the project root
    pub fn load_default() -> Result<Self, String> {
        Self::from_file("Snake.toml")
    }

    /// Creates a configuration with hardcoded default values as fallback
    /// This should match the constants defined in Snake.toml
    pub fn default_hardcoded() -> Self {
        Config {
            planner: PlannerConfig {
                strategy: Strategy::Aggressive,
                fallback_move: Direction::Down,
            },
            safety: SafetyConfig {
                avoid_contested_heads: true,
                stacked_tail_blocks: true,
            },
            tie_break: TieBreakConfig {
                policy: TieBreakPolicy::Stable,
                jitter_magnitude: 0.01,
                seed: None,
            },
            pathfinder: PathfinderConfig { max_nodes: 256 },
            safe: SafeConfig {
                space_limit: 96,
                space_weight: 1.0,
                food_weight: 3.0,
                hunger_threshold: 50,
            },
            greedy: GreedyConfig {
                space_limit: 120,
                food_weight: 8.0,
                newly_reachable_multiplier: 1.5,
                winnable_food_bonus: 10.0,
                cramped_space_threshold: 10,
                cramped_space_weight: 0.8,
            },
            aggressive: AggressiveConfig {
                space_limit: 96,
                space_weight: 1.0,
                hunger_threshold: 35,
                food_weight: 2.5,
                aggression: 1.25,
                approach_weight: 1.5,
                adjacent_kill_bonus: 8.0,
                trap_radius: 4,
                trap_space_threshold: 10,
                trap_base_bonus: 6.0,
                trap_size_advantage_weight: 0.5,
                center_bias_weight: 0.2,
            },
            debug: DebugConfig {
                enabled: false,
                log_file_path: "battlesnake_debug.jsonl".to_string(),
            },
        }
    }

    /// Attempts to load from file, falls back to hardcoded defaults on error
    pub fn load_or_default() -> Self {
        Self::load_default().unwrap_or_else(|e| {
            log::warn!("Could not load Snake.toml ({}), using hardcoded defaults", e);
            Self::default_hardcoded()
        })
    }

    /// Same as `load_or_default` but for an explicit path
    pub fn load_from_or_default<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        Self::from_file(path).unwrap_or_else(|e| {
            log::warn!(
                "Could not load {} ({}), using hardcoded defaults",
                path.display(),
                e
            );
            Self::default_hardcoded()
        })
    }
}
