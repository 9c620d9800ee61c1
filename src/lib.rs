// Library exports for the Battlesnake planner
// This allows the replay tool, the server binary and the tests to share the core logic

pub mod bot;
pub mod config;
pub mod debug_logger;
pub mod pathfinding;
pub mod planner;
pub mod replay;
pub mod safety;
pub mod scoring;
pub mod snapshot;
pub mod space;
pub mod tiebreak;
pub mod types;
