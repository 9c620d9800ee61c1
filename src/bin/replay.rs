// Standalone replay tool for analyzing Battlesnake debug logs
//
// Usage:
//   cargo run --bin replay -- <log_file> [options]
//
// Options:
//   --all                  Replay all turns
//   --turns <turn1,turn2>  Replay specific turns (comma-separated)
//   --validate             Check logged moves against expected ones
//   --strategy <name>      Replay with a different strategy than logged
//   --verbose              Show detailed output for each turn
//   --config <path>        Path to Snake.toml (default: Snake.toml)

use std::env;
use std::process;

use battlesnake_planner::config::Config;
use battlesnake_planner::replay::ReplayEngine;
use battlesnake_planner::scoring::Strategy;
use battlesnake_planner::types::Direction;

fn print_usage() {
    eprintln!("Battlesnake Replay Tool");
    eprintln!();
    eprintln!("USAGE:");
    eprintln!("  replay <log_file> [OPTIONS]");
    eprintln!();
    eprintln!("OPTIONS:");
    eprintln!("  --all                   Replay all turns in the log");
    eprintln!("  --turns <T1,T2,...>     Replay specific turns (comma-separated)");
    eprintln!("  --validate <T:M,...>    Validate expected moves (format: turn:move,...)");
    eprintln!("  --strategy <name>       pathfinder | safe | greedy | aggressive");
    eprintln!("  --verbose               Show detailed output for each turn");
    eprintln!("  --config <path>         Path to Snake.toml (default: Snake.toml)");
    eprintln!("  --help                  Show this help message");
    eprintln!();
    eprintln!("EXAMPLES:");
    eprintln!("  replay battlesnake_debug.jsonl --all");
    eprintln!("  replay battlesnake_debug.jsonl --turns 5,10,15 --strategy greedy");
    eprintln!("  replay battlesnake_debug.jsonl --validate 5:up,10:right");
}

fn parse_turns(s: &str) -> Result<Vec<i32>, String> {
    s.split(',')
        .map(|t| {
            t.trim()
                .parse::<i32>()
                .map_err(|e| format!("Invalid turn number '{}': {}", t, e))
        })
        .collect()
}

fn parse_expected_moves(s: &str) -> Result<Vec<(i32, Vec<Direction>)>, String> {
    s.split(',')
        .map(|pair| {
            let (turn, moves) = pair
                .trim()
                .split_once(':')
                .ok_or_else(|| format!("Invalid format '{}'. Expected 'turn:move'", pair))?;

            let turn = turn
                .parse::<i32>()
                .map_err(|e| format!("Invalid turn number '{}': {}", turn, e))?;

            // Several acceptable moves may be given as up|left
            let moves = moves
                .split('|')
                .map(str::parse::<Direction>)
                .collect::<Result<Vec<_>, _>>()?;

            Ok((turn, moves))
        })
        .collect()
}

struct Options {
    log_file: String,
    all: bool,
    turns: Option<Vec<i32>>,
    validate: Option<Vec<(i32, Vec<Direction>)>>,
    strategy: Option<Strategy>,
    verbose: bool,
    config_path: String,
}

fn parse_args(args: &[String]) -> Result<Options, String> {
    let mut iter = args.iter();
    let log_file = iter.next().ok_or("Missing log file argument")?.clone();

    let mut options = Options {
        log_file,
        all: false,
        turns: None,
        validate: None,
        strategy: None,
        verbose: false,
        config_path: "Snake.toml".to_string(),
    };

    while let Some(arg) = iter.next() {
        let mut value = |flag: &str| {
            iter.next()
                .cloned()
                .ok_or_else(|| format!("{} requires a value", flag))
        };

        match arg.as_str() {
            "--all" => options.all = true,
            "--verbose" => options.verbose = true,
            "--turns" => options.turns = Some(parse_turns(&value("--turns")?)?),
            "--validate" => options.validate = Some(parse_expected_moves(&value("--validate")?)?),
            "--strategy" => options.strategy = Some(value("--strategy")?.parse()?),
            "--config" => options.config_path = value("--config")?,
            other => return Err(format!("Unknown option: {}", other)),
        }
    }

    Ok(options)
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().skip(1).collect();
    if args.is_empty() || args.iter().any(|a| a == "--help") {
        print_usage();
        process::exit(if args.is_empty() { 1 } else { 0 });
    }

    let options = match parse_args(&args) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("Error: {}", e);
            print_usage();
            process::exit(1);
        }
    };

    let config = Config::load_from_or_default(&options.config_path);
    let mut engine = ReplayEngine::new(config, options.verbose);
    if let Some(strategy) = options.strategy {
        engine = engine.with_strategy(strategy);
    }

    let entries = match engine.load_log_file(&options.log_file) {
        Ok(entries) => entries,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    if let Some(expected) = &options.validate {
        match engine.validate_expected_moves(&entries, expected) {
            Ok(()) => println!("All expected moves validated"),
            Err(e) => {
                eprintln!("Validation failed: {}", e);
                process::exit(1);
            }
        }
    }

    let results = if let Some(turns) = &options.turns {
        match engine.replay_turns(&entries, turns) {
            Ok(results) => results,
            Err(e) => {
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        }
    } else if options.all || options.validate.is_none() {
        engine.replay_all(&entries)
    } else {
        return;
    };

    println!("{}", engine.format_report(&results));

    let stats = engine.generate_stats(&results);
    if stats.mismatches > 0 {
        process::exit(2);
    }
}
