#[macro_use]
extern crate rocket;

use battlesnake_planner::bot::Bot;
use battlesnake_planner::config::Config;
use battlesnake_planner::debug_logger::DebugLogger;
use battlesnake_planner::scoring::Strategy;
use log::{info, warn};
use rocket::fairing::AdHoc;
use std::env;

mod handler;

#[launch]
async fn rocket() -> _ {
    // Lots of web hosting services expect you to bind to the port specified by the `PORT`
    // environment variable. However, Rocket looks at the `ROCKET_PORT` environment variable.
    // If we find a value for `PORT`, we set `ROCKET_PORT` to that value.
    if let Ok(port) = env::var("PORT") {
        env::set_var("ROCKET_PORT", &port);
    }

    // We default to 'info' level logging. But if the `RUST_LOG` environment variable is set,
    // we keep that value instead.
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }

    env_logger::init();

    info!("Starting Battlesnake Server...");

    // Load configuration once at startup
    let mut config = match env::var("SNAKE_CONFIG") {
        Ok(path) => Config::load_from_or_default(path),
        Err(_) => Config::load_or_default(),
    };

    if let Ok(name) = env::var("SNAKE_STRATEGY") {
        match name.parse::<Strategy>() {
            Ok(strategy) => config.planner.strategy = strategy,
            Err(e) => warn!("Ignoring SNAKE_STRATEGY: {}", e),
        }
    }
    info!("Using strategy {}", config.planner.strategy);

    let logger = DebugLogger::new(config.debug.enabled, &config.debug.log_file_path).await;
    let bot = Bot::with_logger(config, logger);

    rocket::build()
        .manage(bot)
        .attach(AdHoc::on_response("Server ID Middleware", |_, res| {
            Box::pin(async move {
                res.set_raw_header("Server", "battlesnake/github/battlesnake-planner");
            })
        }))
        .mount(
            "/",
            routes![handler::index, handler::start, handler::get_move, handler::end],
        )
}
