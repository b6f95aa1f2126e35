mod calendar;
mod cli;
mod compose;
mod config;
mod export;
mod history;
mod model;
mod params;
mod projection;
mod schedule;
mod storage;

use std::{io, process};

use tracing_subscriber::EnvFilter;

use config::Config;

/// Environment variable holding the log filter, e.g. `debug`.
const LOG_ENV: &str = "MERGER_TIMELINE_LOG";

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config: {e}");
            process::exit(1);
        }
    };

    if let Err(e) = cli::run(&config) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
