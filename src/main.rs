use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing::{error, info};

use bvp_scanner::config::AppConfig;
use bvp_scanner::logger;
use bvp_scanner::scanner::Scanner;
use bvp_scanner::server::{self, AppState};
use bvp_scanner::util::statsapi::StatsApi;

#[derive(Parser)]
#[command(version, about = "Batters with a career home run against today's probable starter")]
struct Cli {
    /// Path to a TOML config file (defaults to config/default.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Serve `GET /api/stats`
    Serve,
    /// Run one scan and print the JSON result
    Scan {
        /// Scan this date's schedule instead of today's
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Check that the Stats API is reachable
    Ping,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref())?;
    logger::init_logging(&config.logging)?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            let state = AppState::new(build_scanner(&config, None), &config.server);
            let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
            runtime.block_on(server::serve(state, &config.server.addr()))
        }
        Command::Scan { date } => {
            let outcome = build_scanner(&config, date).scan();
            let json = match &outcome {
                Ok(found) => serde_json::to_string_pretty(found)?,
                Err(e) => serde_json::to_string_pretty(&e.to_records())?,
            };
            println!("{json}");
            if outcome.is_err() {
                std::process::exit(1);
            }
            Ok(())
        }
        Command::Ping => {
            let api = StatsApi::new(&config.statsapi)?;
            let games = api.ping()?;
            info!(games, date = %api.date(), "Stats API reachable");
            println!("Stats API reachable: {games} games on {}", api.date().format("%A, %B %e %Y"));
            Ok(())
        }
    }
}

fn build_scanner(config: &AppConfig, date: Option<NaiveDate>) -> Scanner {
    match StatsApi::new(&config.statsapi) {
        Ok(api) => {
            let api = match date {
                Some(date) => api.on(date),
                None => api,
            };
            Scanner::new(Arc::new(api), config.scan.clone())
        }
        Err(e) => {
            error!(error = %format!("{e:#}"), "Stats provider could not be loaded");
            Scanner::unavailable(config.scan.clone())
        }
    }
}
