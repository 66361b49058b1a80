// ABOUTME: CalTrack CLI - command-line surface for the calorie tracking engine
// ABOUTME: Account, food log, and statistics commands over the local store
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 CalTrack
//!
//! Usage:
//! ```bash
//! # First run: create the local account
//! caltrack-cli account create --username sam --pin 1234 --goal 2200
//!
//! # Log food (calls the estimation endpoint; needs OPENAI_API_KEY)
//! caltrack-cli log add --pin 1234 "large tesco meal deal" --image lunch.jpg
//!
//! # Today's totals against the goal
//! caltrack-cli stats today --pin 1234
//!
//! # Weekly breakdown
//! caltrack-cli stats week --pin 1234
//! ```

mod commands;

use clap::{Parser, Subcommand};

use caltrack::config::AppConfig;
use caltrack::database::Database;
use caltrack::errors::AppResult;
use caltrack::logging::LoggingConfig;

use commands::account::AccountCommand;
use commands::log::LogCommand;
use commands::stats::StatsCommand;

#[derive(Parser)]
#[command(
    name = "caltrack-cli",
    about = "CalTrack calorie tracking CLI",
    long_about = "Local-first calorie tracking: describe food, let the model estimate the macros, and watch the daily and weekly totals."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Database URL override
    #[arg(long, global = true)]
    database_url: Option<String>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Account management commands
    Account {
        #[command(subcommand)]
        action: AccountCommand,
    },

    /// Food log commands
    Log {
        #[command(subcommand)]
        action: LogCommand,
    },

    /// Statistics views
    Stats {
        #[command(subcommand)]
        action: StatsCommand,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let mut logging = LoggingConfig::from_env();
    if cli.verbose {
        logging.level = "debug".into();
    }
    if let Err(err) = logging.init() {
        eprintln!("warning: {err}");
    }

    if let Err(err) = run(cli).await {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> AppResult<()> {
    let mut config = AppConfig::from_env()?;
    if let Some(database_url) = cli.database_url {
        config = config.with_database_url(database_url);
    }
    config.ensure_database_dir()?;

    let database = Database::new(&config.database_url).await?;

    match cli.command {
        Command::Account { action } => commands::account::handle(&database, action).await,
        Command::Log { action } => commands::log::handle(&database, action).await,
        Command::Stats { action } => commands::stats::handle(&database, action).await,
    }
}
