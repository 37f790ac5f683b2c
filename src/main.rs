//! Support Menu Bot - Main Entry Point
//!
//! A Telegram bot that answers `/start` with a FAQ / human agent menu.

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use support_menu_bot::commands::CommandHandler;
use support_menu_bot::config::{BotSettings, TelegramConfig};
use support_menu_bot::telegram;

/// Telegram customer support demo bot.
#[derive(Parser, Debug)]
#[command(name = "support_bot")]
#[command(about = "Greet users with a FAQ / human agent support menu")]
#[command(version)]
struct Args {
    /// Path to the .env file for environment variables.
    #[arg(long, default_value = ".env")]
    env_file: String,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    init_logging(&args.log_level);

    // Load environment variables
    if let Err(e) = dotenvy::from_filename(&args.env_file) {
        debug!("Could not load .env file ({}): {}", args.env_file, e);
    }

    // Without credentials there is nothing to run; exit without polling.
    let tg_config = match TelegramConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("FATAL: {}", e);
            return Ok(());
        }
    };

    let settings = BotSettings::from_env_with_defaults();
    info!(
        "Loaded configuration (api_id: {}, session: {}, catch_up: {})",
        tg_config.api_id,
        tg_config.session_path.display(),
        settings.catch_up
    );

    telegram::run(&tg_config, &settings, CommandHandler::new())
        .await
        .context("Telegram bot failed")?;

    Ok(())
}

/// Initializes the logging subsystem.
fn init_logging(level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
