//! Configuration module for the support bot.
//!
//! Handles loading and validation of the Telegram credentials
//! and runtime settings from the environment.

mod settings;

pub use settings::{BotSettings, ConfigError, TOKEN_ENV_VAR, TelegramConfig};
