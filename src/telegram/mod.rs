//! Telegram client wrapper module.
//!
//! Connects to Telegram as a bot and feeds incoming messages and
//! button presses to the command handler.

mod client;
mod runner;

pub use client::{SupportBot, TelegramError};
pub use runner::run;
