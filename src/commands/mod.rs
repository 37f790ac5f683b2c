//! Command handling module.
//!
//! Maps `/start` and inline button presses to replies.
//! Nothing here talks to Telegram directly.

mod handler;
mod menu;
mod types;

pub use handler::CommandHandler;
pub use menu::{AGENT_TEXT, FAQ_TEXT, Menu, MenuButton, MenuOption, WELCOME_TEXT};
pub use types::{BotCommand, CallbackReply};
