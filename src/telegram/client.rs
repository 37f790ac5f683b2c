//! Telegram client wrapper that routes updates to the command handler.

use std::sync::Arc;

use grammers_client::update::{CallbackQuery, Message, Update};
use grammers_client::{Client, InputMessage, InvocationError, button, reply_markup};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::commands::{CallbackReply, CommandHandler, Menu};

/// Errors that can occur during Telegram operations.
#[derive(Debug, Error)]
pub enum TelegramError {
    #[error("Sign in failed: {0}")]
    SignInFailed(String),

    #[error("Flood wait required: {0} seconds")]
    FloodWait(u32),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Session error: {0}")]
    Session(String),

    #[error("API invocation error: {0}")]
    Invocation(String),
}

impl From<InvocationError> for TelegramError {
    fn from(err: InvocationError) -> Self {
        let err_str = err.to_string();

        if let Some(seconds) = extract_flood_wait_seconds(&err_str) {
            return Self::FloodWait(seconds);
        }

        Self::Invocation(err_str)
    }
}

/// Extracts flood wait seconds from an error message.
fn extract_flood_wait_seconds(err_msg: &str) -> Option<u32> {
    let lower = err_msg.to_lowercase();

    for pattern in ["flood_wait_", "flood wait "] {
        if let Some(idx) = lower.find(pattern) {
            let num_str: String = lower[idx + pattern.len()..]
                .chars()
                .take_while(char::is_ascii_digit)
                .collect();
            if let Ok(seconds) = num_str.parse() {
                return Some(seconds);
            }
        }
    }
    None
}

/// Bot session bound to a connected client.
///
/// Cheap to clone; each update is handled on its own clone.
#[derive(Clone)]
pub struct SupportBot {
    client: Client,
    handler: Arc<CommandHandler>,
}

impl SupportBot {
    /// Wraps an already connected client.
    #[must_use]
    pub fn new(client: Client, handler: CommandHandler) -> Self {
        Self {
            client,
            handler: Arc::new(handler),
        }
    }

    /// Signs in as a bot unless the session is already authorized.
    ///
    /// Teaches the handler the bot's username so that commands
    /// addressed to other bots are ignored.
    pub async fn authorize(&mut self, token: &str, api_hash: &str) -> Result<(), TelegramError> {
        let authorized = self
            .client
            .is_authorized()
            .await
            .map_err(|e| TelegramError::Connection(e.to_string()))?;

        if authorized {
            debug!("Session already authorized");
        } else {
            info!("Signing in with bot token...");
            self.client
                .bot_sign_in(token, api_hash)
                .await
                .map_err(|e| TelegramError::SignInFailed(e.to_string()))?;
        }

        let me = self.client.get_me().await?;
        match me.username() {
            Some(username) => {
                info!("Signed in as @{}", username);
                let handler = CommandHandler::clone(&self.handler).with_bot_username(username);
                self.handler = Arc::new(handler);
            }
            None => warn!("Signed in without a username; accepting /start@<any bot>"),
        }
        Ok(())
    }

    /// Routes a single update. Failures are logged, never propagated.
    pub async fn handle_update(&self, update: Update) {
        let result = match update {
            Update::NewMessage(message) | Update::MessageEdited(message)
                if !message.outgoing() =>
            {
                self.on_message(&message).await
            }
            Update::CallbackQuery(query) => self.on_callback(&query).await,
            _ => Ok(()),
        };

        if let Err(e) = result {
            match e {
                TelegramError::FloodWait(seconds) => {
                    warn!("Flood wait triggered: {} seconds", seconds);
                }
                e => warn!("Failed to respond to update: {}", e),
            }
        }
    }

    async fn on_message(&self, message: &Message) -> Result<(), TelegramError> {
        if let Some(menu) = self.handler.handle_message(message.text()) {
            debug!("Sending main menu");
            message.reply(menu_message(&menu)).await?;
        }
        Ok(())
    }

    async fn on_callback(&self, query: &CallbackQuery) -> Result<(), TelegramError> {
        match self.handler.handle_callback(query.data()) {
            CallbackReply::EditMessage(text) => {
                query.answer().edit(InputMessage::markdown(text)).await?;
            }
            CallbackReply::AcknowledgeOnly => {
                query.answer().send().await?;
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for SupportBot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SupportBot")
            .field("handler", &self.handler)
            .finish_non_exhaustive()
    }
}

/// Builds the outgoing message for a menu, one inline keyboard row per menu row.
fn menu_message(menu: &Menu) -> InputMessage {
    let rows: Vec<Vec<_>> = menu
        .rows
        .iter()
        .map(|row| {
            row.iter()
                .map(|b| button::inline(b.label, b.callback_id))
                .collect()
        })
        .collect();

    InputMessage::text(menu.text).reply_markup(&reply_markup::inline(rows))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_flood_wait() {
        assert_eq!(extract_flood_wait_seconds("FLOOD_WAIT_120"), Some(120));
        assert_eq!(extract_flood_wait_seconds("rpc error 420: FLOOD_WAIT_7 caused by messages.sendMessage"), Some(7));
        assert_eq!(extract_flood_wait_seconds("flood wait 60 seconds"), Some(60));
        assert_eq!(extract_flood_wait_seconds("some other error"), None);
        assert_eq!(extract_flood_wait_seconds("FLOOD_WAIT_"), None);
    }
}
