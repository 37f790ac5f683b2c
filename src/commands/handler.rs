//! Command handler implementation.

use tracing::debug;

use super::menu::{Menu, MenuOption};
use super::types::{BotCommand, CallbackReply};

/// Turns incoming messages and button presses into replies.
///
/// Holds only the bot's own username, so one instance can serve every update.
#[derive(Debug, Default, Clone)]
pub struct CommandHandler {
    /// Username of the bot, without `@`. Unknown until signed in.
    bot_username: Option<String>,
}

impl CommandHandler {
    /// Creates a new command handler.
    #[must_use]
    pub const fn new() -> Self {
        Self { bot_username: None }
    }

    /// Sets the username used to tell our commands from other bots'.
    #[must_use]
    pub fn with_bot_username(mut self, username: impl Into<String>) -> Self {
        self.bot_username = Some(username.into());
        self
    }

    /// Handles the text of an incoming message.
    ///
    /// Returns the menu to send, or `None` if the message is not our command.
    pub fn handle_message(&self, message_text: &str) -> Option<Menu> {
        let command = BotCommand::parse(message_text, self.bot_username.as_deref())?;

        debug!("Handling command: {}", command);
        Some(self.execute(command))
    }

    /// Handles the data of a pressed inline button.
    ///
    /// The press is always acknowledged; unknown data changes nothing.
    pub fn handle_callback(&self, data: &[u8]) -> CallbackReply {
        match MenuOption::from_callback(data) {
            Some(option) => {
                debug!("Menu option selected: {}", option);
                CallbackReply::EditMessage(option.reply_text())
            }
            None => {
                debug!(
                    "Ignoring unknown callback data: {:?}",
                    String::from_utf8_lossy(data)
                );
                CallbackReply::AcknowledgeOnly
            }
        }
    }

    #[allow(clippy::unused_self)]
    fn execute(&self, command: BotCommand) -> Menu {
        match command {
            BotCommand::Start => Menu::main(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{AGENT_TEXT, FAQ_TEXT};

    fn handler() -> CommandHandler {
        CommandHandler::new().with_bot_username("SupportDemoBot")
    }

    #[test]
    fn test_start_sends_main_menu() {
        let menu = handler().handle_message("/start").unwrap();
        let ids: Vec<_> = menu.buttons().map(|b| b.callback_id).collect();
        assert_eq!(ids, ["faq", "agent"]);
    }

    #[test]
    fn test_start_is_repeatable() {
        let handler = handler();
        assert_eq!(
            handler.handle_message("/start"),
            handler.handle_message("/start@SupportDemoBot")
        );
    }

    #[test]
    fn test_start_for_other_bot_is_ignored() {
        assert_eq!(handler().handle_message("/start@SomeOtherBot"), None);
        assert_eq!(handler().handle_message("/start@SupportDemoBot"), Some(Menu::main()));
    }

    #[test]
    fn test_plain_text_is_ignored() {
        let handler = handler();
        assert_eq!(handler.handle_message("hi"), None);
        assert_eq!(handler.handle_message("/help"), None);
    }

    #[test]
    fn test_faq_callback() {
        assert_eq!(
            handler().handle_callback(b"faq"),
            CallbackReply::EditMessage(FAQ_TEXT)
        );
    }

    #[test]
    fn test_agent_callback() {
        assert_eq!(
            handler().handle_callback(b"agent"),
            CallbackReply::EditMessage(AGENT_TEXT)
        );
    }

    #[test]
    fn test_unknown_callback_only_acknowledged() {
        let handler = handler();
        assert_eq!(handler.handle_callback(b"billing"), CallbackReply::AcknowledgeOnly);
        assert_eq!(handler.handle_callback(&[0xff, 0xfe]), CallbackReply::AcknowledgeOnly);
    }
}
