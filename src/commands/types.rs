//! Command types and definitions.

use std::fmt;

/// Available bot commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BotCommand {
    /// Show the welcome message with the main menu.
    Start,
}

impl BotCommand {
    /// Parses a command from a message text.
    ///
    /// Accepts `/start`, `/start@BotName` and `/start <payload>`.
    /// A command addressed to another bot (`@name` differing from
    /// `bot_username`, compared case-insensitively) is not ours.
    /// With no known username any `@name` is accepted.
    /// Returns `None` if the message is not a valid command.
    #[must_use]
    pub fn parse(text: &str, bot_username: Option<&str>) -> Option<Self> {
        let text = text.trim();
        let word = text.strip_prefix('/')?;

        // The payload of a deep link is not used.
        let word = word.split(char::is_whitespace).next().unwrap_or_default();
        let name = match word.split_once('@') {
            Some((_, "")) => return None,
            Some((name, addressee)) => {
                if let Some(own) = bot_username
                    && !addressee.eq_ignore_ascii_case(own.trim_start_matches('@'))
                {
                    return None;
                }
                name
            }
            None => word,
        };

        match name.to_lowercase().as_str() {
            "start" => Some(Self::Start),
            _ => None,
        }
    }

    /// Returns the command name as it appears in help.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Start => "start",
        }
    }
}

impl fmt::Display for BotCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}", self.name())
    }
}

/// Answer to a pressed inline button. The press is always acknowledged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackReply {
    /// Replace the message text (Markdown).
    EditMessage(&'static str),

    /// Change nothing.
    AcknowledgeOnly,
}
