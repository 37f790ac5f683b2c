//! The main menu and its canned replies.

use std::fmt;

/// Text sent together with the main menu.
pub const WELCOME_TEXT: &str = "Welcome to our Customer Support Demo!\n\n\
I am a bot assistant. Please choose an option below to get started.";

/// Reply shown after pressing the FAQ button (Markdown).
pub const FAQ_TEXT: &str = "**Frequently Asked Questions**\n\n\
**Q: What are your business hours?**\n\
A: Our team is available from 9 AM to 5 PM, Monday to Friday.\n\n\
Type /start to return to the main menu.";

/// Reply shown after pressing the agent button (Markdown).
pub const AGENT_TEXT: &str = "**Agent Handoff**\n\n\
All our human agents are currently assisting other customers. \
To ensure you get help, please send an email to support@example.com \
and one of our team members will get back to you shortly.\n\n\
Type /start to return to the main menu.";

/// One of the selectable options of the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuOption {
    /// Frequently asked questions.
    Faq,

    /// Handoff to a human agent.
    Agent,
}

impl MenuOption {
    /// All options, in the order they appear in the menu.
    pub const ALL: [Self; 2] = [Self::Faq, Self::Agent];

    /// Identifier carried as the button's callback data.
    #[must_use]
    pub const fn callback_id(self) -> &'static str {
        match self {
            Self::Faq => "faq",
            Self::Agent => "agent",
        }
    }

    /// Button label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Faq => "❓ View FAQs",
            Self::Agent => "🗣️ Speak to a Human Agent",
        }
    }

    /// Markdown text that replaces the menu once this option is chosen.
    #[must_use]
    pub const fn reply_text(self) -> &'static str {
        match self {
            Self::Faq => FAQ_TEXT,
            Self::Agent => AGENT_TEXT,
        }
    }

    /// Looks up an option by raw callback data.
    ///
    /// Only exact matches are accepted.
    #[must_use]
    pub fn from_callback(data: &[u8]) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|option| option.callback_id().as_bytes() == data)
    }
}

impl fmt::Display for MenuOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.callback_id())
    }
}

/// An inline button: a label plus the data sent back when pressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuButton {
    pub label: &'static str,
    pub callback_id: &'static str,
}

impl From<MenuOption> for MenuButton {
    fn from(option: MenuOption) -> Self {
        Self {
            label: option.label(),
            callback_id: option.callback_id(),
        }
    }
}

/// A message with an inline keyboard attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Menu {
    /// Message text.
    pub text: &'static str,

    /// Keyboard rows, top to bottom.
    pub rows: Vec<Vec<MenuButton>>,
}

impl Menu {
    /// The welcome menu: one option per row.
    #[must_use]
    pub fn main() -> Self {
        Self {
            text: WELCOME_TEXT,
            rows: MenuOption::ALL
                .into_iter()
                .map(|option| vec![MenuButton::from(option)])
                .collect(),
        }
    }

    /// Iterates over every button, row by row.
    pub fn buttons(&self) -> impl Iterator<Item = &MenuButton> {
        self.rows.iter().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_main_menu_has_two_fixed_options() {
        let menu = Menu::main();
        assert_eq!(menu.text, WELCOME_TEXT);
        assert_eq!(menu.rows.len(), 2);
        assert!(menu.rows.iter().all(|row| row.len() == 1));

        let ids: Vec<_> = menu.buttons().map(|b| b.callback_id).collect();
        assert_eq!(ids, ["faq", "agent"]);
    }

    #[test]
    fn test_button_labels() {
        let labels: Vec<_> = Menu::main().buttons().map(|b| b.label).collect();
        assert_eq!(labels, ["❓ View FAQs", "🗣️ Speak to a Human Agent"]);
    }

    #[test]
    fn test_from_callback() {
        assert_eq!(MenuOption::from_callback(b"faq"), Some(MenuOption::Faq));
        assert_eq!(MenuOption::from_callback(b"agent"), Some(MenuOption::Agent));
        assert_eq!(MenuOption::from_callback(b"FAQ"), None);
        assert_eq!(MenuOption::from_callback(b"faq "), None);
        assert_eq!(MenuOption::from_callback(b""), None);
    }

    #[test]
    fn test_reply_texts() {
        assert!(MenuOption::Faq.reply_text().starts_with("**Frequently Asked Questions**"));
        assert!(MenuOption::Agent.reply_text().contains("support@example.com"));
        for option in MenuOption::ALL {
            assert!(option.reply_text().ends_with("Type /start to return to the main menu."));
        }
    }
}
