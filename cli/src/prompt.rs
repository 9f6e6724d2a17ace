//! Terminal prompts backing the workspace's confirmation and warning dialogs.

use inquire::{Confirm, Text};
use tracing::warn;
use volun_business::Prompter;

/// [`Prompter`] over `inquire`.
///
/// A prompt that is cancelled (Esc, Ctrl-C) or cannot be shown counts as a
/// "no" answer.
#[derive(Debug, Default)]
pub struct TerminalPrompter {
    /// Warning text given on the command line; skips the text dialog.
    preset_message: Option<String>,
}

impl TerminalPrompter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_message(message: Option<String>) -> Self {
        Self {
            preset_message: message,
        }
    }
}

impl Prompter for TerminalPrompter {
    fn confirm(&self, message: &str) -> bool {
        match Confirm::new(message).with_default(false).prompt() {
            Ok(answer) => answer,
            Err(e) => {
                warn!("Confirmation prompt closed: {e}");
                false
            }
        }
    }

    fn input(&self, title: &str) -> Option<String> {
        if let Some(message) = &self.preset_message {
            return Some(message.clone());
        }

        match Text::new(title)
            .with_help_message("Texto da advertência. Esc para cancelar.")
            .prompt_skippable()
        {
            Ok(text) => text,
            Err(e) => {
                warn!("Warning dialog closed: {e}");
                None
            }
        }
    }
}
