//! Confirmation prompts
//!
//! Destructive operations ask before they write. The backup manager only
//! sees the [`Prompt`] port; the binary answers through the terminal and
//! tests answer from a script.

mod scripted;
mod terminal;

pub use scripted::ScriptedPrompt;
pub use terminal::TerminalPrompt;

/// Asks the user a yes/no question
pub trait Prompt {
    /// Returns `true` only when the user explicitly agreed
    fn confirm(&mut self, message: &str) -> bool;
}

/// Agrees to everything without asking (`import --yes`)
#[derive(Debug, Clone, Copy, Default)]
pub struct AssumeYes;

impl Prompt for AssumeYes {
    fn confirm(&mut self, message: &str) -> bool {
        tracing::debug!(question = message, "confirmation assumed");
        true
    }
}

impl<P: Prompt + ?Sized> Prompt for &mut P {
    fn confirm(&mut self, message: &str) -> bool {
        (**self).confirm(message)
    }
}
