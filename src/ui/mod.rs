//! UI utilities for terminal output
//!
//! Progress spinners, confirmation and the [`Prompter`] abstraction used
//! for every interactive question.

mod confirm;
mod prompt;
mod spinner;

pub use confirm::confirm_action;
#[cfg(test)]
pub use prompt::testing;
pub use prompt::{NonInteractivePrompter, Prompter, TerminalPrompter};
pub use spinner::{create_spinner, finish_spinner};
