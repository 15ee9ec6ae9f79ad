//! Interactive prompts
//!
//! Everything that asks the user a question goes through [`Prompter`], so
//! selection logic can run against a terminal, refuse to prompt at all in
//! non-interactive mode, or replay scripted answers in tests.

use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};

use crate::error::{CliError, Result};

pub trait Prompter {
    /// Pick one of `items`, returning its index
    fn select(&self, message: &str, default: usize, items: &[String]) -> Result<usize>;

    /// Free text input; an empty answer yields `default`
    fn input(&self, message: &str, default: &str) -> Result<String>;

    /// Yes/no question
    fn confirm(&self, message: &str, default: bool) -> Result<bool>;
}

/// dialoguer-backed prompter for interactive terminals
pub struct TerminalPrompter {
    theme: ColorfulTheme,
}

impl Default for TerminalPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalPrompter {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }
}

impl Prompter for TerminalPrompter {
    fn select(&self, message: &str, default: usize, items: &[String]) -> Result<usize> {
        let selection = Select::with_theme(&self.theme)
            .with_prompt(message)
            .items(items)
            .default(default.min(items.len().saturating_sub(1)))
            .interact()?;
        Ok(selection)
    }

    fn input(&self, message: &str, default: &str) -> Result<String> {
        let mut input = Input::<String>::with_theme(&self.theme).with_prompt(message);
        if default.is_empty() {
            input = input.allow_empty(true);
        } else {
            input = input.default(default.to_string());
        }
        Ok(input.interact_text()?)
    }

    fn confirm(&self, message: &str, default: bool) -> Result<bool> {
        Ok(Confirm::with_theme(&self.theme)
            .with_prompt(message)
            .default(default)
            .interact()?)
    }
}

/// Prompter used with `--interactive=false`: every question is an error
pub struct NonInteractivePrompter;

impl NonInteractivePrompter {
    fn refuse(message: &str) -> CliError {
        CliError::Selection(format!(
            "interactive prompt required but running in non-interactive mode ({})",
            message
        ))
    }
}

impl Prompter for NonInteractivePrompter {
    fn select(&self, message: &str, _default: usize, _items: &[String]) -> Result<usize> {
        Err(Self::refuse(message))
    }

    fn input(&self, message: &str, _default: &str) -> Result<String> {
        Err(Self::refuse(message))
    }

    fn confirm(&self, message: &str, _default: bool) -> Result<bool> {
        Err(Self::refuse(message))
    }
}
