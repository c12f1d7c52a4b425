//! User interaction.
//! The [`Prompter`] trait abstracts how questions reach the user so the
//! question runner can be driven by a terminal or by a script in tests.

use crate::error::{Error, Result};
use dialoguer::{Confirm, Input};

pub trait Prompter {
    /// Asks a free-text question. An empty input returns `default`.
    fn ask(&self, prompt: &str, default: &str) -> Result<String>;

    /// Asks a yes/no question. Returns `true` without asking when `skip` is set.
    fn confirm(&self, skip: bool, prompt: String) -> Result<bool>;

    /// Shows a validation problem before a question is asked again.
    fn report(&self, message: &str) {
        eprintln!("{message}");
    }
}

/// Terminal prompter built on dialoguer.
#[derive(Debug, Default)]
pub struct DialoguerPrompter;

impl DialoguerPrompter {
    pub fn new() -> Self {
        Self
    }
}

impl Prompter for DialoguerPrompter {
    fn ask(&self, prompt: &str, default: &str) -> Result<String> {
        let mut input = Input::<String>::new().with_prompt(prompt).allow_empty(true);
        if !default.is_empty() {
            input = input.default(default.to_string());
        }
        input.interact_text().map_err(|e| Error::ConfigError(e.to_string()))
    }

    fn confirm(&self, skip: bool, prompt: String) -> Result<bool> {
        if skip {
            return Ok(true);
        }
        Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()
            .map_err(|e| Error::ConfigError(e.to_string()))
    }
}
