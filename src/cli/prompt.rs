//! Terminal prompts backed by dialoguer

use dialoguer::{Confirm, Input, Password};
use neos_contribute::error::Result;
use neos_contribute::prompt::Prompter;

/// Asks questions on the terminal
pub struct DialoguerPrompter;

impl Prompter for DialoguerPrompter {
    fn confirm(&self, question: &str, default: bool) -> Result<bool> {
        Ok(Confirm::new()
            .with_prompt(question)
            .default(default)
            .interact()?)
    }

    fn input(&self, question: &str) -> Result<String> {
        Ok(Input::<String>::new().with_prompt(question).interact_text()?)
    }

    fn secret(&self, question: &str) -> Result<String> {
        Ok(Password::new().with_prompt(question).interact()?)
    }
}
