//! Interactive questions
//!
//! Every confirmation gate of `setup` and the patch transfer goes through
//! [`Prompter`], so the flows can run against a terminal or a scripted answer
//! list in tests.

use crate::error::Result;

/// Asks the user questions
pub trait Prompter: Send + Sync {
    /// Yes/no question; `default` is used when the user just presses enter
    fn confirm(&self, question: &str, default: bool) -> Result<bool>;

    /// Free-form answer
    fn input(&self, question: &str) -> Result<String>;

    /// Answer that is not echoed to the terminal
    fn secret(&self, question: &str) -> Result<String>;
}
