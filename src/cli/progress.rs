//! Shared CLI progress callback with styled output and spinners

use crate::cli::style::{Stream, arrow, check, cross, hyperlink_url, spinner_style, Stylize};
use anstream::{eprintln, println};
use async_trait::async_trait;
use indicatif::ProgressBar;
use neos_contribute::bootstrap::ForkState;
use neos_contribute::git::ShellCommand;
use neos_contribute::progress::ProgressCallback;
use neos_contribute::transfer::TransferState;
use neos_contribute::types::PullRequest;
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;

/// CLI progress callback that prints to stdout with styled output
///
/// API calls that may take a while (fork lookup and creation) show a spinner
/// until the next event arrives.
pub struct CliProgress {
    /// Verbose mode also prints every state transition
    pub verbose: bool,
    spinner: Mutex<Option<ProgressBar>>,
}

impl CliProgress {
    /// Create a progress printer
    pub const fn new(verbose: bool) -> Self {
        Self {
            verbose,
            spinner: Mutex::new(None),
        }
    }

    fn start_spinner(&self, message: String) {
        let spinner = ProgressBar::new_spinner()
            .with_style(spinner_style())
            .with_message(message);
        spinner.enable_steady_tick(Duration::from_millis(80));
        if let Ok(mut slot) = self.spinner.lock() {
            if let Some(previous) = slot.replace(spinner) {
                previous.finish_and_clear();
            }
        }
    }

    fn stop_spinner(&self) {
        if let Ok(mut slot) = self.spinner.lock() {
            if let Some(spinner) = slot.take() {
                spinner.finish_and_clear();
            }
        }
    }
}

#[async_trait]
impl ProgressCallback for CliProgress {
    async fn on_command(&self, working_dir: &Path, command: &ShellCommand) {
        self.stop_spinner();
        println!(
            "{} [{}] {}",
            "GIT".emphasis(),
            working_dir.display().muted(),
            command
        );
    }

    async fn on_command_output(&self, output: &str) {
        let output = output.trim_end();
        if !output.is_empty() {
            println!("{output}");
        }
    }

    async fn on_fork_state(&self, repository: &str, state: &ForkState) {
        self.stop_spinner();
        match state {
            ForkState::CheckingExistingFork(name) => {
                self.start_spinner(format!("Checking fork {name} of {repository}..."));
            }
            ForkState::CreateForkViaApi => {
                self.start_spinner(format!("Forking {repository}..."));
            }
            _ if self.verbose => {
                println!("{} {}", arrow(), state.to_string().muted());
            }
            _ => {}
        }
    }

    async fn on_transfer_state(&self, state: TransferState) {
        if self.verbose {
            println!("{} {}", arrow(), state.to_string().muted());
        }
    }

    async fn on_pull_request(&self, patch_id: u64, pr: &PullRequest) {
        self.stop_spinner();
        println!(
            "{} Successfully opened a pull request {} for patch {}",
            check(),
            hyperlink_url(Stream::Stdout, &pr.html_url).accent(),
            patch_id.emphasis()
        );
    }

    async fn on_success(&self, message: &str) {
        self.stop_spinner();
        println!("{} {}", check(), message.success());
    }

    async fn on_warning(&self, message: &str) {
        self.stop_spinner();
        eprintln!("{} {}", cross(), message.warn());
    }

    async fn on_message(&self, message: &str) {
        self.stop_spinner();
        println!("{message}");
    }
}

impl Drop for CliProgress {
    fn drop(&mut self) {
        self.stop_spinner();
    }
}
