//! Progress callback trait for interface-agnostic updates
//!
//! The setup and transfer flows report everything they do through this trait;
//! the CLI renders it to the terminal, tests record or ignore it.

use crate::bootstrap::ForkState;
use crate::git::ShellCommand;
use crate::transfer::TransferState;
use crate::types::PullRequest;
use async_trait::async_trait;
use std::path::Path;

/// Progress callback trait
#[async_trait]
pub trait ProgressCallback: Send + Sync {
    /// Called right before a command runs
    async fn on_command(&self, working_dir: &Path, command: &ShellCommand);

    /// Called with command output the user should see (patch preview, etc.)
    async fn on_command_output(&self, output: &str);

    /// Called when the fork bootstrap of a repository enters a new state
    async fn on_fork_state(&self, repository: &str, state: &ForkState);

    /// Called when the patch transfer enters a new state
    async fn on_transfer_state(&self, state: TransferState);

    /// Called when a pull request was opened for a change
    async fn on_pull_request(&self, patch_id: u64, pr: &PullRequest);

    /// Called when something completed successfully
    async fn on_success(&self, message: &str);

    /// Called for problems that do not abort the run
    async fn on_warning(&self, message: &str);

    /// Called with a general status message
    async fn on_message(&self, message: &str);
}

/// No-op progress callback for testing or when progress isn't needed
pub struct NoopProgress;

#[async_trait]
impl ProgressCallback for NoopProgress {
    async fn on_command(&self, _working_dir: &Path, _command: &ShellCommand) {}
    async fn on_command_output(&self, _output: &str) {}
    async fn on_fork_state(&self, _repository: &str, _state: &ForkState) {}
    async fn on_transfer_state(&self, _state: TransferState) {}
    async fn on_pull_request(&self, _patch_id: u64, _pr: &PullRequest) {}
    async fn on_success(&self, _message: &str) {}
    async fn on_warning(&self, _message: &str) {}
    async fn on_message(&self, _message: &str) {}
}
