//! Progress callback that records what the flows report

#![allow(dead_code)]

use async_trait::async_trait;
use neos_contribute::bootstrap::ForkState;
use neos_contribute::git::ShellCommand;
use neos_contribute::progress::ProgressCallback;
use neos_contribute::transfer::TransferState;
use neos_contribute::types::PullRequest;
use std::path::Path;
use std::sync::Mutex;

/// Keeps fork states and messages in the order they were reported
#[derive(Default)]
pub struct RecordingProgress {
    fork_states: Mutex<Vec<ForkState>>,
    successes: Mutex<Vec<String>>,
    warnings: Mutex<Vec<String>>,
}

impl RecordingProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fork_states(&self) -> Vec<ForkState> {
        self.fork_states.lock().unwrap().clone()
    }

    pub fn successes(&self) -> Vec<String> {
        self.successes.lock().unwrap().clone()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.warnings.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProgressCallback for RecordingProgress {
    async fn on_command(&self, _working_dir: &Path, _command: &ShellCommand) {}
    async fn on_command_output(&self, _output: &str) {}

    async fn on_fork_state(&self, _repository: &str, state: &ForkState) {
        self.fork_states.lock().unwrap().push(state.clone());
    }

    async fn on_transfer_state(&self, _state: TransferState) {}
    async fn on_pull_request(&self, _patch_id: u64, _pr: &PullRequest) {}

    async fn on_success(&self, message: &str) {
        self.successes.lock().unwrap().push(message.to_string());
    }

    async fn on_warning(&self, message: &str) {
        self.warnings.lock().unwrap().push(message.to_string());
    }

    async fn on_message(&self, _message: &str) {}
}
