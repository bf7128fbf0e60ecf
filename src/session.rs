//! Per-run context shared by the setup and transfer flows

use crate::error::Result;
use crate::git::{ShellCommand, ShellExecutor};
use crate::progress::ProgressCallback;
use crate::prompt::Prompter;
use crate::types::CommandResult;
use std::path::{Path, PathBuf};

/// Everything a flow needs to talk to git and to the user
pub struct Session<'a> {
    root: PathBuf,
    executor: ShellExecutor,
    prompter: &'a dyn Prompter,
    progress: &'a dyn ProgressCallback,
}

impl<'a> Session<'a> {
    /// Create a session rooted at the project directory
    pub fn new(
        root: impl Into<PathBuf>,
        executor: ShellExecutor,
        prompter: &'a dyn Prompter,
        progress: &'a dyn ProgressCallback,
    ) -> Self {
        Self {
            root: root.into(),
            executor,
            prompter,
            progress,
        }
    }

    /// Project root that package directories are resolved against
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Prompter for confirmation gates
    pub fn prompter(&self) -> &'a dyn Prompter {
        self.prompter
    }

    /// Progress reporting
    pub fn progress(&self) -> &'a dyn ProgressCallback {
        self.progress
    }

    /// Run git in `dir`, failing on a non-zero exit status
    pub async fn git(&self, args: &[&str], dir: &Path) -> Result<CommandResult> {
        self.run(ShellCommand::git(args.iter().copied()), dir, false)
            .await
    }

    /// Run git in `dir`, returning the result whatever the exit status
    pub async fn git_forced(&self, args: &[&str], dir: &Path) -> Result<CommandResult> {
        self.run(ShellCommand::git(args.iter().copied()), dir, true)
            .await
    }

    async fn run(&self, command: ShellCommand, dir: &Path, force: bool) -> Result<CommandResult> {
        self.progress.on_command(dir, &command).await;
        self.executor.execute(&command, dir, force)
    }
}
