//! Command execution with fail-fast semantics
//!
//! Every git invocation goes through [`ShellExecutor::execute`], which switches
//! into the requested working directory for the duration of the command,
//! restores the previous directory on every exit path, and turns a non-zero
//! exit status into [`Error::CommandFailed`] unless the call was forced.

use crate::error::{Error, Result};
use crate::types::CommandResult;
use std::env;
use std::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Arc;
use tracing::{debug, warn};

/// Exit status used when the program could not be found
const COMMAND_NOT_FOUND: i32 = 127;

/// A program with its arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellCommand {
    program: String,
    args: Vec<String>,
}

impl ShellCommand {
    /// Command without arguments
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// `git` with the given arguments
    pub fn git<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new("git").args(args)
    }

    /// Append several arguments
    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Program name
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments
    pub fn arguments(&self) -> &[String] {
        &self.args
    }
}

impl fmt::Display for ShellCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                write!(f, " '{arg}'")?;
            } else {
                write!(f, " {arg}")?;
            }
        }
        Ok(())
    }
}

/// Runs a command in the current process directory
pub trait CommandRunner: Send + Sync {
    /// Run to completion and capture stdout and stderr
    fn run(&self, command: &ShellCommand) -> Result<CommandResult>;
}

/// Runner spawning real processes
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, command: &ShellCommand) -> Result<CommandResult> {
        let output = match Command::new(command.program())
            .args(command.arguments())
            .output()
        {
            Ok(output) => output,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Ok(CommandResult {
                    exit_code: COMMAND_NOT_FOUND,
                    output: format!("{}: command not found\n", command.program()),
                });
            }
            Err(e) => return Err(e.into()),
        };

        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));

        Ok(CommandResult {
            exit_code: output.status.code().unwrap_or(-1),
            output: combined,
        })
    }
}

/// Switches the process working directory and restores it when dropped
#[derive(Debug)]
pub struct WorkingDirGuard {
    previous: PathBuf,
}

impl WorkingDirGuard {
    /// Remember the current directory and switch to `dir`
    pub fn enter(dir: &Path) -> Result<Self> {
        let previous = env::current_dir()?;
        env::set_current_dir(dir).map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                Error::DirectoryNotFound(dir.to_path_buf())
            } else {
                Error::Io(e)
            }
        })?;
        Ok(Self { previous })
    }
}

impl Drop for WorkingDirGuard {
    fn drop(&mut self) {
        if let Err(e) = env::set_current_dir(&self.previous) {
            warn!(
                directory = %self.previous.display(),
                "failed to restore working directory: {e}"
            );
        }
    }
}

/// Executes commands inside a working directory
#[derive(Clone)]
pub struct ShellExecutor {
    runner: Arc<dyn CommandRunner>,
}

impl Default for ShellExecutor {
    fn default() -> Self {
        Self::new(Arc::new(SystemRunner))
    }
}

impl ShellExecutor {
    /// Executor backed by the given runner
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self { runner }
    }

    /// Run `command` inside `working_dir`
    ///
    /// Fails with [`Error::DirectoryNotFound`] when the directory is missing and
    /// with [`Error::CommandFailed`] on a non-zero exit status unless `force`
    /// is set, in which case the result is returned as is. The previous
    /// working directory is restored before this returns.
    pub fn execute(
        &self,
        command: &ShellCommand,
        working_dir: &Path,
        force: bool,
    ) -> Result<CommandResult> {
        if !working_dir.is_dir() {
            return Err(Error::DirectoryNotFound(working_dir.to_path_buf()));
        }

        let result = {
            let _guard = WorkingDirGuard::enter(working_dir)?;
            self.runner.run(command)?
        };

        debug!(
            directory = %working_dir.display(),
            exit_code = result.exit_code,
            forced = force,
            "{command}"
        );

        if !result.success() && !force {
            return Err(Error::CommandFailed {
                command: command.to_string(),
                code: result.exit_code,
                output: result.output,
            });
        }

        Ok(result)
    }
}
