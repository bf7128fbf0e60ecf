//! Mock command runners, prompter and settings store
//!
//! These are test utilities - not all may be used in current tests but are
//! available for future test development.

#![allow(dead_code)]

use neos_contribute::error::{Error, Result};
use neos_contribute::git::{CommandRunner, ShellCommand};
use neos_contribute::prompt::Prompter;
use neos_contribute::settings::{SettingsStore, SettingsTree};
use neos_contribute::types::CommandResult;
use std::collections::{BTreeMap, VecDeque};
use std::env;
use std::path::PathBuf;
use std::sync::Mutex;

/// Call record for a command run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandCall {
    /// Process directory while the command ran
    pub cwd: PathBuf,
    /// Rendered command line
    pub command: String,
}

/// Records every command and answers from a script
///
/// Responses are matched by prefix against the rendered command line; the
/// first matching entry wins. Unmatched commands succeed with empty output.
pub struct RecordingRunner {
    calls: Mutex<Vec<CommandCall>>,
    responses: Mutex<Vec<(String, CommandResult)>>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            responses: Mutex::new(Vec::new()),
        }
    }

    /// Answer commands starting with `prefix` with `output`
    pub fn respond(&self, prefix: &str, output: &str) {
        self.respond_with(prefix, 0, output);
    }

    /// Answer commands starting with `prefix` with an exit status and output
    pub fn respond_with(&self, prefix: &str, exit_code: i32, output: &str) {
        self.responses.lock().unwrap().push((
            prefix.to_string(),
            CommandResult {
                exit_code,
                output: output.to_string(),
            },
        ));
    }

    /// All calls in order
    pub fn calls(&self) -> Vec<CommandCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Rendered command lines in order
    pub fn commands(&self) -> Vec<String> {
        self.calls().into_iter().map(|c| c.command).collect()
    }

    /// Assert that no command line starts with `prefix`
    pub fn assert_not_run(&self, prefix: &str) {
        let commands = self.commands();
        assert!(
            !commands.iter().any(|c| c.starts_with(prefix)),
            "Expected no `{prefix}` command but got: {commands:?}"
        );
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, command: &ShellCommand) -> Result<CommandResult> {
        let rendered = command.to_string();
        self.calls.lock().unwrap().push(CommandCall {
            cwd: env::current_dir()?,
            command: rendered.clone(),
        });

        let responses = self.responses.lock().unwrap();
        Ok(responses
            .iter()
            .find(|(prefix, _)| rendered.starts_with(prefix.as_str()))
            .map(|(_, result)| result.clone())
            .unwrap_or_default())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FakeRemote {
    pub url: String,
    pub extra_fetch: Vec<String>,
}

/// Keeps track of remotes the way git does for the commands reconciliation uses
///
/// `remote rm` fails for an unknown remote and `remote add` fails for an
/// existing one, matching git's exit statuses.
pub struct FakeGitRunner {
    remotes: Mutex<BTreeMap<String, FakeRemote>>,
    commands: Mutex<Vec<String>>,
}

impl FakeGitRunner {
    pub fn new() -> Self {
        Self {
            remotes: Mutex::new(BTreeMap::new()),
            commands: Mutex::new(Vec::new()),
        }
    }

    /// Start with an existing remote
    pub fn with_remote(self, name: &str, url: &str) -> Self {
        self.remotes.lock().unwrap().insert(
            name.to_string(),
            FakeRemote {
                url: url.to_string(),
                extra_fetch: Vec::new(),
            },
        );
        self
    }

    /// Current remote configuration
    pub fn remotes(&self) -> BTreeMap<String, FakeRemote> {
        self.remotes.lock().unwrap().clone()
    }

    /// Rendered command lines in order
    pub fn commands(&self) -> Vec<String> {
        self.commands.lock().unwrap().clone()
    }

    fn handle(&self, args: &[String]) -> CommandResult {
        let mut remotes = self.remotes.lock().unwrap();
        let args: Vec<&str> = args.iter().map(String::as_str).collect();

        match args.as_slice() {
            ["remote", "rm", name] => {
                if remotes.remove(*name).is_some() {
                    ok("")
                } else {
                    failed(2, &format!("error: No such remote: '{name}'\n"))
                }
            }
            ["remote", "add", name, url] => {
                if remotes.contains_key(*name) {
                    failed(3, &format!("error: remote {name} already exists.\n"))
                } else {
                    remotes.insert(
                        (*name).to_string(),
                        FakeRemote {
                            url: (*url).to_string(),
                            extra_fetch: Vec::new(),
                        },
                    );
                    ok("")
                }
            }
            ["config", "--add", key, value] => {
                let name = key
                    .strip_prefix("remote.")
                    .and_then(|k| k.strip_suffix(".fetch"));
                match name.and_then(|n| remotes.get_mut(n)) {
                    Some(remote) => {
                        remote.extra_fetch.push((*value).to_string());
                        ok("")
                    }
                    None => ok(""),
                }
            }
            ["branch", "-u", upstream, _] => {
                let remote = upstream.split('/').next().unwrap_or_default();
                if remotes.contains_key(remote) {
                    ok("")
                } else {
                    failed(128, &format!("fatal: the requested upstream branch '{upstream}' does not exist\n"))
                }
            }
            _ => ok(""),
        }
    }
}

impl CommandRunner for FakeGitRunner {
    fn run(&self, command: &ShellCommand) -> Result<CommandResult> {
        self.commands.lock().unwrap().push(command.to_string());
        Ok(self.handle(command.arguments()))
    }
}

fn ok(output: &str) -> CommandResult {
    CommandResult {
        exit_code: 0,
        output: output.to_string(),
    }
}

fn failed(exit_code: i32, output: &str) -> CommandResult {
    CommandResult {
        exit_code,
        output: output.to_string(),
    }
}

/// Answers questions from prepared queues
///
/// Running out of answers is an error, so tests fail on unexpected questions.
pub struct ScriptedPrompter {
    confirms: Mutex<VecDeque<bool>>,
    inputs: Mutex<VecDeque<String>>,
    secrets: Mutex<VecDeque<String>>,
    questions: Mutex<Vec<String>>,
}

impl ScriptedPrompter {
    /// Prompter answering yes/no questions in order
    pub fn new(confirms: &[bool]) -> Self {
        Self {
            confirms: Mutex::new(confirms.iter().copied().collect()),
            inputs: Mutex::new(VecDeque::new()),
            secrets: Mutex::new(VecDeque::new()),
            questions: Mutex::new(Vec::new()),
        }
    }

    /// Queue a free-form answer
    pub fn with_input(self, answer: &str) -> Self {
        self.inputs.lock().unwrap().push_back(answer.to_string());
        self
    }

    /// Queue a hidden answer
    pub fn with_secret(self, answer: &str) -> Self {
        self.secrets.lock().unwrap().push_back(answer.to_string());
        self
    }

    /// Every question asked, in order
    pub fn questions(&self) -> Vec<String> {
        self.questions.lock().unwrap().clone()
    }

    fn record(&self, question: &str) {
        self.questions.lock().unwrap().push(question.to_string());
    }
}

impl Prompter for ScriptedPrompter {
    fn confirm(&self, question: &str, _default: bool) -> Result<bool> {
        self.record(question);
        self.confirms
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| Error::Prompt(format!("unexpected question: {question}")))
    }

    fn input(&self, question: &str) -> Result<String> {
        self.record(question);
        self.inputs
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| Error::Prompt(format!("unexpected question: {question}")))
    }

    fn secret(&self, question: &str) -> Result<String> {
        self.record(question);
        self.secrets
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| Error::Prompt(format!("unexpected question: {question}")))
    }
}

/// Settings store keeping every saved snapshot in memory
pub struct MemorySettingsStore {
    initial: SettingsTree,
    saved: Mutex<Vec<SettingsTree>>,
}

impl MemorySettingsStore {
    pub fn new(initial: SettingsTree) -> Self {
        Self {
            initial,
            saved: Mutex::new(Vec::new()),
        }
    }

    /// Number of `save` calls
    pub fn save_count(&self) -> usize {
        self.saved.lock().unwrap().len()
    }

    /// Every saved snapshot, oldest first
    pub fn saved(&self) -> Vec<SettingsTree> {
        self.saved.lock().unwrap().clone()
    }

    /// Most recently saved settings
    pub fn last_saved(&self) -> Option<SettingsTree> {
        self.saved.lock().unwrap().last().cloned()
    }
}

impl SettingsStore for MemorySettingsStore {
    fn load(&self) -> Result<SettingsTree> {
        Ok(self.last_saved().unwrap_or_else(|| self.initial.clone()))
    }

    fn save(&self, settings: &SettingsTree) -> Result<()> {
        self.saved.lock().unwrap().push(settings.clone());
        Ok(())
    }
}
