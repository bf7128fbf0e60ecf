//! CLI commands
//!
//! Command implementations for the `contribute` binary.

mod progress;
mod prompt;
mod setup;
pub mod style;
mod transfer;

pub use setup::run_setup;
pub use transfer::run_create_pull_request;

use neos_contribute::settings::{DEFAULT_NAMESPACE, DEFAULT_SETTINGS_FILE, YamlSettingsStore};
use std::path::PathBuf;

/// Options shared by all commands
pub struct CommandContext {
    /// Project root, canonicalized
    pub root: PathBuf,
    /// Settings file override
    pub settings_file: Option<PathBuf>,
    /// Gerrit server URL
    pub gerrit_url: String,
    /// Print state transitions
    pub verbose: bool,
}

impl CommandContext {
    /// Store for the contributor settings
    pub fn settings_store(&self) -> YamlSettingsStore {
        let path = self
            .settings_file
            .clone()
            .unwrap_or_else(|| self.root.join(DEFAULT_SETTINGS_FILE));
        YamlSettingsStore::new(path, DEFAULT_NAMESPACE)
    }
}
