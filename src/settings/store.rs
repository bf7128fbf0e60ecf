//! Settings persistence

use crate::error::Result;
use crate::settings::SettingsTree;
use serde_yaml::Value;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Settings file relative to the project root
pub const DEFAULT_SETTINGS_FILE: &str = "Configuration/Settings.yaml";

/// Dotted path of the contributor settings inside the settings file
pub const DEFAULT_NAMESPACE: &str = "Neos.Contribute.gitHub";

/// Loads and saves the settings tree
pub trait SettingsStore {
    /// Read the current settings
    fn load(&self) -> Result<SettingsTree>;

    /// Persist the given settings
    fn save(&self, settings: &SettingsTree) -> Result<()>;
}

/// Settings stored under a namespace of a YAML document
///
/// Saving rewrites only the namespace; all other keys of the document are
/// preserved.
#[derive(Debug, Clone)]
pub struct YamlSettingsStore {
    path: PathBuf,
    namespace: String,
}

impl YamlSettingsStore {
    /// Create a store for the given file and namespace
    pub fn new(path: impl Into<PathBuf>, namespace: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            namespace: namespace.into(),
        }
    }

    /// Settings file location
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_document(&self) -> Result<SettingsTree> {
        match fs::read_to_string(&self.path) {
            Ok(content) if content.trim().is_empty() => Ok(SettingsTree::new()),
            Ok(content) => Ok(SettingsTree::from_value(serde_yaml::from_str(&content)?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(SettingsTree::new()),
            Err(e) => Err(e.into()),
        }
    }
}

impl SettingsStore for YamlSettingsStore {
    fn load(&self) -> Result<SettingsTree> {
        debug!(path = %self.path.display(), namespace = %self.namespace, "loading settings");
        let document = self.read_document()?;
        Ok(document
            .get(&self.namespace)
            .cloned()
            .map_or_else(SettingsTree::new, SettingsTree::from_value))
    }

    fn save(&self, settings: &SettingsTree) -> Result<()> {
        debug!(path = %self.path.display(), namespace = %self.namespace, "saving settings");
        let mut document = self.read_document()?;
        document.set(&self.namespace, settings.as_value().clone());

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_yaml::to_string::<Value>(document.as_value())?)?;
        Ok(())
    }
}
