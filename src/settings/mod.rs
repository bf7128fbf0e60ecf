//! Contributor settings
//!
//! Settings are a nested YAML tree addressed by dotted paths such as
//! `origin.repositories.flow.name` or `contributor.accessToken`. The tree is
//! owned by the running command, mutated in place and flushed through a
//! [`SettingsStore`] at explicit checkpoints.

mod defaults;
mod store;

pub use defaults::default_settings;
pub use store::{DEFAULT_NAMESPACE, DEFAULT_SETTINGS_FILE, SettingsStore, YamlSettingsStore};

use crate::error::{Error, Result};
use crate::types::{RepositoryBinding, RepositoryKind, Requiredness};
use serde::Deserialize;
use serde_yaml::{Mapping, Value};
use std::path::PathBuf;

/// Nested settings addressed by dotted paths
#[derive(Debug, Clone, PartialEq)]
pub struct SettingsTree {
    root: Value,
}

/// Shape of one entry below `origin.repositories`
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct OriginRepository {
    name: String,
    package_directory: PathBuf,
    #[serde(rename = "type")]
    kind: RepositoryKind,
    #[serde(default)]
    status: Requiredness,
}

impl Default for SettingsTree {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsTree {
    /// Empty settings
    pub fn new() -> Self {
        Self {
            root: Value::Mapping(Mapping::new()),
        }
    }

    /// Wrap an existing YAML value; anything but a mapping yields empty settings
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Mapping(_) => Self { root: value },
            _ => Self::new(),
        }
    }

    /// Underlying YAML value
    pub const fn as_value(&self) -> &Value {
        &self.root
    }

    /// Fill every key missing from this tree with the built-in defaults
    #[must_use]
    pub fn with_defaults(mut self) -> Self {
        fill_missing(&mut self.root, &default_settings());
        self
    }

    /// Value at a dotted path
    pub fn get(&self, path: &str) -> Option<&Value> {
        path.split('.').try_fold(&self.root, |current, segment| {
            current.as_mapping().and_then(|map| map.get(segment))
        })
    }

    /// Scalar at a dotted path rendered as a string; empty strings count as unset
    pub fn get_str(&self, path: &str) -> Option<String> {
        let text = match self.get(path)? {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            _ => return None,
        };
        (!text.is_empty()).then_some(text)
    }

    /// Set a value at a dotted path, creating intermediate mappings
    pub fn set(&mut self, path: &str, value: impl Into<Value>) {
        let mut current = &mut self.root;
        for segment in path.split('.') {
            if !current.is_mapping() {
                *current = Value::Mapping(Mapping::new());
            }
            let Some(map) = current.as_mapping_mut() else {
                return;
            };
            current = map
                .entry(Value::String(segment.to_string()))
                .or_insert(Value::Null);
        }
        *current = value.into();
    }

    /// `origin.organization`
    pub fn origin_organization(&self) -> Result<String> {
        self.get_str("origin.organization")
            .ok_or_else(|| Error::Config("origin.organization is not configured".to_string()))
    }

    /// `contributor.accessToken`, if set
    pub fn access_token(&self) -> Option<String> {
        self.get_str("contributor.accessToken")
    }

    /// Record the contributor's access token
    pub fn set_access_token(&mut self, token: &str) {
        self.set("contributor.accessToken", token);
    }

    /// Recorded fork name for a configured repository
    pub fn contributor_repository(&self, repository_name: &str) -> Option<String> {
        self.get_str(&format!("contributor.repositories.{repository_name}.name"))
    }

    /// Record the fork name for a configured repository
    pub fn set_contributor_repository(&mut self, repository_name: &str, fork_name: &str) {
        self.set(
            &format!("contributor.repositories.{repository_name}.name"),
            fork_name,
        );
    }

    /// All repositories configured below `origin.repositories`, in settings order
    pub fn bindings(&self) -> Result<Vec<RepositoryBinding>> {
        let Some(repositories) = self
            .get("origin.repositories")
            .and_then(Value::as_mapping)
        else {
            return Ok(Vec::new());
        };

        let origin_organization = self.origin_organization()?;
        let mut bindings = Vec::with_capacity(repositories.len());

        for (key, value) in repositories {
            let repository_name = key
                .as_str()
                .ok_or_else(|| Error::Config(format!("invalid repository key: {key:?}")))?
                .to_string();

            let entry: OriginRepository =
                serde_yaml::from_value(value.clone()).map_err(|e| {
                    Error::Config(format!(
                        "invalid settings for repository \"{repository_name}\": {e}"
                    ))
                })?;

            bindings.push(RepositoryBinding {
                contributor_repository_name: self.contributor_repository(&repository_name),
                repository_name,
                origin_organization: origin_organization.clone(),
                origin_repository_name: entry.name,
                package_directory: entry.package_directory,
                kind: entry.kind,
                requiredness: entry.status,
            });
        }

        Ok(bindings)
    }
}

fn fill_missing(target: &mut Value, defaults: &Value) {
    if target.is_null() {
        *target = defaults.clone();
        return;
    }
    if let (Value::Mapping(target), Value::Mapping(defaults)) = (target, defaults) {
        for (key, default) in defaults {
            match target.get_mut(key) {
                Some(existing) => fill_missing(existing, default),
                None => {
                    target.insert(key.clone(), default.clone());
                }
            }
        }
    }
}
