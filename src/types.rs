//! Core types for neos-contribute

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Whether a configured repository is a single package or a collection of packages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepositoryKind {
    /// One package checked out on its own
    Package,
    /// A development collection holding several packages
    Collection,
}

/// Whether a repository must be installed locally
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Requiredness {
    /// Missing working copy is reported as a problem
    Required,
    /// Missing working copy is silently skipped
    #[default]
    Optional,
}

/// One logical repository across the origin organization and the contributor account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryBinding {
    /// Key under `origin.repositories` (e.g. "flow")
    pub repository_name: String,
    /// Organization owning the canonical repository
    pub origin_organization: String,
    /// Repository name inside the origin organization
    pub origin_repository_name: String,
    /// Name of the contributor's fork, once found or created
    pub contributor_repository_name: Option<String>,
    /// Working copy location relative to the project root
    pub package_directory: PathBuf,
    /// Package or collection
    pub kind: RepositoryKind,
    /// Required or optional
    pub requiredness: Requiredness,
}

impl RepositoryBinding {
    /// Repository name with its first letter upper-cased, for prompts
    pub fn display_name(&self) -> String {
        let mut chars = self.repository_name.chars();
        chars.next().map_or_else(String::new, |first| {
            first.to_uppercase().chain(chars).collect()
        })
    }
}

/// A Gerrit change resolved against the local installation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchRequest {
    /// Gerrit change number
    pub patch_id: u64,
    /// Package key the change targets (e.g. "TYPO3.Flow")
    pub package_key: String,
    /// Local path of the package
    pub package_path: PathBuf,
    /// Parent directory of the package; all git commands run here
    pub collection_path: PathBuf,
    /// Mailbox patch downloaded from Gerrit
    pub patch_file: PathBuf,
}

impl PatchRequest {
    /// Local branch name and push ref for this change
    pub fn branch_name(&self) -> String {
        self.patch_id.to_string()
    }
}

/// Outcome of a single command invocation
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandResult {
    /// Process exit status (-1 when terminated by a signal)
    pub exit_code: i32,
    /// stdout followed by stderr
    pub output: String,
}

impl CommandResult {
    /// Whether the command exited with status 0
    pub const fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Package targeted by a Gerrit change
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetPackage {
    /// Package key (e.g. "TYPO3.Neos")
    pub package_key: String,
    /// Local path of the package
    pub package_path: PathBuf,
}

/// Commit metadata of a Gerrit change
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitDetails {
    /// First line of the commit message
    pub subject: String,
    /// Full commit message including the subject
    pub message: String,
}

/// A fork created on the hosting platform
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fork {
    /// `owner/name` of the new fork
    pub full_name: String,
    /// Web URL of the fork
    pub html_url: String,
}

/// A pull request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequest {
    /// PR number
    pub number: u64,
    /// Web URL for the PR
    pub html_url: String,
    /// Head ref (`owner:branch`)
    pub head_ref: String,
    /// Base branch name
    pub base_ref: String,
    /// PR title
    pub title: String,
}

impl fmt::Display for RepositoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Package => write!(f, "package"),
            Self::Collection => write!(f, "collection"),
        }
    }
}
