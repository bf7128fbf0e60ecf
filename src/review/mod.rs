//! Review system services
//!
//! Fetches change metadata and patches from Gerrit.

mod gerrit;

pub use gerrit::{DEFAULT_GERRIT_URL, GerritService};

use crate::error::Result;
use crate::types::{CommitDetails, TargetPackage};
use async_trait::async_trait;
use std::path::PathBuf;

/// Review system service trait
#[async_trait]
pub trait ReviewService: Send + Sync {
    /// Package the change targets, resolved against the local installation
    async fn resolve_target_package(&self, patch_id: u64) -> Result<TargetPackage>;

    /// Download the change as a mailbox patch and return its location
    async fn fetch_patch_file(&self, patch_id: u64) -> Result<PathBuf>;

    /// Subject and full message of the change's current revision
    async fn commit_details(&self, patch_id: u64) -> Result<CommitDetails>;
}
