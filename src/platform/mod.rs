//! Hosting platform services
//!
//! Abstracts the GitHub operations the setup and transfer flows need: fork
//! lookup and creation, repository URLs and pull request creation.

mod factory;
mod github;

pub use factory::create_hosting_service;
pub use github::GitHubService;

use crate::error::Result;
use crate::types::{Fork, PullRequest};
use async_trait::async_trait;

/// Hosting platform service trait
///
/// Implementations are already authenticated; every repository name without
/// an organization refers to the contributor's own account.
#[async_trait]
pub trait HostingService: Send + Sync {
    /// Login of the authenticated contributor
    fn login(&self) -> &str;

    /// Whether the contributor owns a repository with this name
    async fn repository_exists(&self, name: &str) -> Result<bool>;

    /// Web URL of a contributor repository
    fn http_url(&self, name: &str) -> String;

    /// SSH clone URL of a contributor repository
    fn ssh_url(&self, name: &str) -> String;

    /// Anonymous clone URL of a canonical repository
    fn upstream_url(&self, organization: &str, name: &str) -> String;

    /// Fork `organization/name` into the contributor's account
    async fn fork_repository(&self, organization: &str, name: &str) -> Result<Fork>;

    /// Open a pull request from a contributor branch against the canonical repository
    async fn open_pull_request(
        &self,
        repository: &str,
        branch: &str,
        title: &str,
        body: &str,
    ) -> Result<PullRequest>;
}
