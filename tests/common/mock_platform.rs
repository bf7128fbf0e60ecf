//! Mock hosting and review services for testing
//!
//! These are test utilities - not all may be used in current tests but are
//! available for future test development.

#![allow(dead_code)]

use async_trait::async_trait;
use neos_contribute::error::{Error, Result};
use neos_contribute::platform::HostingService;
use neos_contribute::review::ReviewService;
use neos_contribute::types::{CommitDetails, Fork, PullRequest, TargetPackage};
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

/// Call record for `open_pull_request`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenPrCall {
    pub repository: String,
    pub branch: String,
    pub title: String,
    pub body: String,
}

/// Simple mock hosting service for testing
///
/// Features:
/// - Configurable set of repositories owned by the contributor
/// - Auto-incrementing PR numbers
/// - Call tracking for verification
/// - Error injection for failure path testing
pub struct MockHostingService {
    login: String,
    next_pr_number: AtomicU64,
    existing: Mutex<HashSet<String>>,
    // Call tracking
    exists_calls: Mutex<Vec<String>>,
    fork_calls: Mutex<Vec<(String, String)>>,
    open_pr_calls: Mutex<Vec<OpenPrCall>>,
    // Error injection
    error_on_fork: Mutex<Option<(String, Option<u16>)>>,
}

impl MockHostingService {
    /// Create a mock authenticated as `login`
    pub fn new(login: &str) -> Self {
        Self {
            login: login.to_string(),
            next_pr_number: AtomicU64::new(1),
            existing: Mutex::new(HashSet::new()),
            exists_calls: Mutex::new(Vec::new()),
            fork_calls: Mutex::new(Vec::new()),
            open_pr_calls: Mutex::new(Vec::new()),
            error_on_fork: Mutex::new(None),
        }
    }

    /// Pretend the contributor owns a repository with this name
    pub fn add_repository(&self, name: &str) {
        self.existing.lock().unwrap().insert(name.to_string());
    }

    // === Error injection methods ===

    /// Make `fork_repository` fail with an API error
    pub fn fail_fork(&self, msg: &str, code: Option<u16>) {
        *self.error_on_fork.lock().unwrap() = Some((msg.to_string(), code));
    }

    // === Call verification methods ===

    /// Names `repository_exists` was called with
    pub fn get_exists_calls(&self) -> Vec<String> {
        self.exists_calls.lock().unwrap().clone()
    }

    /// `(organization, name)` pairs `fork_repository` was called with
    pub fn get_fork_calls(&self) -> Vec<(String, String)> {
        self.fork_calls.lock().unwrap().clone()
    }

    /// All `open_pull_request` calls
    pub fn get_open_pr_calls(&self) -> Vec<OpenPrCall> {
        self.open_pr_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl HostingService for MockHostingService {
    fn login(&self) -> &str {
        &self.login
    }

    async fn repository_exists(&self, name: &str) -> Result<bool> {
        self.exists_calls.lock().unwrap().push(name.to_string());
        Ok(self.existing.lock().unwrap().contains(name))
    }

    fn http_url(&self, name: &str) -> String {
        format!("https://github.com/{}/{name}", self.login)
    }

    fn ssh_url(&self, name: &str) -> String {
        format!("git@github.com:{}/{name}.git", self.login)
    }

    fn upstream_url(&self, organization: &str, name: &str) -> String {
        format!("https://github.com/{organization}/{name}.git")
    }

    async fn fork_repository(&self, organization: &str, name: &str) -> Result<Fork> {
        self.fork_calls
            .lock()
            .unwrap()
            .push((organization.to_string(), name.to_string()));

        // Check for injected error
        if let Some((message, code)) = self.error_on_fork.lock().unwrap().clone() {
            return Err(Error::Api { message, code });
        }

        self.add_repository(name);
        Ok(Fork {
            full_name: format!("{}/{name}", self.login),
            html_url: self.http_url(name),
        })
    }

    async fn open_pull_request(
        &self,
        repository: &str,
        branch: &str,
        title: &str,
        body: &str,
    ) -> Result<PullRequest> {
        self.open_pr_calls.lock().unwrap().push(OpenPrCall {
            repository: repository.to_string(),
            branch: branch.to_string(),
            title: title.to_string(),
            body: body.to_string(),
        });

        let number = self.next_pr_number.fetch_add(1, Ordering::SeqCst);
        Ok(PullRequest {
            number,
            html_url: format!("https://github.com/neos/{repository}/pull/{number}"),
            head_ref: format!("{}:{branch}", self.login),
            base_ref: "master".to_string(),
            title: title.to_string(),
        })
    }
}

/// Mock Gerrit returning one fixed change
pub struct MockReviewService {
    target: TargetPackage,
    patch_file: PathBuf,
    details: CommitDetails,
    commit_details_calls: AtomicU64,
}

impl MockReviewService {
    /// Change targeting `target`, stored at `patch_file`
    pub fn new(target: TargetPackage, patch_file: PathBuf, details: CommitDetails) -> Self {
        Self {
            target,
            patch_file,
            details,
            commit_details_calls: AtomicU64::new(0),
        }
    }

    /// How often the commit message was requested
    pub fn commit_details_calls(&self) -> u64 {
        self.commit_details_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ReviewService for MockReviewService {
    async fn resolve_target_package(&self, _patch_id: u64) -> Result<TargetPackage> {
        Ok(self.target.clone())
    }

    async fn fetch_patch_file(&self, _patch_id: u64) -> Result<PathBuf> {
        Ok(self.patch_file.clone())
    }

    async fn commit_details(&self, _patch_id: u64) -> Result<CommitDetails> {
        self.commit_details_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.details.clone())
    }
}
