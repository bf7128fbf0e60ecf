//! GitHub authentication
//!
//! Supports a token stored in the settings, environment variables and the
//! `gh` CLI.

mod github;

pub use github::{GitHubAuthConfig, discover_github_token, get_github_auth};

/// Source of authentication token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthSource {
    /// Token stored under `contributor.accessToken`
    Settings,
    /// Token from CLI tool (gh)
    Cli,
    /// Token from environment variable
    EnvVar,
}
