//! GitHub token resolution

use crate::auth::AuthSource;
use crate::error::{Error, Result};
use crate::settings::SettingsTree;
use std::env;
use tokio::process::Command;
use tracing::debug;

/// GitHub authentication configuration
#[derive(Debug, Clone)]
pub struct GitHubAuthConfig {
    /// Authentication token
    pub token: String,
    /// Where the token was obtained from
    pub source: AuthSource,
}

/// Get GitHub authentication
///
/// Priority:
/// 1. `contributor.accessToken` from the settings
/// 2. `GITHUB_TOKEN` / `GH_TOKEN` environment variables
/// 3. gh CLI (`gh auth token`)
pub async fn get_github_auth(settings: &SettingsTree) -> Result<GitHubAuthConfig> {
    if let Some(token) = settings.access_token() {
        return Ok(GitHubAuthConfig {
            token,
            source: AuthSource::Settings,
        });
    }

    discover_github_token().await.ok_or_else(|| {
        Error::Config(
            "no GitHub access token configured (contributor.accessToken, GITHUB_TOKEN or `gh auth login`)"
                .to_string(),
        )
    })
}

/// Look for a token outside the settings
pub async fn discover_github_token() -> Option<GitHubAuthConfig> {
    for var in ["GITHUB_TOKEN", "GH_TOKEN"] {
        if let Ok(token) = env::var(var) {
            if !token.trim().is_empty() {
                debug!("using GitHub token from {var}");
                return Some(GitHubAuthConfig {
                    token,
                    source: AuthSource::EnvVar,
                });
            }
        }
    }

    get_gh_cli_token().await.map(|token| GitHubAuthConfig {
        token,
        source: AuthSource::Cli,
    })
}

async fn get_gh_cli_token() -> Option<String> {
    // Check authenticated
    let status = Command::new("gh")
        .args(["auth", "status"])
        .output()
        .await
        .ok()?;

    if !status.status.success() {
        return None;
    }

    // Get token
    let output = Command::new("gh")
        .args(["auth", "token"])
        .output()
        .await
        .ok()?;

    if !output.status.success() {
        return None;
    }

    let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if token.is_empty() {
        None
    } else {
        debug!("using GitHub token from gh CLI");
        Some(token)
    }
}
