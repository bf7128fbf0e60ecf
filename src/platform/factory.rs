//! Hosting service factory
//!
//! Creates an authenticated hosting service from the settings.

use crate::auth::get_github_auth;
use crate::error::Result;
use crate::platform::{GitHubService, HostingService};
use crate::settings::SettingsTree;
use std::env;

/// Authenticate against GitHub using the persisted settings
///
/// `GH_HOST` selects a GitHub Enterprise instance.
pub async fn create_hosting_service(settings: &SettingsTree) -> Result<Box<dyn HostingService>> {
    let auth = get_github_auth(settings).await?;
    let organization = settings.origin_organization()?;
    let host = env::var("GH_HOST").ok().filter(|h| !h.is_empty());

    Ok(Box::new(
        GitHubService::connect(&auth.token, organization, host).await?,
    ))
}
