//! Setup flow over all configured repositories

use crate::auth::discover_github_token;
use crate::bootstrap::{ForkState, setup_fork};
use crate::error::{Error, Result};
use crate::platform::HostingService;
use crate::session::Session;
use crate::settings::{SettingsStore, SettingsTree};
use crate::types::{RepositoryKind, Requiredness};

/// Options for the setup flow
#[derive(Debug, Clone, Copy, Default)]
pub struct SetupOptions {
    /// Skip the per-repository confirmation
    pub force: bool,
}

/// What happened to each configured repository
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SetupSummary {
    /// Repositories whose remotes now point at the contributor fork
    pub configured: Vec<String>,
    /// Repositories the user chose not to set up
    pub declined: Vec<String>,
    /// Optional repositories not installed locally
    pub skipped: Vec<String>,
    /// Required repositories not installed locally
    pub missing_required: Vec<String>,
}

/// Make sure a GitHub access token is available
///
/// Returns `true` when the user entered a new token that was written to the
/// settings.
pub async fn ensure_access_token(session: &Session<'_>, settings: &mut SettingsTree) -> Result<bool> {
    if settings.access_token().is_some() {
        return Ok(false);
    }

    if let Some(auth) = discover_github_token().await {
        session
            .progress()
            .on_message(&format!("Using GitHub token from {:?}", auth.source))
            .await;
        return Ok(false);
    }

    prompt_for_access_token(session, settings).await?;
    Ok(true)
}

/// Ask for an access token and record it in the settings
pub async fn prompt_for_access_token(session: &Session<'_>, settings: &mut SettingsTree) -> Result<()> {
    session
        .progress()
        .on_message(
            "In order to perform actions on GitHub, you have to configure an access token.\n\
             This can be done on https://github.com/settings/tokens/new.\n\
             Note that this wizard only needs the 'public_repo' scope.",
        )
        .await;

    let token = session
        .prompter()
        .secret("Please enter your GitHub access token (will not be displayed)")?;
    let token = token.trim();
    if token.is_empty() {
        return Err(Error::Config("no access token entered".to_string()));
    }

    settings.set_access_token(token);
    Ok(())
}

/// Everything `setup` does once the contributor is authenticated
///
/// Settings are saved right away, so a token entered during this run is kept
/// even if a later repository fails; then every repository is set up.
pub async fn setup_contributor(
    session: &Session<'_>,
    settings: &mut SettingsTree,
    store: &dyn SettingsStore,
    hosting: &dyn HostingService,
    options: SetupOptions,
) -> Result<SetupSummary> {
    session
        .progress()
        .on_success(&format!(
            "Authentication to GitHub was successful! Logged in as {}",
            hosting.login()
        ))
        .await;
    store.save(settings)?;

    setup_repositories(session, settings, store, hosting, options).await
}

/// Run the fork bootstrap for every configured repository that is installed locally
pub async fn setup_repositories(
    session: &Session<'_>,
    settings: &mut SettingsTree,
    store: &dyn SettingsStore,
    hosting: &dyn HostingService,
    options: SetupOptions,
) -> Result<SetupSummary> {
    let progress = session.progress();
    let mut summary = SetupSummary::default();

    for binding in settings.bindings()? {
        let name = binding.repository_name.clone();
        let directory = session.root().join(&binding.package_directory);

        if !directory.is_dir() {
            match binding.requiredness {
                Requiredness::Required => {
                    progress
                        .on_warning(&format!(
                            "Looks like you do not have the {} repository locally ({})\n\
                             Check your composer.json and run composer update first",
                            binding.display_name(),
                            directory.display()
                        ))
                        .await;
                    summary.missing_required.push(name);
                }
                Requiredness::Optional => {
                    progress
                        .on_message(&format!(
                            "Repository \"{}\" skipped, because not installed locally",
                            binding.display_name()
                        ))
                        .await;
                    summary.skipped.push(name);
                }
            }
            continue;
        }

        let question = match binding.kind {
            RepositoryKind::Package => format!(
                "Would you like to setup/check the package at path '{}'?",
                binding.package_directory.display()
            ),
            RepositoryKind::Collection => format!(
                "Would you like to setup/check the {} Development Collection?",
                binding.display_name()
            ),
        };

        if !options.force && !session.prompter().confirm(&question, true)? {
            summary.declined.push(name);
            continue;
        }

        match setup_fork(session, settings, store, hosting, &binding).await? {
            ForkState::RemotesConfigured(_) => summary.configured.push(name),
            _ => summary.declined.push(name),
        }
    }

    Ok(summary)
}
