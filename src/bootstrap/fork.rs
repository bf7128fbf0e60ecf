//! Fork bootstrap state machine
//!
//! Makes sure the contributor has a fork of one configured repository (found
//! on record, named by the user, or created through the hosting API), records
//! it in the settings and reconciles the working copy's remotes.

use crate::error::{Error, Result};
use crate::git::reconcile_remotes;
use crate::platform::HostingService;
use crate::session::Session;
use crate::settings::{SettingsStore, SettingsTree};
use crate::types::RepositoryBinding;
use std::fmt;
use tracing::debug;

/// States of the fork bootstrap for one repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ForkState {
    /// Nothing checked yet
    NoForkConfigured,
    /// A fork name is on record and is being verified
    CheckingExistingFork(String),
    /// The recorded fork exists
    ForkFound(String),
    /// No usable fork on record
    ForkMissingRecord,
    /// The user named an existing fork
    RecordExistingFork(String),
    /// The fork is being created through the hosting API
    CreateForkViaApi,
    /// The fork name was written to the settings and saved
    SettingsPersisted(String),
    /// Remotes point at the fork (terminal)
    RemotesConfigured(String),
    /// The user neither has a fork nor wants one created (terminal)
    Declined,
}

impl ForkState {
    /// Whether the state machine stops here
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::RemotesConfigured(_) | Self::Declined)
    }
}

impl fmt::Display for ForkState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoForkConfigured => write!(f, "Looking for a fork"),
            Self::CheckingExistingFork(name) => write!(f, "Checking fork {name}"),
            Self::ForkFound(name) => write!(f, "Found fork {name}"),
            Self::ForkMissingRecord => write!(f, "No fork on record"),
            Self::RecordExistingFork(name) => write!(f, "Recording fork {name}"),
            Self::CreateForkViaApi => write!(f, "Creating fork"),
            Self::SettingsPersisted(name) => write!(f, "Saved fork {name}"),
            Self::RemotesConfigured(name) => write!(f, "Remotes configured for {name}"),
            Self::Declined => write!(f, "Skipped"),
        }
    }
}

/// Run the fork bootstrap for one repository until it reaches a terminal state
///
/// Settings are saved exactly once when a fork name is newly recorded; a fork
/// already on record that still exists goes straight to remote reconciliation.
pub async fn setup_fork(
    session: &Session<'_>,
    settings: &mut SettingsTree,
    store: &dyn SettingsStore,
    hosting: &dyn HostingService,
    binding: &RepositoryBinding,
) -> Result<ForkState> {
    let progress = session.progress();
    let display_name = binding.display_name();
    let mut state = ForkState::NoForkConfigured;

    loop {
        progress
            .on_fork_state(&binding.repository_name, &state)
            .await;
        debug!(repository = %binding.repository_name, state = ?state, "fork bootstrap");

        if state.is_terminal() {
            return Ok(state);
        }

        state = match state {
            ForkState::NoForkConfigured => {
                match settings.contributor_repository(&binding.repository_name) {
                    Some(name) => ForkState::CheckingExistingFork(name),
                    None => ForkState::ForkMissingRecord,
                }
            }

            ForkState::CheckingExistingFork(name) => {
                if hosting.repository_exists(&name).await? {
                    progress
                        .on_success(&format!(
                            "A fork of the \"{}\" repository was found in your GitHub account!",
                            binding.repository_name
                        ))
                        .await;
                    ForkState::ForkFound(name)
                } else {
                    progress
                        .on_warning(&format!(
                            "A fork of \"{}\" was configured, but was not found at \"{}\" in your GitHub account.",
                            binding.repository_name,
                            hosting.http_url(&name)
                        ))
                        .await;
                    ForkState::ForkMissingRecord
                }
            }

            ForkState::ForkFound(name) | ForkState::SettingsPersisted(name) => {
                configure_remotes(session, hosting, binding, &name).await?;
                ForkState::RemotesConfigured(name)
            }

            ForkState::ForkMissingRecord => {
                progress
                    .on_message(&format!("Setup \"{display_name}\" Repository"))
                    .await;
                ask_for_fork(session, &display_name)?
            }

            ForkState::RecordExistingFork(name) => {
                if name.is_empty() || !hosting.repository_exists(&name).await? {
                    return Err(Error::ForkNotFound(name));
                }
                record_fork(settings, store, binding, &name)?;
                ForkState::SettingsPersisted(name)
            }

            ForkState::CreateForkViaApi => {
                let organization = &binding.origin_organization;
                let repository = &binding.origin_repository_name;
                let fork = hosting
                    .fork_repository(organization, repository)
                    .await
                    .map_err(|e| match e {
                        Error::Api { message, code } => Error::Api {
                            message: format!(
                                "error while forking {organization}/{repository}: {message}"
                            ),
                            code,
                        },
                        other => other,
                    })?;
                progress
                    .on_success(&format!(
                        "Successfully forked {organization}/{repository} to {} ({})",
                        fork.full_name, fork.html_url
                    ))
                    .await;
                record_fork(settings, store, binding, repository)?;
                ForkState::SettingsPersisted(repository.clone())
            }

            ForkState::RemotesConfigured(_) | ForkState::Declined => {
                unreachable!("terminal states end the loop")
            }
        };
    }
}

fn ask_for_fork(session: &Session<'_>, display_name: &str) -> Result<ForkState> {
    let prompter = session.prompter();

    if prompter.confirm(
        &format!("Do you already have a fork of the \"{display_name}\" Repository?"),
        false,
    )? {
        let name = prompter.input("Please provide the name of your fork (without your username)")?;
        return Ok(ForkState::RecordExistingFork(name.trim().to_string()));
    }

    if prompter.confirm(
        &format!("Should I fork the \"{display_name}\" Repository into your GitHub Account?"),
        true,
    )? {
        Ok(ForkState::CreateForkViaApi)
    } else {
        Ok(ForkState::Declined)
    }
}

fn record_fork(
    settings: &mut SettingsTree,
    store: &dyn SettingsStore,
    binding: &RepositoryBinding,
    fork_name: &str,
) -> Result<()> {
    settings.set_contributor_repository(&binding.repository_name, fork_name);
    store.save(settings)
}

async fn configure_remotes(
    session: &Session<'_>,
    hosting: &dyn HostingService,
    binding: &RepositoryBinding,
    fork_name: &str,
) -> Result<()> {
    let origin_url = hosting.ssh_url(fork_name);
    let upstream_url =
        hosting.upstream_url(&binding.origin_organization, &binding.origin_repository_name);
    reconcile_remotes(session, binding, &origin_url, &upstream_url).await
}
