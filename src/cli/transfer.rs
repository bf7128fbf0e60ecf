//! Transfer command - turn a Gerrit change into a GitHub pull request

use crate::cli::CommandContext;
use crate::cli::progress::CliProgress;
use crate::cli::prompt::DialoguerPrompter;
use crate::cli::style::Stylize;
use anstream::println;
use neos_contribute::error::{Error, Result};
use neos_contribute::git::{RemoteMatcher, ShellExecutor};
use neos_contribute::platform::create_hosting_service;
use neos_contribute::review::GerritService;
use neos_contribute::session::Session;
use neos_contribute::settings::SettingsStore;
use neos_contribute::transfer::{TransferOutcome, transfer_patch};

/// Run the create-pull-request-from-patch command
pub async fn run_create_pull_request(ctx: &CommandContext, patch_id: u64) -> Result<()> {
    let settings = ctx.settings_store().load()?.with_defaults();

    let hosting = create_hosting_service(&settings)
        .await
        .map_err(|e| match e {
            Error::Auth(_) | Error::Config(_) => {
                Error::Config(format!("It was not possible to authenticate with GitHub: {e}"))
            }
            other => other,
        })?;

    let review = GerritService::new(&ctx.gerrit_url, &ctx.root)?;
    let matcher = RemoteMatcher::from_bindings(&settings.bindings()?);

    let prompter = DialoguerPrompter;
    let progress = CliProgress::new(ctx.verbose);
    let session = Session::new(&ctx.root, ShellExecutor::default(), &prompter, &progress);

    match transfer_patch(&session, hosting.as_ref(), &review, &matcher, patch_id).await? {
        TransferOutcome::Declined => {
            println!("Patch {} was not applied.", patch_id.emphasis());
        }
        TransferOutcome::AppliedLocally { branch } => {
            println!(
                "Push the branch {} yourself once you are happy with it.",
                branch.accent()
            );
        }
        TransferOutcome::Opened(pr) => {
            println!("Pull request #{} is ready for review.", pr.number);
        }
    }

    Ok(())
}
