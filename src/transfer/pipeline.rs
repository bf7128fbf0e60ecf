//! Patch transfer pipeline
//!
//! Resolves a Gerrit change, previews it, applies it on a fresh branch off
//! `upstream/master`, pushes the branch to the contributor fork and opens a
//! pull request. Two confirmation gates split the run: declining the first
//! leaves the working copy untouched, declining the second leaves the new
//! branch with the applied patch in place. Nothing is rolled back.

use crate::error::Result;
use crate::git::{RemoteMatcher, resolve_remote_repository};
use crate::platform::HostingService;
use crate::review::ReviewService;
use crate::session::Session;
use crate::transfer::strip_subject;
use crate::types::{PatchRequest, PullRequest};
use std::fmt;
use tracing::debug;

/// Branch checked out again once the pull request is open
const DEFAULT_BRANCH: &str = "master";

/// States of the patch transfer, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferState {
    /// Hosting platform credentials verified
    Authenticated,
    /// Target package and patch file known
    PatchResolved,
    /// `git apply --check`/`--stat` output shown
    PreviewGenerated,
    /// User agreed to apply the patch
    ApplyConfirmed,
    /// Branch created from `upstream/master`
    BranchCreated,
    /// Patch applied with `git am`
    PatchApplied,
    /// User agreed to push and open a pull request
    PushConfirmed,
    /// Branch pushed to `origin`
    Pushed,
    /// Pull request opened
    PullRequestOpened,
    /// Back on `master`
    Cleanup,
}

impl fmt::Display for TransferState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Authenticated => "Authenticated",
            Self::PatchResolved => "Patch resolved",
            Self::PreviewGenerated => "Preview generated",
            Self::ApplyConfirmed => "Applying",
            Self::BranchCreated => "Branch created",
            Self::PatchApplied => "Patch applied",
            Self::PushConfirmed => "Pushing",
            Self::Pushed => "Pushed",
            Self::PullRequestOpened => "Pull request opened",
            Self::Cleanup => "Cleaned up",
        };
        write!(f, "{text}")
    }
}

/// How a transfer ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferOutcome {
    /// The user declined to apply the patch; nothing changed
    Declined,
    /// The patch was applied on a local branch but not pushed
    AppliedLocally {
        /// Branch holding the applied patch
        branch: String,
    },
    /// The pull request was opened
    Opened(PullRequest),
}

/// Ask the review system where a change goes and download it
pub async fn resolve_patch(review: &dyn ReviewService, patch_id: u64) -> Result<PatchRequest> {
    let target = review.resolve_target_package(patch_id).await?;
    let patch_file = review.fetch_patch_file(patch_id).await?;
    let collection_path = target
        .package_path
        .parent()
        .map_or_else(|| target.package_path.clone(), std::path::Path::to_path_buf);

    Ok(PatchRequest {
        patch_id,
        package_key: target.package_key,
        package_path: target.package_path,
        collection_path,
        patch_file,
    })
}

/// Transfer a Gerrit change into a GitHub pull request
///
/// `hosting` must already be authenticated.
#[allow(clippy::too_many_lines)]
pub async fn transfer_patch(
    session: &Session<'_>,
    hosting: &dyn HostingService,
    review: &dyn ReviewService,
    matcher: &RemoteMatcher,
    patch_id: u64,
) -> Result<TransferOutcome> {
    let progress = session.progress();
    let prompter = session.prompter();

    progress
        .on_transfer_state(TransferState::Authenticated)
        .await;

    // Resolve
    progress
        .on_message("Requesting patch details from Gerrit.")
        .await;
    let request = resolve_patch(review, patch_id).await?;
    debug!(?request, "resolved patch");
    progress
        .on_message(&format!(
            "Determined {} as the target package key for this change.",
            request.package_key
        ))
        .await;
    progress
        .on_success("Successfully fetched changeset from Gerrit.")
        .await;
    progress
        .on_transfer_state(TransferState::PatchResolved)
        .await;

    let dir = request.collection_path.as_path();
    let key = request.package_key.as_str();
    let patch = request.patch_file.to_string_lossy().into_owned();
    let branch = request.branch_name();

    // Preview
    progress
        .on_message(&format!(
            "The following changes will be applied to package {key}"
        ))
        .await;
    let check = session
        .git(&["apply", "--directory", key, "--check", &patch], dir)
        .await?;
    progress.on_command_output(&check.output).await;
    let stat = session
        .git(&["apply", "--directory", key, "--stat", &patch], dir)
        .await?;
    progress.on_command_output(&stat.output).await;
    progress
        .on_transfer_state(TransferState::PreviewGenerated)
        .await;

    if !prompter.confirm("Would you like to apply this patch?", true)? {
        return Ok(TransferOutcome::Declined);
    }
    progress
        .on_transfer_state(TransferState::ApplyConfirmed)
        .await;

    // Apply
    let fetch = session
        .git(&["fetch", "upstream", DEFAULT_BRANCH], dir)
        .await?;
    progress.on_command_output(&fetch.output).await;
    let checkout = session
        .git(&["checkout", "-b", &branch, "upstream/master"], dir)
        .await?;
    progress.on_command_output(&checkout.output).await;
    progress
        .on_transfer_state(TransferState::BranchCreated)
        .await;

    let applied = session
        .git(&["am", "--directory", key, &patch], dir)
        .await?;
    progress.on_command_output(&applied.output).await;
    progress
        .on_success(&format!("Successfully applied patch {patch_id}"))
        .await;
    progress
        .on_transfer_state(TransferState::PatchApplied)
        .await;

    if !prompter.confirm(
        "Would you like to push the change to your repository and create a pull request?",
        true,
    )? {
        progress
            .on_message(&format!(
                "Branch {branch} with the applied patch was left in place."
            ))
            .await;
        return Ok(TransferOutcome::AppliedLocally { branch });
    }
    progress
        .on_transfer_state(TransferState::PushConfirmed)
        .await;

    // Publish
    let repository = resolve_remote_repository(session, &request.package_path, matcher).await?;
    let pushed = session.git(&["push", "origin", &branch], dir).await?;
    progress.on_command_output(&pushed.output).await;
    progress.on_transfer_state(TransferState::Pushed).await;

    let details = review.commit_details(patch_id).await?;
    let body = strip_subject(&details.subject, &details.message);
    let pr = hosting
        .open_pull_request(&repository, &branch, &details.subject, &body)
        .await?;
    progress.on_pull_request(patch_id, &pr).await;
    progress
        .on_transfer_state(TransferState::PullRequestOpened)
        .await;

    let back = session.git(&["checkout", DEFAULT_BRANCH], dir).await?;
    progress.on_command_output(&back.output).await;
    progress.on_transfer_state(TransferState::Cleanup).await;

    Ok(TransferOutcome::Opened(pr))
}
