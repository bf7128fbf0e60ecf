//! Remote reconciliation for one working copy

use crate::error::Result;
use crate::session::Session;
use crate::types::RepositoryBinding;
use tracing::debug;

/// Extra fetch refspec exposing upstream pull requests as `upstream/pr/<n>`
pub const PULL_REQUEST_REFSPEC: &str = "+refs/pull/*/head:refs/remotes/upstream/pr/*";

/// Point `origin` at the contributor fork and `upstream` at the canonical repository
///
/// Existing remotes are removed first (forced, absence is fine) and re-added,
/// so running this repeatedly converges to the same configuration. Afterwards
/// all remotes are fetched, `master` tracks `origin/master`, and upstream pull
/// request refs are fetched as well.
pub async fn reconcile_remotes(
    session: &Session<'_>,
    binding: &RepositoryBinding,
    origin_url: &str,
    upstream_url: &str,
) -> Result<()> {
    let dir = session.root().join(&binding.package_directory);
    debug!(
        repository = %binding.repository_name,
        directory = %dir.display(),
        origin_url,
        upstream_url,
        "reconciling remotes"
    );

    session.git_forced(&["remote", "rm", "origin"], &dir).await?;
    session
        .git(&["remote", "add", "origin", origin_url], &dir)
        .await?;
    session.git_forced(&["remote", "rm", "upstream"], &dir).await?;
    session
        .git(&["remote", "add", "upstream", upstream_url], &dir)
        .await?;
    session.git(&["fetch", "--all"], &dir).await?;
    session
        .git(&["branch", "-u", "origin/master", "master"], &dir)
        .await?;
    session
        .git(
            &["config", "--add", "remote.upstream.fetch", PULL_REQUEST_REFSPEC],
            &dir,
        )
        .await?;

    Ok(())
}
