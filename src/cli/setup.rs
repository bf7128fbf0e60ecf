//! Setup command - authenticate and bootstrap forks and remotes

use crate::cli::CommandContext;
use crate::cli::progress::CliProgress;
use crate::cli::prompt::DialoguerPrompter;
use crate::cli::style::{Stream, Stylize, check, hyperlink_url};
use anstream::println;
use neos_contribute::bootstrap::{SetupOptions, ensure_access_token, setup_contributor};
use neos_contribute::error::Result;
use neos_contribute::git::ShellExecutor;
use neos_contribute::platform::create_hosting_service;
use neos_contribute::session::Session;
use neos_contribute::settings::SettingsStore;

const CONTRIBUTION_GUIDE: &str = "https://discuss.neos.io/t/development-setup/504";

/// Run the setup command
pub async fn run_setup(ctx: &CommandContext, force: bool) -> Result<()> {
    println!("{}", "Welcome to the Neos contribution setup".emphasis());
    println!(
        "This wizard connects your local collections to forks in your GitHub account."
    );
    println!();

    let store = ctx.settings_store();
    let mut settings = store.load()?.with_defaults();

    let prompter = DialoguerPrompter;
    let progress = CliProgress::new(ctx.verbose);
    let session = Session::new(&ctx.root, ShellExecutor::default(), &prompter, &progress);

    ensure_access_token(&session, &mut settings).await?;
    let hosting = create_hosting_service(&settings).await?;

    let summary = setup_contributor(
        &session,
        &mut settings,
        &store,
        hosting.as_ref(),
        SetupOptions { force },
    )
    .await?;

    println!();
    if !summary.configured.is_empty() {
        println!(
            "{} Configured: {}",
            check(),
            summary.configured.join(", ").accent()
        );
    }
    if !summary.skipped.is_empty() {
        println!("Skipped: {}", summary.skipped.join(", ").muted());
    }
    if !summary.declined.is_empty() {
        println!("Not set up: {}", summary.declined.join(", ").muted());
    }
    if !summary.missing_required.is_empty() {
        println!(
            "Missing: {}",
            summary.missing_required.join(", ").warn()
        );
    }

    println!(
        "Settings saved to {}",
        store.path().display().muted()
    );

    println!();
    println!("Run `contribute setup` again whenever you install a new package.");
    println!(
        "Read more about contributing at {}",
        hyperlink_url(Stream::Stdout, CONTRIBUTION_GUIDE).accent()
    );

    Ok(())
}
