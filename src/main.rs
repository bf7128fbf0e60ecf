//! contribute - Gerrit to GitHub contribution helper
//!
//! CLI binary that sets up contributor forks and turns Gerrit changes into
//! GitHub pull requests.

use anstream::eprintln;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod cli;

use cli::style::Stylize;

#[derive(Parser)]
#[command(name = "contribute")]
#[command(about = "Contribute to Neos and Flow through GitHub pull requests")]
#[command(version)]
struct Cli {
    /// Project root (defaults to current directory)
    #[arg(short, long, global = true, default_value = ".")]
    root: PathBuf,

    /// Settings file (defaults to Configuration/Settings.yaml below the root)
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    /// Gerrit server to fetch changes from
    #[arg(long, global = true, env = "GERRIT_URL", default_value = neos_contribute::review::DEFAULT_GERRIT_URL)]
    gerrit_url: String,

    /// Print every state transition and debug logs
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Configure GitHub access, forks and git remotes
    Setup {
        /// Set up every installed repository without asking
        #[arg(long)]
        force: bool,
    },

    /// Apply a Gerrit change and open a GitHub pull request for it
    CreatePullRequestFromPatch {
        /// Numeric Gerrit change id
        patch_id: u64,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "neos_contribute=debug,contribute=debug"
    } else {
        "neos_contribute=warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let root = cli.root.canonicalize().map_err(|_| {
        neos_contribute::error::Error::DirectoryNotFound(cli.root.clone())
    })?;

    let ctx = cli::CommandContext {
        root,
        settings_file: cli.settings,
        gerrit_url: cli.gerrit_url,
        verbose: cli.verbose,
    };

    match cli.command {
        Commands::Setup { force } => cli::run_setup(&ctx, force).await?,
        Commands::CreatePullRequestFromPatch { patch_id } => {
            cli::run_create_pull_request(&ctx, patch_id).await?;
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if let Some(error) = err.downcast_ref::<neos_contribute::error::Error>() {
                eprintln!("{} {}", "Error:".error(), error);
                if let Some(hint) = error.hint() {
                    eprintln!("{}", hint.muted());
                }
                ExitCode::from(error.exit_code())
            } else {
                eprintln!("{} {err:#}", "Error:".error());
                ExitCode::FAILURE
            }
        }
    }
}
