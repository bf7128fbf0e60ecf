//! Contributor fork bootstrap
//!
//! 1. Token - make sure a GitHub access token is available
//! 2. Forks - per repository, find, record or create the contributor fork
//! 3. Remotes - point `origin` at the fork and `upstream` at the canonical repository

mod fork;
mod setup;

pub use fork::{ForkState, setup_fork};
pub use setup::{
    SetupOptions, SetupSummary, ensure_access_token, prompt_for_access_token, setup_contributor,
    setup_repositories,
};
