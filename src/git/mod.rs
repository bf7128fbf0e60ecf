//! Git plumbing
//!
//! Command execution, remote reconciliation and remote identity lookup for
//! local working copies.

mod exec;
mod identity;
mod remotes;

pub use exec::{CommandRunner, ShellCommand, ShellExecutor, SystemRunner, WorkingDirGuard};
pub use identity::{RemoteMatcher, resolve_remote_repository};
pub use remotes::{PULL_REQUEST_REFSPEC, reconcile_remotes};
