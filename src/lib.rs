//! neos-contribute - contributor tooling for Flow and Neos
//!
//! Prepares local working copies so that `origin` points at the contributor's
//! GitHub fork and `upstream` at the canonical repository, and transfers
//! Gerrit changes into GitHub pull requests.

pub mod auth;
pub mod bootstrap;
pub mod error;
pub mod git;
pub mod platform;
pub mod progress;
pub mod prompt;
pub mod review;
pub mod session;
pub mod settings;
pub mod transfer;
pub mod types;
