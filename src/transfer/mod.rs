//! Gerrit change to GitHub pull request transfer

mod message;
mod pipeline;

pub use message::strip_subject;
pub use pipeline::{TransferOutcome, TransferState, resolve_patch, transfer_patch};
