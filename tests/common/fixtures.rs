//! Test data factories for neos-contribute types
//!
//! These are test utilities - not all may be used in current tests but are
//! available for future test development.

#![allow(dead_code)]

use neos_contribute::settings::SettingsTree;
use neos_contribute::types::{CommitDetails, RepositoryBinding, RepositoryKind, Requiredness};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const FLOW_DIR: &str = "Packages/Framework";
pub const NEOS_DIR: &str = "Packages/Neos";

/// Project root containing the given package directories
pub fn make_project(directories: &[&str]) -> TempDir {
    let root = TempDir::new().unwrap();
    for dir in directories {
        fs::create_dir_all(root.path().join(dir)).unwrap();
    }
    root
}

/// Default settings with the given overrides applied
pub fn make_settings(overrides: &[(&str, &str)]) -> SettingsTree {
    let mut settings = SettingsTree::new().with_defaults();
    for (path, value) in overrides {
        settings.set(path, *value);
    }
    settings
}

/// Binding for the flow collection
pub fn make_flow_binding() -> RepositoryBinding {
    RepositoryBinding {
        repository_name: "flow".to_string(),
        origin_organization: "neos".to_string(),
        origin_repository_name: "flow-development-collection".to_string(),
        contributor_repository_name: None,
        package_directory: PathBuf::from("Packages/Framework/"),
        kind: RepositoryKind::Collection,
        requiredness: Requiredness::Required,
    }
}

/// Commit message with a subject line and body
pub fn make_commit_details(subject: &str, body: &str) -> CommitDetails {
    CommitDetails {
        subject: subject.to_string(),
        message: format!("{subject}\n\n{body}\n"),
    }
}

/// `git remote show origin` output for a fork URL
pub fn show_origin_output(url: &str) -> String {
    format!(
        "* remote origin\n  Fetch URL: {url}\n  Push  URL: {url}\n  HEAD branch: master\n"
    )
}

/// Write a dummy mailbox patch below `dir`
pub fn write_patch(dir: &Path, patch_id: u64) -> PathBuf {
    let path = dir.join(format!("{patch_id}.patch"));
    fs::write(
        &path,
        "From 0000000000000000000000000000000000000000 Mon Sep 17 00:00:00 2001\n\
         Subject: [PATCH] Fix bug\n\n---\n",
    )
    .unwrap();
    path
}
