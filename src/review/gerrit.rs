//! Gerrit review service implementation

use crate::error::{Error, Result};
use crate::review::ReviewService;
use crate::types::{CommitDetails, TargetPackage};
use async_trait::async_trait;
use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Review server used when none is configured
pub const DEFAULT_GERRIT_URL: &str = "https://review.typo3.org";

/// Prefix Gerrit puts in front of every JSON response
const XSSI_PREFIX: &str = ")]}'";

/// Default request timeout in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Directory below the project root that holds package groups
const PACKAGES_DIR: &str = "Packages";

#[derive(Deserialize)]
struct ChangeInfo {
    project: String,
}

/// Gerrit service using reqwest
pub struct GerritService {
    client: Client,
    base_url: String,
    root: PathBuf,
}

impl GerritService {
    /// Create a service for the Gerrit instance at `base_url`
    ///
    /// Packages are looked up below `<root>/Packages/<group>/<package key>`.
    pub fn new(base_url: &str, root: impl Into<PathBuf>) -> Result<Self> {
        let parsed = url::Url::parse(base_url)
            .map_err(|e| Error::Config(format!("invalid Gerrit URL \"{base_url}\": {e}")))?;

        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .unwrap_or_else(|_| Client::new());

        Ok(Self {
            client,
            base_url: parsed.as_str().trim_end_matches('/').to_string(),
            root: root.into(),
        })
    }

    fn api_url(&self, patch_id: u64, path: &str) -> String {
        let change = urlencoding::encode(&patch_id.to_string()).into_owned();
        format!("{}/changes/{change}{path}", self.base_url)
    }

    async fn get_text(&self, url: &str) -> Result<String> {
        debug!(url, "requesting from Gerrit");
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Api {
                message: format!("Gerrit returned {status} for {url}"),
                code: Some(status.as_u16()),
            });
        }
        Ok(response.text().await?)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        parse_gerrit_json(&self.get_text(url).await?)
    }
}

#[async_trait]
impl ReviewService for GerritService {
    async fn resolve_target_package(&self, patch_id: u64) -> Result<TargetPackage> {
        let change: ChangeInfo = self.get_json(&self.api_url(patch_id, "")).await?;
        let package_key = package_key_of_project(&change.project).to_string();
        let package_path = locate_package(&self.root, &package_key)?;

        Ok(TargetPackage {
            package_key,
            package_path,
        })
    }

    async fn fetch_patch_file(&self, patch_id: u64) -> Result<PathBuf> {
        let encoded = self
            .get_text(&self.api_url(patch_id, "/revisions/current/patch"))
            .await?;
        let compact: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();
        let patch = BASE64
            .decode(compact)
            .map_err(|e| Error::api(format!("invalid patch encoding for change {patch_id}: {e}")))?;

        let mut file = tempfile::Builder::new()
            .prefix(&format!("gerrit-{patch_id}-"))
            .suffix(".patch")
            .tempfile()?;
        file.write_all(&patch)?;
        let (_, path) = file.keep().map_err(|e| Error::Io(e.error))?;

        debug!(path = %path.display(), "stored patch");
        Ok(path)
    }

    async fn commit_details(&self, patch_id: u64) -> Result<CommitDetails> {
        self.get_json(&self.api_url(patch_id, "/revisions/current/commit"))
            .await
    }
}

/// Decode a Gerrit JSON body, dropping the XSSI protection prefix
fn parse_gerrit_json<T: DeserializeOwned>(body: &str) -> Result<T> {
    let json = body.strip_prefix(XSSI_PREFIX).unwrap_or(body);
    Ok(serde_json::from_str(json.trim_start())?)
}

/// `Packages/TYPO3.Flow` → `TYPO3.Flow`
fn package_key_of_project(project: &str) -> &str {
    project.rsplit('/').next().unwrap_or(project)
}

/// First `<root>/Packages/<group>/<key>` directory, groups in name order
fn locate_package(root: &Path, package_key: &str) -> Result<PathBuf> {
    let packages = root.join(PACKAGES_DIR);
    let mut groups: Vec<PathBuf> = match fs::read_dir(&packages) {
        Ok(entries) => entries
            .filter_map(std::result::Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.is_dir())
            .collect(),
        Err(_) => Vec::new(),
    };
    groups.sort();

    groups
        .into_iter()
        .map(|group| group.join(package_key))
        .find(|candidate| candidate.is_dir())
        .ok_or_else(|| Error::PackageNotInstalled(package_key.to_string()))
}
