//! GitHub platform service implementation

use crate::error::{Error, Result};
use crate::platform::HostingService;
use crate::types::{Fork, PullRequest};
use async_trait::async_trait;
use octocrab::Octocrab;
use tracing::debug;

/// Branch pull requests are opened against
const BASE_BRANCH: &str = "master";

/// GitHub service using octocrab
pub struct GitHubService {
    client: Octocrab,
    login: String,
    organization: String,
    host: Option<String>,
}

impl GitHubService {
    /// Create a client and verify the token by resolving the contributor's login
    pub async fn connect(token: &str, organization: String, host: Option<String>) -> Result<Self> {
        let mut builder = Octocrab::builder().personal_token(token.to_string());

        if let Some(ref h) = host {
            let base_url = format!("https://{h}/api/v3");
            builder = builder
                .base_uri(&base_url)
                .map_err(|e| Error::api(e.to_string()))?;
        }

        let client = builder.build().map_err(|e| Error::api(e.to_string()))?;

        let user = client
            .current()
            .user()
            .await
            .map_err(|e| Error::Auth(format!("Invalid token: {e}")))?;
        debug!(login = %user.login, "authenticated with GitHub");

        Ok(Self {
            client,
            login: user.login,
            organization,
            host,
        })
    }

    fn web_host(&self) -> &str {
        self.host.as_deref().unwrap_or("github.com")
    }
}

#[async_trait]
impl HostingService for GitHubService {
    fn login(&self) -> &str {
        &self.login
    }

    async fn repository_exists(&self, name: &str) -> Result<bool> {
        match self.client.repos(&self.login, name).get().await {
            Ok(_) => Ok(true),
            Err(octocrab::Error::GitHub { source, .. }) if source.status_code.as_u16() == 404 => {
                Ok(false)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn http_url(&self, name: &str) -> String {
        format!("https://{}/{}/{name}", self.web_host(), self.login)
    }

    fn ssh_url(&self, name: &str) -> String {
        format!("git@{}:{}/{name}.git", self.web_host(), self.login)
    }

    fn upstream_url(&self, organization: &str, name: &str) -> String {
        format!("https://{}/{organization}/{name}.git", self.web_host())
    }

    async fn fork_repository(&self, organization: &str, name: &str) -> Result<Fork> {
        debug!(organization, name, "creating fork");
        let repository = self
            .client
            .repos(organization, name)
            .create_fork()
            .send()
            .await?;

        Ok(Fork {
            full_name: repository
                .full_name
                .unwrap_or_else(|| format!("{}/{}", self.login, repository.name)),
            html_url: repository
                .html_url
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default(),
        })
    }

    async fn open_pull_request(
        &self,
        repository: &str,
        branch: &str,
        title: &str,
        body: &str,
    ) -> Result<PullRequest> {
        let head = format!("{}:{branch}", self.login);
        debug!(repository, head = %head, "opening pull request");

        let pr = self
            .client
            .pulls(&self.organization, repository)
            .create(title, head, BASE_BRANCH)
            .body(body)
            .send()
            .await?;

        Ok(PullRequest {
            number: pr.number,
            html_url: pr
                .html_url
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default(),
            base_ref: pr.base.ref_field.clone(),
            head_ref: pr.head.ref_field.clone(),
            title: pr.title.as_deref().unwrap_or_default().to_string(),
        })
    }
}
