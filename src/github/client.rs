use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use log::debug;
use reqwest::Url;

use super::repo::GitHubRepo;
use super::types::{Release, ReleaseTag};
use crate::http::HttpClient;

/// Default GitHub REST API endpoint.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Where release metadata comes from.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReleaseSource: Send + Sync {
    /// All releases of `repo`, in the order the API returns them.
    async fn get_releases(&self, repo: &GitHubRepo) -> Result<Vec<ReleaseTag>>;

    /// The release tagged `tag`.
    async fn get_release_by_tag(&self, repo: &GitHubRepo, tag: &str) -> Result<Release>;
}

pub struct GitHub {
    http_client: HttpClient,
    api_url: String,
}

impl GitHub {
    #[tracing::instrument(skip(http_client, api_url))]
    pub fn new(http_client: HttpClient, api_url: Option<String>) -> Self {
        let api_url = api_url
            .as_deref()
            .unwrap_or(DEFAULT_API_URL)
            .trim_end_matches('/')
            .to_string();
        Self {
            http_client,
            api_url,
        }
    }

    fn releases_url(&self, repo: &GitHubRepo) -> String {
        format!("{}/repos/{}/{}/releases", self.api_url, repo.owner, repo.repo)
    }

    /// `{releases}/tags/{tag}` with `tag` percent-encoded as a single path
    /// segment, so `#`, `?`, `%` and `/` in a tag stay part of the path.
    fn release_by_tag_url(&self, repo: &GitHubRepo, tag: &str) -> Result<Url> {
        let mut url = Url::parse(&self.releases_url(repo))
            .with_context(|| format!("Invalid API URL {}", self.api_url))?;
        url.path_segments_mut()
            .map_err(|_| anyhow!("API URL {} cannot carry a path", self.api_url))?
            .push("tags")
            .push(tag);
        Ok(url)
    }
}

#[async_trait]
impl ReleaseSource for GitHub {
    #[tracing::instrument(skip(self))]
    async fn get_releases(&self, repo: &GitHubRepo) -> Result<Vec<ReleaseTag>> {
        let url = self.releases_url(repo);
        debug!("Fetching releases from {}...", url);
        self.http_client.get_json(&url).await
    }

    #[tracing::instrument(skip(self))]
    async fn get_release_by_tag(&self, repo: &GitHubRepo, tag: &str) -> Result<Release> {
        let url = self.release_by_tag_url(repo, tag)?;
        debug!("Fetching release {} from {}...", tag, url);
        self.http_client.get_json(url.as_str()).await
    }
}
