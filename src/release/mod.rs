//! Release resolution and asset download.
//!
//! Lists the tags of a project, resolves one tag to the first asset whose
//! name ends with a given extension, and streams that asset to disk.

use anyhow::{Context, Result};
use log::{debug, info};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::DeployError;
use crate::github::{GitHubRepo, Release, ReleaseAsset, ReleaseSource};
use crate::http::HttpClient;
use crate::runtime::Runtime;

/// Extension used when the caller does not ask for a specific one.
pub const DEFAULT_EXTENSION: &str = ".tar.xz";

/// Returns the first asset of `release`, in API order, whose name ends with
/// `extension`. The match is case-sensitive.
pub fn select_asset<'a>(release: &'a Release, extension: &str) -> Option<&'a ReleaseAsset> {
    release
        .assets
        .iter()
        .find(|asset| asset.name.ends_with(extension))
}

/// Lists releases and downloads their assets.
pub struct ReleaseFetcher<'a, R: Runtime, S: ReleaseSource> {
    runtime: &'a R,
    source: &'a S,
    http_client: &'a HttpClient,
}

impl<'a, R: Runtime, S: ReleaseSource> ReleaseFetcher<'a, R, S> {
    pub fn new(runtime: &'a R, source: &'a S, http_client: &'a HttpClient) -> Self {
        Self {
            runtime,
            source,
            http_client,
        }
    }

    /// Tag names of all releases of `repo`, in the order the API returns them
    /// (newest first on GitHub, though nothing here relies on it).
    #[tracing::instrument(skip(self))]
    pub async fn list_releases(&self, repo: &GitHubRepo) -> Result<Vec<String>> {
        let releases = self.source.get_releases(repo).await?;
        debug!("Found {} releases for {}", releases.len(), repo);

        Ok(releases.into_iter().map(|r| r.tag_name).collect())
    }

    /// Downloads the asset of release `tag` whose name ends with `extension`.
    ///
    /// With `destination` set, that file is created or truncated. Without it
    /// a new file named `*{extension}` is created in the temp directory and
    /// left there for the caller. Returns the path written to.
    ///
    /// Partial downloads are not cleaned up on failure.
    #[tracing::instrument(skip(self))]
    pub async fn fetch_release_asset(
        &self,
        repo: &GitHubRepo,
        tag: &str,
        extension: &str,
        destination: Option<&Path>,
    ) -> Result<PathBuf> {
        let release = self.source.get_release_by_tag(repo, tag).await?;

        let asset = select_asset(&release, extension).ok_or_else(|| DeployError::AssetNotFound {
            extension: extension.to_string(),
            tag: tag.to_string(),
        })?;

        info!(
            "Downloading {} from release {} of {}...",
            asset.name, tag, repo
        );

        let mut written = None;
        self.http_client
            .download_file(&asset.browser_download_url, || {
                let (path, writer) = self.open_destination(destination, extension)?;
                written = Some(path);
                Ok(writer)
            })
            .await?;

        let path = written.context("Download finished without opening a destination file")?;
        info!("Saved {} to {:?}", asset.name, path);
        Ok(path)
    }

    fn open_destination(
        &self,
        destination: Option<&Path>,
        extension: &str,
    ) -> Result<(PathBuf, Box<dyn Write + Send>)> {
        match destination {
            Some(path) => {
                let writer = self
                    .runtime
                    .create_file(path)
                    .with_context(|| format!("Failed to create destination file at {:?}", path))?;
                Ok((path.to_path_buf(), writer))
            }
            None => self
                .runtime
                .create_temp_file(extension)
                .context("Failed to create temporary download file"),
        }
    }
}
