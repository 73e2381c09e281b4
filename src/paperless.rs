//! Shortcuts bound to the upstream Paperless-ngx project.

use anyhow::Result;
use std::path::PathBuf;

use crate::github::{GitHubRepo, ReleaseSource};
use crate::release::{DEFAULT_EXTENSION, ReleaseFetcher};
use crate::runtime::Runtime;

pub const PAPERLESS_OWNER: &str = "paperless-ngx";
pub const PAPERLESS_PROJECT: &str = "paperless-ngx";

/// The upstream Paperless-ngx repository.
pub fn paperless_repo() -> GitHubRepo {
    GitHubRepo::new(PAPERLESS_OWNER, PAPERLESS_PROJECT)
}

/// Tags of all published Paperless-ngx releases.
pub async fn list_paperless_versions<R: Runtime, S: ReleaseSource>(
    fetcher: &ReleaseFetcher<'_, R, S>,
) -> Result<Vec<String>> {
    fetcher.list_releases(&paperless_repo()).await
}

/// Downloads the `.tar.xz` archive of Paperless-ngx release `tag` into a new
/// temporary file and returns its path.
pub async fn download_paperless_archive<R: Runtime, S: ReleaseSource>(
    fetcher: &ReleaseFetcher<'_, R, S>,
    tag: &str,
) -> Result<PathBuf> {
    fetcher
        .fetch_release_asset(&paperless_repo(), tag, DEFAULT_EXTENSION, None)
        .await
}
