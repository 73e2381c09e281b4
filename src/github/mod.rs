//! GitHub releases API: repository ids, release models and the client.

mod client;
mod repo;
mod types;

#[cfg(test)]
pub use client::MockReleaseSource;
pub use client::{DEFAULT_API_URL, GitHub, ReleaseSource};
pub use repo::GitHubRepo;
pub use types::{Release, ReleaseAsset, ReleaseTag};
