use anyhow::{Result, anyhow};
use std::str::FromStr;

/// A GitHub repository, `owner/repo`.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct GitHubRepo {
    pub owner: String,
    pub repo: String,
}

impl GitHubRepo {
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
        }
    }
}

impl std::fmt::Display for GitHubRepo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

impl FromStr for GitHubRepo {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('/').collect();
        if parts.len() != 2 || parts[0].is_empty() || parts[1].is_empty() {
            Err(anyhow!("Invalid repository format. Expected 'owner/repo'."))
        } else {
            Ok(GitHubRepo::new(parts[0], parts[1]))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_github_repo_valid() {
        let repo = GitHubRepo::from_str("paperless-ngx/paperless-ngx").unwrap();
        assert_eq!(repo, GitHubRepo::new("paperless-ngx", "paperless-ngx"));
    }

    #[test]
    fn test_parse_github_repo_invalid() {
        assert!("invalid".parse::<GitHubRepo>().is_err());
        assert!("".parse::<GitHubRepo>().is_err());
        assert!("/repo".parse::<GitHubRepo>().is_err());
        assert!("owner/".parse::<GitHubRepo>().is_err());
        assert!("owner/repo/extra".parse::<GitHubRepo>().is_err());
    }

    #[test]
    fn test_display_round_trips() {
        let repo = GitHubRepo::new("owner", "repo");
        assert_eq!(repo.to_string(), "owner/repo");
        assert_eq!(repo.to_string().parse::<GitHubRepo>().unwrap(), repo);
    }
}
