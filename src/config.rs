use anyhow::{Context, Result};
use log::debug;
use reqwest::{
    Client,
    header::{AUTHORIZATION, HeaderMap, HeaderValue},
};

use crate::{github::GitHub, http::HttpClient, release::ReleaseFetcher, runtime::Runtime};

/// User agent sent with every request; GitHub rejects requests without one.
const USER_AGENT: &str = "paperless-deploy";

/// Wiring shared by every command: the runtime, the release API client and
/// the HTTP client used for downloads.
pub struct Config<R: Runtime> {
    pub runtime: R,
    pub github: GitHub,
    pub http_client: HttpClient,
}

impl<R: Runtime> Config<R> {
    /// Builds the HTTP stack. When `GITHUB_TOKEN` is set and non-empty it is
    /// sent as a bearer token, which lifts the anonymous API rate limit.
    pub fn new(runtime: R, api_url: Option<String>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        let token = runtime
            .env_var("GITHUB_TOKEN")
            .ok()
            .filter(|token| !token.is_empty());
        if let Some(token) = token {
            let mut auth_value = HeaderValue::from_str(&format!("Bearer {}", token))
                .context("GITHUB_TOKEN contains characters not allowed in a header")?;
            auth_value.set_sensitive(true);
            headers.insert(AUTHORIZATION, auth_value);
            debug!(
                "Using GITHUB_TOKEN for authentication: {}",
                mask_token(&token)
            );
        }

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()
            .context("Failed to build HTTP client")?;

        let http_client = HttpClient::new(client);
        let github = GitHub::new(http_client.clone(), api_url);

        Ok(Self {
            runtime,
            github,
            http_client,
        })
    }

    pub fn fetcher(&self) -> ReleaseFetcher<'_, R, GitHub> {
        ReleaseFetcher::new(&self.runtime, &self.github, &self.http_client)
    }
}

/// Keeps the first 8 and last 4 characters of a token for log output.
fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 12 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..8].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}*********{}", head, tail)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::{GitHubRepo, ReleaseSource};
    use crate::runtime::MockRuntime;
    use mockito::{Matcher, Server};

    /// Helper function to verify Authorization header behavior
    /// - `token`: Some(token) to test with GITHUB_TOKEN set, None to test without.
    ///   An empty token must behave like an unset one.
    async fn verify_authorization_header(token: Option<&str>) {
        // --- Setup MockRuntime ---

        let mut runtime = MockRuntime::new();
        let token_clone = token.map(|t| t.to_string());

        runtime
            .expect_env_var()
            .with(mockall::predicate::eq("GITHUB_TOKEN"))
            .returning(move |_| token_clone.clone().ok_or(std::env::VarError::NotPresent));

        // --- Create Mock Server ---

        let mut server = Server::new_async().await;

        let expected_header = match token {
            Some(t) if !t.is_empty() => Matcher::Exact(format!("Bearer {}", t)),
            _ => Matcher::Missing,
        };

        let mock = server
            .mock("GET", "/repos/owner/repo/releases")
            .match_header("Authorization", expected_header)
            .match_header("User-Agent", "paperless-deploy")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("[]")
            .create_async()
            .await;

        // --- Execute ---

        let config = Config::new(runtime, Some(server.url())).unwrap();
        let releases = config
            .github
            .get_releases(&GitHubRepo::new("owner", "repo"))
            .await
            .unwrap();

        // --- Verify ---

        mock.assert_async().await;
        assert!(releases.is_empty());
    }

    #[tokio::test]
    async fn test_config_new_with_github_token() {
        verify_authorization_header(Some("ghp_test_token_1234567890")).await;
    }

    #[tokio::test]
    async fn test_config_new_without_github_token() {
        verify_authorization_header(None).await;
    }

    #[tokio::test]
    async fn test_config_new_with_empty_github_token() {
        verify_authorization_header(Some("")).await;
    }

    #[test]
    fn test_config_rejects_invalid_token() {
        let mut runtime = MockRuntime::new();
        runtime
            .expect_env_var()
            .returning(|_| Ok("bad\ntoken".to_string()));

        assert!(Config::new(runtime, None).is_err());
    }

    #[test]
    fn test_mask_token() {
        assert_eq!(mask_token("ghp_abcdefghijklmnop1234"), "ghp_abcd*********1234");
        assert_eq!(mask_token("short"), "*****");
        assert_eq!(mask_token(""), "");
    }
}
