use crate::error::{PanelError, Result};
use crate::types::{GitHubRepo, GitHubUser, LanguageBytes};
use reqwest::{Client, Response};
use tracing::{debug, warn};
use url::Url;

pub const API_BASE_URL: &str = "https://api.github.com";
pub const REPO_PAGE_SIZE: u32 = 100;

/// Read-only, unauthenticated client for the three endpoints the panel uses.
///
/// Each request is issued once, with no retry and no timeout. A failure is
/// returned to the chain that issued it.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    client: Client,
    base_url: Url,
}

impl GitHubClient {
    pub fn new() -> Result<Self> {
        Self::with_base_url(API_BASE_URL)
    }

    pub fn with_base_url(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(PanelError::ConfigError(format!(
                "API base URL cannot carry a path: {}",
                base_url
            )));
        }

        let client = Client::builder()
            .user_agent(concat!("portfolio-panel/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(GitHubClient { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| PanelError::ConfigError(format!("invalid API base URL: {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn make_request(&self, url: Url) -> Result<Response> {
        debug!(%url, "GitHub request");

        let response = self
            .client
            .get(url.clone())
            .header("Accept", "application/vnd.github.v3+json")
            .send()
            .await?;

        let rate_limit_remaining = response
            .headers()
            .get("X-RateLimit-Remaining")
            .and_then(|h| h.to_str().ok())
            .and_then(|s| s.parse::<u32>().ok());

        match response.status() {
            status if status.is_success() => Ok(response),
            reqwest::StatusCode::NOT_FOUND => {
                Err(PanelError::NotFound(format!("Resource not found: {}", url)))
            }
            reqwest::StatusCode::FORBIDDEN | reqwest::StatusCode::TOO_MANY_REQUESTS
                if rate_limit_remaining == Some(0) =>
            {
                warn!(%url, "GitHub rate limit exhausted");
                Err(PanelError::RateLimitExceeded(format!(
                    "API rate limit exceeded while requesting {}",
                    url
                )))
            }
            status => {
                let error_text = response.text().await.unwrap_or_default();
                Err(PanelError::ApiError(format!(
                    "API request failed with status {}: {}",
                    status, error_text
                )))
            }
        }
    }

    async fn get_json<T>(&self, url: Url) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let response = self.make_request(url).await?;
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// `GET /users/{username}`
    pub async fn fetch_user(&self, username: &str) -> Result<GitHubUser> {
        let url = self.endpoint(&["users", username])?;
        self.get_json(url).await
    }

    /// `GET /users/{username}/repos?per_page=100&sort=updated`
    pub async fn fetch_repos(&self, username: &str) -> Result<Vec<GitHubRepo>> {
        let mut url = self.endpoint(&["users", username, "repos"])?;
        url.query_pairs_mut()
            .append_pair("per_page", &REPO_PAGE_SIZE.to_string())
            .append_pair("sort", "updated");
        self.get_json(url).await
    }

    /// `GET /repos/{owner}/{repo}/languages`
    pub async fn fetch_languages(&self, owner: &str, repo: &str) -> Result<LanguageBytes> {
        let url = self.endpoint(&["repos", owner, repo, "languages"])?;
        self.get_json(url).await
    }
}
