//! GitHub REST API client.
//!
//! All requests are unauthenticated GETs against
//! `{api_base}/repos/{owner}/{repo}`.

use super::error::FetchError;
use super::DataSource;
use crate::config::Config;
use crate::models::{CommitEntry, ContributorProfile, PullRequest, RepoMetadata};
use regex::Regex;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, LINK};
use serde::de::DeserializeOwned;
use std::sync::LazyLock;
use std::time::Duration;
use tracing::debug;

const GITHUB_JSON: &str = "application/vnd.github+json";

static LAST_PAGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"[?&]page=(\d+)[^>]*>; rel="last""#).unwrap_or_else(|_| panic!("Invalid Regex"))
});

/// Client for the endpoints of a single repository.
pub struct GitHubClient {
    http_client: reqwest::Client,
    repo_url: String,
    per_page: u32,
}

impl GitHubClient {
    /// Create a client for the repository named in `config`.
    pub fn new(config: &Config) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_JSON));

        let http_client = reqwest::Client::builder()
            .user_agent(config.fetch.user_agent.as_str())
            .default_headers(headers)
            .timeout(Duration::from_secs(config.fetch.timeout_seconds))
            .build()
            .map_err(FetchError::Client)?;

        Ok(Self {
            http_client,
            repo_url: config.repo_api_url(),
            per_page: config.fetch.per_page,
        })
    }

    pub fn repo_url(&self) -> &str {
        &self.repo_url
    }

    /// Send a GET and fail on transport errors or non-success status.
    async fn get(&self, url: &str) -> Result<reqwest::Response, FetchError> {
        debug!("GET {}", url);

        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::status(url, status));
        }

        Ok(response)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        let response = self.get(url).await?;
        decode(url, response).await
    }
}

async fn decode<T: DeserializeOwned>(
    url: &str,
    response: reqwest::Response,
) -> Result<T, FetchError> {
    response.json().await.map_err(|source| FetchError::Decode {
        url: url.to_string(),
        source,
    })
}

impl DataSource for GitHubClient {
    async fn repo_metadata(&self) -> Result<RepoMetadata, FetchError> {
        self.get_json(&self.repo_url).await
    }

    async fn contributors(&self) -> Result<Vec<ContributorProfile>, FetchError> {
        let url = format!("{}/contributors?per_page={}", self.repo_url, self.per_page);
        self.get_json(&url).await
    }

    async fn pull_request_page(&self, page: u32) -> Result<Vec<PullRequest>, FetchError> {
        let url = format!(
            "{}/pulls?state=all&per_page={}&page={}",
            self.repo_url, self.per_page, page
        );
        self.get_json(&url).await
    }

    /// Requests one commit per page so the `rel="last"` link gives the total.
    async fn commit_count(&self) -> Result<u64, FetchError> {
        let url = format!("{}/commits?per_page=1", self.repo_url);
        let response = self.get(&url).await?;

        let last_page = response
            .headers()
            .get(LINK)
            .and_then(|value| value.to_str().ok())
            .and_then(parse_last_page);

        if let Some(total) = last_page {
            return Ok(total);
        }

        // No pagination: the repository has at most one commit.
        let commits: Vec<serde_json::Value> = decode(&url, response).await?;
        Ok(commits.len() as u64)
    }

    async fn recent_commits(&self, count: usize) -> Result<Vec<CommitEntry>, FetchError> {
        let url = format!("{}/commits?per_page={}", self.repo_url, count);
        self.get_json(&url).await
    }
}

/// Extract the page number of the `rel="last"` entry of a `Link` header.
pub fn parse_last_page(link: &str) -> Option<u64> {
    LAST_PAGE_RE.captures(link)?.get(1)?.as_str().parse().ok()
}
