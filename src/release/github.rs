//! GitHub Releases API source implementation

use std::time::Duration;

use futures::StreamExt;
use regex::Regex;
use reqwest::StatusCode;
use tracing::{debug, warn};

use crate::config::HTTP_CONNECT_TIMEOUT_SECS;
use crate::release::error::ReleaseError;
use crate::release::source::{AssetStream, ReleaseSource};
use crate::release::types::{Release, ReleaseAsset, ReleasePage};

const JSON_ACCEPT: &str = "application/vnd.github+json";
const BINARY_ACCEPT: &str = "application/octet-stream";

/// Release source backed by the GitHub REST API
pub struct GitHubSource {
    client: reqwest::Client,
    base_url: String,
    owner: String,
    repo: String,
    token: Option<String>,
    /// Matches the `rel="next"` entry of a `Link` header
    next_page_re: Regex,
}

impl GitHubSource {
    /// Creates a source for `owner/repo` served from `base_url`
    pub fn new(base_url: &str, owner: &str, repo: &str) -> Result<Self, ReleaseError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("toolenv/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(Duration::from_secs(HTTP_CONNECT_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            owner: owner.to_string(),
            repo: repo.to_string(),
            token: None,
            next_page_re: Regex::new(r#"<[^>]*[?&]page=(\d+)[^>]*>\s*;\s*rel="next""#).unwrap(),
        })
    }

    /// Like [`GitHubSource::new`], authenticated with `GITHUB_TOKEN` when set.
    ///
    /// Anonymous requests are limited to 60 per hour.
    pub fn from_env(base_url: &str, owner: &str, repo: &str) -> Result<Self, ReleaseError> {
        let token = std::env::var("GITHUB_TOKEN")
            .ok()
            .filter(|token| !token.is_empty());
        Ok(Self::new(base_url, owner, repo)?.with_token(token))
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    fn repo_url(&self) -> String {
        format!("{}/repos/{}/{}", self.base_url, self.owner, self.repo)
    }

    fn get(&self, url: &str, accept: &str) -> reqwest::RequestBuilder {
        let request = self.client.get(url).header("Accept", accept);
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Map non-success statuses to errors, `not_found` supplying the 404 case
    fn check_status(
        &self,
        response: reqwest::Response,
        not_found: impl FnOnce() -> ReleaseError,
    ) -> Result<reqwest::Response, ReleaseError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        if status == StatusCode::NOT_FOUND {
            return Err(not_found());
        }

        let header = |name: &str| {
            response
                .headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok())
        };

        let exhausted =
            status == StatusCode::FORBIDDEN && header("x-ratelimit-remaining") == Some(0);
        if status == StatusCode::TOO_MANY_REQUESTS || exhausted {
            return Err(ReleaseError::RateLimited {
                retry_after_secs: header("retry-after"),
            });
        }

        warn!("GitHub API returned status {}: {}", status, response.url());
        Err(ReleaseError::InvalidResponse(format!(
            "Unexpected status: {}",
            status
        )))
    }

    fn next_page(&self, response: &reqwest::Response) -> Option<u32> {
        let link = response.headers().get("link")?.to_str().ok()?;
        self.next_page_re
            .captures(link)
            .and_then(|caps| caps.get(1))
            .and_then(|page| page.as_str().parse().ok())
    }
}

#[async_trait::async_trait]
impl ReleaseSource for GitHubSource {
    async fn list_releases(&self, page: u32, per_page: u32) -> Result<ReleasePage, ReleaseError> {
        let url = format!(
            "{}/releases?per_page={}&page={}",
            self.repo_url(),
            per_page,
            page
        );
        debug!("Listing releases: {}", url);

        let response = self.get(&url, JSON_ACCEPT).send().await?;
        let response = self.check_status(response, || {
            ReleaseError::ReleaseNotFound(format!("{}/{}", self.owner, self.repo))
        })?;
        let next_page = self.next_page(&response);

        let releases: Vec<Release> = response.json().await.map_err(|e| {
            warn!("Failed to parse GitHub releases response: {}", e);
            ReleaseError::InvalidResponse(e.to_string())
        })?;

        Ok(ReleasePage {
            releases,
            next_page,
        })
    }

    async fn release_by_tag(&self, tag: &str) -> Result<Release, ReleaseError> {
        let url = format!("{}/releases/tags/{}", self.repo_url(), tag);
        debug!("Fetching release: {}", url);

        let response = self.get(&url, JSON_ACCEPT).send().await?;
        let response =
            self.check_status(response, || ReleaseError::ReleaseNotFound(tag.to_string()))?;

        response.json().await.map_err(|e| {
            warn!("Failed to parse GitHub release response: {}", e);
            ReleaseError::InvalidResponse(e.to_string())
        })
    }

    async fn download_asset(&self, asset: &ReleaseAsset) -> Result<AssetStream, ReleaseError> {
        let url = format!("{}/releases/assets/{}", self.repo_url(), asset.id);
        debug!("Downloading asset {} from {}", asset.name, url);

        let response = self.get(&url, BINARY_ACCEPT).send().await?;
        let response = self.check_status(response, || {
            ReleaseError::InvalidResponse(format!("Asset {} disappeared", asset.name))
        })?;

        Ok(response
            .bytes_stream()
            .map(|chunk| chunk.map(|bytes| bytes.to_vec()).map_err(ReleaseError::from))
            .boxed())
    }
}
