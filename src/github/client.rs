// src/github/client.rs
// =============================================================================
// HTTP client for the three GitHub REST endpoints we use:
//
//   GET {base}/search/repositories?q=&sort=&order=&per_page=&page=
//   GET {base}/repos/{owner}/{repo}
//   GET {base}/repos/{owner}/{repo}/readme
//
// Behaviour:
// - One reqwest::Client is built up front and reused (connection pooling)
// - No retries. A failed request is reported once and the view shows it
// - 404 becomes AppError::NotFound, any other non-2xx AppError::Api
// - Responses are memoized for a few minutes, keyed by the full request
// =============================================================================

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, info};
use url::Url;

use super::cache::ResponseCache;
use super::models::{Readme, Repository, SearchResponse};
use crate::config::AppConfig;
use crate::error::{AppError, Result};
use crate::search::{RepositorySearch, SearchParams};

type RepoKey = (String, String);

pub struct GitHubClient {
    http: Client,
    base: Url,
    search_cache: ResponseCache<SearchParams, SearchResponse>,
    repo_cache: ResponseCache<RepoKey, Repository>,
    readme_cache: ResponseCache<RepoKey, Readme>,
}

impl GitHubClient {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));

        let http = Client::builder()
            .timeout(config.request_timeout())
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            base: api_base(&config.api_base)?,
            search_cache: ResponseCache::new(config.search_cache_ttl()),
            repo_cache: ResponseCache::new(config.detail_cache_ttl()),
            readme_cache: ResponseCache::new(config.detail_cache_ttl()),
        })
    }

    pub fn search_url(&self, params: &SearchParams) -> Result<Url> {
        let mut url = self.endpoint(&["search", "repositories"])?;
        url.query_pairs_mut()
            .append_pair("q", params.query())
            .append_pair("sort", params.sort.as_str())
            .append_pair("order", params.order.as_str())
            .append_pair("per_page", &params.per_page.get().to_string())
            .append_pair("page", &params.page().to_string());
        Ok(url)
    }

    pub fn repository_url(&self, owner: &str, repo: &str) -> Result<Url> {
        self.endpoint(&["repos", owner, repo])
    }

    pub fn readme_url(&self, owner: &str, repo: &str) -> Result<Url> {
        self.endpoint(&["repos", owner, repo, "readme"])
    }

    pub async fn search_repositories(&self, params: &SearchParams) -> Result<SearchResponse> {
        if let Some(hit) = self.search_cache.get(params).await {
            debug!(%params, "search cache hit");
            return Ok(hit);
        }

        let url = self.search_url(params)?;
        let response: SearchResponse = self.get_json(url).await?;
        info!(%params, total = response.total_count, "search completed");

        self.search_cache.insert(params.clone(), response.clone()).await;
        Ok(response)
    }

    pub async fn get_repository(&self, owner: &str, repo: &str) -> Result<Repository> {
        let key = (owner.to_string(), repo.to_string());
        if let Some(hit) = self.repo_cache.get(&key).await {
            debug!(owner, repo, "repository cache hit");
            return Ok(hit);
        }

        let repository: Repository = self.get_json(self.repository_url(owner, repo)?).await?;
        self.repo_cache.insert(key, repository.clone()).await;
        Ok(repository)
    }

    // A missing README comes back as AppError::NotFound, which callers treat
    // as an ordinary empty state.
    pub async fn get_readme(&self, owner: &str, repo: &str) -> Result<Readme> {
        let key = (owner.to_string(), repo.to_string());
        if let Some(hit) = self.readme_cache.get(&key).await {
            debug!(owner, repo, "readme cache hit");
            return Ok(hit);
        }

        let readme: Readme = self.get_json(self.readme_url(owner, repo)?).await?;
        self.readme_cache.insert(key, readme.clone()).await;
        Ok(readme)
    }

    // Appends path segments to the base URL, percent-encoding each one
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| AppError::Config(format!("api base cannot take a path: {}", self.base)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        debug!(%url, "GET");
        let response = self.http.get(url.clone()).send().await?;

        check_status(response.status(), url.path())?;

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

impl RepositorySearch for GitHubClient {
    async fn search(&self, params: &SearchParams) -> Result<SearchResponse> {
        self.search_repositories(params).await
    }
}

fn api_base(raw: &str) -> Result<Url> {
    let url = Url::parse(raw).map_err(|e| AppError::Config(format!("invalid api_base '{}': {}", raw, e)))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(AppError::Config(format!("api_base must be http(s): {}", raw)));
    }

    Ok(url)
}

// Maps a response status onto the error taxonomy
fn check_status(status: StatusCode, resource: &str) -> Result<()> {
    if status.is_success() {
        return Ok(());
    }

    if status == StatusCode::NOT_FOUND {
        debug!(resource, "resource not found");
        return Err(AppError::NotFound(resource.to_string()));
    }

    Err(AppError::Api {
        status: status.as_u16(),
        status_text: status.canonical_reason().unwrap_or("Unknown").to_string(),
    })
}
