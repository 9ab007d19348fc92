//! HTTP client for the GitHub search API

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::Client;

use super::types::{Repository, SearchKind, SearchResponse, SearchResult, User};
use crate::config::Config;

/// Everything that can go wrong during one search request.
///
/// Kept `Clone` so a failure can be carried in a GUI message and stored in
/// the controller's failed state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    #[error("failed to build HTTP client: {0}")]
    Client(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("GitHub Search API error ({status}): {body}")]
    Status { status: u16, body: String },
    #[error("malformed search response: {0}")]
    Malformed(String),
}

/// Client for `GET /search/{repositories|users}`
#[derive(Debug, Clone)]
pub struct GitHubClient {
    client: Client,
    base_url: String,
}

impl GitHubClient {
    pub fn new(config: &Config) -> Result<Self, SearchError> {
        let mut headers = HeaderMap::new();
        let agent = HeaderValue::from_str(&config.user_agent)
            .map_err(|e| SearchError::Client(format!("invalid user agent: {}", e)))?;
        headers.insert(USER_AGENT, agent);
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github.v3+json"));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| SearchError::Client(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.api_base.trim_end_matches('/').to_string(),
        })
    }

    pub fn search_url(&self, kind: SearchKind) -> String {
        format!("{}/search/{}", self.base_url, kind.as_str())
    }

    /// Run one search; `term` is sent as the only query parameter.
    pub async fn search(&self, kind: SearchKind, term: &str) -> Result<Vec<SearchResult>, SearchError> {
        let url = self.search_url(kind);
        tracing::debug!("GET {} q={:?}", url, term);

        let response = self
            .client
            .get(&url)
            .query(&[("q", term)])
            .send()
            .await
            .map_err(|e| SearchError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SearchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| SearchError::Network(e.to_string()))?;

        let items = decode_items(kind, &body)?;
        tracing::debug!("{} {} result(s) for {:?}", items.len(), kind, term);
        Ok(items)
    }

    /// Download avatar image bytes.
    pub async fn fetch_avatar(&self, url: &str) -> Result<Vec<u8>, SearchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| SearchError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Status {
                status: status.as_u16(),
                body: String::new(),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| SearchError::Network(e.to_string()))?;
        Ok(bytes.to_vec())
    }
}

/// Ask the avatar CDN for a `size` x `size` image instead of the full one.
pub fn sized_avatar_url(url: &str, size: u32) -> String {
    if url.contains('?') {
        format!("{url}&s={size}")
    } else {
        format!("{url}?s={size}")
    }
}

/// Decode the `items` array of a search response body.
pub fn decode_items(kind: SearchKind, body: &[u8]) -> Result<Vec<SearchResult>, SearchError> {
    let malformed = |e: serde_json::Error| SearchError::Malformed(e.to_string());

    let items = match kind {
        SearchKind::Repositories => serde_json::from_slice::<SearchResponse<Repository>>(body)
            .map_err(malformed)?
            .items
            .into_iter()
            .map(SearchResult::Repository)
            .collect(),
        SearchKind::Users => serde_json::from_slice::<SearchResponse<User>>(body)
            .map_err(malformed)?
            .items
            .into_iter()
            .map(SearchResult::User)
            .collect(),
    };

    Ok(items)
}
