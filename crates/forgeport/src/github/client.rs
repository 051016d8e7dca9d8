//! GitHub API client: authentication, pagination headers and rate limits.

use std::sync::Arc;

use async_trait::async_trait;
use backon::Retryable;
use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use reqwest::header::HeaderMap;

use crate::platform::{
    self, ApiRateLimiter, Page, PageRequest, PlatformClient, RateLimitInfo, rate_limits,
};
use crate::retry::default_backoff;

use super::error::GitHubError;

/// Default API endpoint; overridable for GitHub Enterprise instances.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Parse the Link header and extract the URL of the next page.
///
/// GitHub Link headers look like:
/// `<https://api.github.com/repositories/123/issues?page=2>; rel="next", <...&page=5>; rel="last"`
pub fn parse_link_next(link_header: &str) -> Option<String> {
    for part in link_header.split(',') {
        let part = part.trim();

        let mut url = None;
        let mut rel = None;

        for segment in part.split(';') {
            let segment = segment.trim();
            if segment.starts_with('<') && segment.ends_with('>') {
                url = Some(&segment[1..segment.len() - 1]);
            } else if let Some(rel_value) = segment.strip_prefix("rel=") {
                rel = Some(rel_value.trim_matches('"'));
            }
        }

        if let (Some(url), Some("next")) = (url, rel) {
            return Some(url.to_string());
        }
    }

    None
}

/// Extract rate limit info from GitHub response headers.
fn parse_rate_limit_headers(headers: &HeaderMap) -> Option<RateLimitInfo> {
    let limit = headers
        .get("x-ratelimit-limit")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<usize>().ok())?;
    let remaining = headers
        .get("x-ratelimit-remaining")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<usize>().ok())?;
    let reset_epoch = headers
        .get("x-ratelimit-reset")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<i64>().ok())?;
    let reset_at = DateTime::from_timestamp(reset_epoch, 0)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(Utc::now);
    Some(RateLimitInfo {
        limit,
        remaining,
        reset_at,
    })
}

/// GitHub API client implementing the `PlatformClient` trait.
///
/// Performs authenticated collection requests, follows the platform's
/// pagination headers, paces itself with a proactive rate limiter, and
/// retries (with exponential backoff) only when the platform reports a rate
/// limit. All other failures surface immediately.
#[derive(Clone)]
pub struct GitHubClient {
    http: reqwest::Client,
    token: Arc<String>,
    base_url: Arc<String>,
    rate_limiter: Option<ApiRateLimiter>,
}

impl GitHubClient {
    /// Create a new client from an authentication token, paced at the
    /// default requests-per-second rate.
    pub fn new(token: &str) -> Result<Self, GitHubError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| GitHubError::Internal(format!("HTTP client setup failed: {e}")))?;

        Ok(Self {
            http,
            token: Arc::new(token.to_string()),
            base_url: Arc::new(DEFAULT_API_URL.to_string()),
            rate_limiter: Some(ApiRateLimiter::new(rate_limits::GITHUB_DEFAULT_RPS)),
        })
    }

    /// Point the client at a different API root (GitHub Enterprise).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Arc::new(base_url.into());
        self
    }

    /// Replace or disable the proactive rate limiter.
    #[must_use]
    pub fn with_rate_limiter(mut self, rate_limiter: Option<ApiRateLimiter>) -> Self {
        self.rate_limiter = rate_limiter;
        self
    }

    fn request_url(&self, request: &PageRequest) -> String {
        match request {
            PageRequest::Path { path, .. } => format!("{}{}", self.base_url, path),
            PageRequest::Url(url) => url.clone(),
        }
    }

    async fn get_page_once(&self, request: &PageRequest) -> Result<Page, GitHubError> {
        if let Some(ref limiter) = self.rate_limiter {
            limiter.wait().await;
        }

        let url = self.request_url(request);
        let mut builder = self
            .http
            .get(&url)
            .header("Accept", "application/vnd.github+json")
            .header("User-Agent", "forgeport")
            .header("Authorization", format!("Bearer {}", self.token.as_str()));

        if let PageRequest::Path { query, .. } = request
            && !query.is_empty()
        {
            builder = builder.query(query);
        }

        let response = builder.send().await?;

        let status = response.status();
        let headers = response.headers().clone();

        match status {
            StatusCode::OK => {
                let next_url = headers
                    .get("link")
                    .and_then(|v| v.to_str().ok())
                    .and_then(parse_link_next);

                let items: Vec<serde_json::Value> = response
                    .json()
                    .await
                    .map_err(|e| GitHubError::Internal(format!("JSON parse error: {e}")))?;

                Ok(Page { items, next_url })
            }
            StatusCode::UNAUTHORIZED => Err(GitHubError::AuthRequired),
            StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS => {
                // A 403 only means rate limiting when the quota is exhausted.
                match parse_rate_limit_headers(&headers) {
                    Some(info) if info.remaining == 0 => Err(GitHubError::RateLimited {
                        reset_at: info.reset_at,
                    }),
                    _ if status == StatusCode::TOO_MANY_REQUESTS => {
                        Err(GitHubError::RateLimited {
                            reset_at: Utc::now() + chrono::Duration::seconds(60),
                        })
                    }
                    _ => Err(GitHubError::AuthRequired),
                }
            }
            StatusCode::NOT_FOUND => Err(GitHubError::NotFound(url)),
            _ => {
                let message = response.text().await.unwrap_or_default();
                Err(GitHubError::Api {
                    status: status.as_u16(),
                    message: message.chars().take(200).collect(),
                })
            }
        }
    }
}

#[async_trait]
impl PlatformClient for GitHubClient {
    async fn fetch_page(&self, request: &PageRequest) -> platform::Result<Page> {
        let fetch = || self.get_page_once(request);

        fetch
            .retry(default_backoff())
            .when(GitHubError::is_rate_limited)
            .notify(|err: &GitHubError, dur| {
                tracing::debug!("Rate limited, retrying in {:?}: {}", dur, err);
            })
            .await
            .map_err(platform::PlatformError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_link_next() {
        let header = "<https://api.github.com/repositories/123/issues?page=2>; rel=\"next\", \
                      <https://api.github.com/repositories/123/issues?page=5>; rel=\"last\"";
        assert_eq!(
            parse_link_next(header),
            Some("https://api.github.com/repositories/123/issues?page=2".to_string())
        );
    }

    #[test]
    fn test_parse_link_next_last_page() {
        let header = "<https://api.github.com/repositories/123/issues?page=1>; rel=\"first\", \
                      <https://api.github.com/repositories/123/issues?page=4>; rel=\"prev\"";
        assert_eq!(parse_link_next(header), None);
    }

    #[test]
    fn test_parse_link_next_malformed() {
        assert_eq!(parse_link_next(""), None);
        assert_eq!(parse_link_next("nonsense"), None);
        assert_eq!(parse_link_next("<unterminated; rel=\"next\""), None);
    }

    #[test]
    fn test_parse_rate_limit_headers() {
        let mut headers = HeaderMap::new();
        headers.insert("x-ratelimit-limit", "5000".parse().unwrap());
        headers.insert("x-ratelimit-remaining", "4999".parse().unwrap());
        headers.insert("x-ratelimit-reset", "1767225600".parse().unwrap());

        let info = parse_rate_limit_headers(&headers).unwrap();
        assert_eq!(info.limit, 5000);
        assert_eq!(info.remaining, 4999);
        assert_eq!(info.reset_at.timestamp(), 1767225600);
    }

    #[test]
    fn test_parse_rate_limit_headers_missing() {
        let headers = HeaderMap::new();
        assert!(parse_rate_limit_headers(&headers).is_none());
    }

    #[test]
    fn test_request_url() {
        let client = GitHubClient::new("token")
            .unwrap()
            .with_base_url("https://github.example.com/api/v3");

        let path = PageRequest::path("/repos/octo/app/labels", &[]);
        assert_eq!(
            client.request_url(&path),
            "https://github.example.com/api/v3/repos/octo/app/labels"
        );

        let cont = PageRequest::url("https://github.example.com/api/v3/x?page=2");
        assert_eq!(
            client.request_url(&cont),
            "https://github.example.com/api/v3/x?page=2"
        );
    }
}
