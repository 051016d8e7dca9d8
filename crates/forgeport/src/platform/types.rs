use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::errors::Result;

/// A single page of a remote collection endpoint.
///
/// Items are raw JSON values; entity-specific decoding happens in the stage
/// consuming the page so that one malformed item can be skipped without
/// discarding the rest of the batch.
#[derive(Debug, Clone, Default)]
pub struct Page {
    /// The raw items in this page.
    pub items: Vec<serde_json::Value>,
    /// Full URL of the next page, if the collection has more.
    pub next_url: Option<String>,
}

/// What to fetch: either a rooted collection path with query parameters
/// (the first page) or a full continuation URL taken from a previous page.
#[derive(Debug, Clone)]
pub enum PageRequest {
    Path {
        path: String,
        query: Vec<(String, String)>,
    },
    Url(String),
}

impl PageRequest {
    /// Build the first-page request for a collection path.
    pub fn path(path: impl Into<String>, query: &[(&str, &str)]) -> Self {
        Self::Path {
            path: path.into(),
            query: query
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    /// Build a continuation request from a full next-page URL.
    pub fn url(url: impl Into<String>) -> Self {
        Self::Url(url.into())
    }
}

/// Current rate limit status reported by the platform.
#[derive(Debug, Clone)]
pub struct RateLimitInfo {
    /// Maximum requests allowed per period.
    pub limit: usize,
    /// Remaining requests in the current period.
    pub remaining: usize,
    /// When the rate limit resets.
    pub reset_at: DateTime<Utc>,
}

/// A client for a remote collection API.
///
/// Implementations own authentication, rate-limit pacing and transport
/// retry; callers see one page per call and a continuation URL. The client
/// must surface distinguishable errors (`PlatformError`) so failures can be
/// recorded with a sanitized URL and the run can continue.
#[async_trait]
pub trait PlatformClient: Send + Sync {
    /// Fetch one page of a collection endpoint.
    async fn fetch_page(&self, request: &PageRequest) -> Result<Page>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_request_path() {
        let request = PageRequest::path("/repos/octo/app/labels", &[("state", "all")]);
        match request {
            PageRequest::Path { path, query } => {
                assert_eq!(path, "/repos/octo/app/labels");
                assert_eq!(query, vec![("state".to_string(), "all".to_string())]);
            }
            PageRequest::Url(_) => panic!("expected path request"),
        }
    }

    #[test]
    fn test_rate_limit_info() {
        let info = RateLimitInfo {
            limit: 5000,
            remaining: 4999,
            reset_at: Utc::now(),
        };
        assert_eq!(info.limit, 5000);
        assert_eq!(info.remaining, 4999);
    }
}
