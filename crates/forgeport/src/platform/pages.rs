//! Paginated collection fetching.
//!
//! `PageStream` drives repeated calls against a collection endpoint,
//! following the continuation URL returned with each page until the
//! collection is exhausted. The sequence is lazy, finite and
//! non-restartable: after an error or the final page the stream stays
//! drained, so a stage that records a transport failure simply keeps
//! whatever it already processed.

use super::errors::Result;
use super::types::{PageRequest, PlatformClient};

/// A lazy stream of raw item batches from one collection endpoint.
pub struct PageStream<C> {
    client: C,
    next: Option<PageRequest>,
}

impl<C: PlatformClient> PageStream<C> {
    /// Start a stream at the first page of `path`.
    pub fn new(client: C, path: impl Into<String>, query: &[(&str, &str)]) -> Self {
        Self {
            client,
            next: Some(PageRequest::path(path, query)),
        }
    }

    /// Fetch the next batch of raw items.
    ///
    /// Returns `Ok(None)` once the collection is exhausted. Transport errors
    /// are surfaced to the caller and end the stream; the fetcher itself
    /// never retries.
    pub async fn next_page(&mut self) -> Result<Option<Vec<serde_json::Value>>> {
        let Some(request) = self.next.take() else {
            return Ok(None);
        };

        let page = self.client.fetch_page(&request).await?;
        self.next = page.next_url.map(PageRequest::Url);

        Ok(Some(page.items))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use serde_json::json;

    use crate::platform::{Page, PlatformError};

    use super::*;

    /// Serves a fixed sequence of pages, failing on request paths that
    /// contain "boom".
    #[derive(Clone)]
    struct ScriptedClient {
        pages: Arc<Mutex<Vec<Page>>>,
    }

    impl ScriptedClient {
        fn new(pages: Vec<Page>) -> Self {
            Self {
                pages: Arc::new(Mutex::new(pages)),
            }
        }
    }

    #[async_trait]
    impl PlatformClient for ScriptedClient {
        async fn fetch_page(&self, request: &PageRequest) -> Result<Page> {
            if let PageRequest::Url(url) = request
                && url.contains("boom")
            {
                return Err(PlatformError::network("connection reset"));
            }

            let mut pages = self.pages.lock().unwrap_or_else(|e| e.into_inner());
            if pages.is_empty() {
                return Err(PlatformError::internal("no more scripted pages"));
            }
            Ok(pages.remove(0))
        }
    }

    #[tokio::test]
    async fn test_page_stream_follows_next_urls_until_exhausted() {
        let client = ScriptedClient::new(vec![
            Page {
                items: vec![json!({"n": 1}), json!({"n": 2})],
                next_url: Some("https://api.example.com/labels?page=2".to_string()),
            },
            Page {
                items: vec![json!({"n": 3})],
                next_url: None,
            },
        ]);

        let mut stream = PageStream::new(client, "/labels", &[]);

        let first = stream.next_page().await.unwrap().unwrap();
        assert_eq!(first.len(), 2);

        let second = stream.next_page().await.unwrap().unwrap();
        assert_eq!(second.len(), 1);

        assert!(stream.next_page().await.unwrap().is_none());
        // Drained streams stay drained.
        assert!(stream.next_page().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_page_stream_ends_after_error() {
        let client = ScriptedClient::new(vec![Page {
            items: vec![json!({"n": 1})],
            next_url: Some("https://api.example.com/boom".to_string()),
        }]);

        let mut stream = PageStream::new(client, "/labels", &[]);

        assert!(stream.next_page().await.unwrap().is_some());
        assert!(stream.next_page().await.is_err());
        // The error consumed the cursor; the stream is over.
        assert!(stream.next_page().await.unwrap().is_none());
    }
}
