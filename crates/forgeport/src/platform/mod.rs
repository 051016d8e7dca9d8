//! Platform-agnostic seam for remote collection APIs.
//!
//! This module defines the `PlatformClient` trait that the import drives:
//! one call fetches one page of a collection endpoint and reports the next
//! page's URL, if any. `PageStream` turns that into a lazy sequence of raw
//! item batches.
//!
//! # Example
//!
//! ```ignore
//! use forgeport::platform::{PageStream, PlatformClient};
//!
//! async fn count_items<C: PlatformClient + Clone>(client: &C) -> Result<usize, PlatformError> {
//!     let mut stream = PageStream::new(client.clone(), "/repos/octo/app/labels", &[]);
//!     let mut total = 0;
//!     while let Some(items) = stream.next_page().await? {
//!         total += items.len();
//!     }
//!     Ok(total)
//! }
//! ```

mod errors;
mod pages;
mod rate_limit;
mod types;

pub use errors::{PlatformError, Result, short_error_message};
pub use pages::PageStream;
pub use rate_limit::{ApiRateLimiter, rate_limits};
pub use types::{Page, PageRequest, PlatformClient, RateLimitInfo};

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    #[test]
    fn test_platform_error_api() {
        let err = PlatformError::api("Something went wrong");
        assert!(err.to_string().contains("API error"));
        assert!(err.to_string().contains("Something went wrong"));
    }

    #[test]
    fn test_platform_error_not_found() {
        let err = PlatformError::not_found("octo/app");
        assert!(err.to_string().contains("Not found"));
        assert!(err.to_string().contains("octo/app"));
    }

    #[test]
    fn test_platform_error_is_rate_limited() {
        let rate_limited = PlatformError::RateLimited {
            reset_at: Utc::now(),
        };
        assert!(rate_limited.is_rate_limited());

        let api_error = PlatformError::api("some error");
        assert!(!api_error.is_rate_limited());
    }

    #[test]
    fn test_short_error_message_single_line() {
        let err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        assert_eq!(short_error_message(&err), "file not found");
    }

    #[test]
    fn test_short_error_message_multiline() {
        let err = std::io::Error::other("first line\nsecond line\nthird line");
        assert_eq!(short_error_message(&err), "first line");
    }
}
