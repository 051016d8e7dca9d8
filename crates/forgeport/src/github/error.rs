//! GitHub API error types.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::platform::PlatformError;

/// Errors that can occur when interacting with the GitHub API.
#[derive(Debug, Error)]
pub enum GitHubError {
    #[error("GitHub API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Rate limit exceeded. Resets at {reset_at}")]
    RateLimited { reset_at: DateTime<Utc> },

    #[error("Authentication required")]
    AuthRequired,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl GitHubError {
    /// Check if this error indicates rate limiting (retryable).
    #[inline]
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimited { .. })
    }
}

impl From<reqwest::Error> for GitHubError {
    fn from(e: reqwest::Error) -> Self {
        Self::Network(e.to_string())
    }
}

impl From<GitHubError> for PlatformError {
    fn from(e: GitHubError) -> Self {
        match e {
            GitHubError::Api { status, message } => {
                PlatformError::api(format!("{status}: {message}"))
            }
            GitHubError::RateLimited { reset_at } => PlatformError::RateLimited { reset_at },
            GitHubError::AuthRequired => PlatformError::AuthRequired,
            GitHubError::NotFound(resource) => PlatformError::not_found(resource),
            GitHubError::Network(message) => PlatformError::network(message),
            GitHubError::Internal(message) => PlatformError::internal(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_rate_limited() {
        let rate_limited = GitHubError::RateLimited {
            reset_at: Utc::now(),
        };
        assert!(rate_limited.is_rate_limited());

        let not_found = GitHubError::NotFound("repos/octo/app".to_string());
        assert!(!not_found.is_rate_limited());

        assert!(!GitHubError::AuthRequired.is_rate_limited());
    }

    #[test]
    fn test_conversion_preserves_rate_limit() {
        let reset_at = Utc::now();
        let err: PlatformError = GitHubError::RateLimited { reset_at }.into();
        assert!(err.is_rate_limited());
    }
}
