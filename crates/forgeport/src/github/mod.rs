//! GitHub platform integration.
//!
//! `GitHubClient` implements the [`PlatformClient`](crate::platform::PlatformClient)
//! seam for github.com and GitHub Enterprise; `types` holds the typed views
//! the import stages decode collection items into.

mod client;
mod error;
pub mod types;

pub use client::{DEFAULT_API_URL, GitHubClient, parse_link_next};
pub use error::GitHubError;
