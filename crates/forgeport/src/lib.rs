//! Forgeport - imports a GitHub project's collaboration history into a
//! local project.
//!
//! The importer migrates labels, milestones, pull requests, issues and
//! their discussion threads - plus the git mirror and wiki - from a remote
//! repository into a local project's storage, preserving referential
//! integrity (authors, milestones, labels) and skipping records that were
//! already imported on a previous run.
//!
//! # Features
//!
//! - `migrate` - Enables database migration support. When enabled, you can
//!   use [`connect_and_migrate`] to automatically run migrations on
//!   connection.
//!
//! # Example
//!
//! ```ignore
//! use forgeport::github::GitHubClient;
//! use forgeport::import::{ImportJob, ImportOptions, RemoteRepo};
//!
//! let db = forgeport::connect_and_migrate("sqlite://forgeport.db?mode=rwc").await?;
//! let client = GitHubClient::new(&token)?;
//!
//! let errors = ImportJob::new(
//!     db,
//!     project,
//!     RemoteRepo::new("rails", "rails"),
//!     client,
//!     git_backend,
//!     ImportOptions { token },
//! )
//! .execute()
//! .await;
//!
//! for error in &errors {
//!     eprintln!("{error}");
//! }
//! ```

pub mod db;
pub mod entity;
pub mod git;
pub mod github;
pub mod import;
pub mod platform;
pub mod retry;
pub mod store;

#[cfg(feature = "migrate")]
pub mod migration;

pub use db::connect;
#[cfg(feature = "migrate")]
pub use db::connect_and_migrate;
pub use entity::prelude::*;
pub use git::{GitBackend, GitError};
pub use import::{ImportError, ImportErrorKind, ImportJob, ImportOptions, RemoteRepo};
pub use platform::{ApiRateLimiter, PlatformClient, PlatformError, rate_limits};
pub use store::StoreError;
