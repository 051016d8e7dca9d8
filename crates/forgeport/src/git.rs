//! Repository backend seam.
//!
//! The importer drives the underlying git/storage engine through this
//! trait: mirroring the remote repository, restoring the refs needed to
//! diff a pull request, importing the companion wiki and invalidating the
//! content cache. Implementations wrap whatever storage engine the
//! surrounding system uses; tests use a recording double.

use async_trait::async_trait;
use thiserror::Error;

/// Errors from the repository backend.
#[derive(Debug, Error)]
pub enum GitError {
    /// A ref that was expected to exist does not. Deleting an
    /// already-missing branch is tolerated by the import and recorded as a
    /// non-fatal warning.
    #[error("Ref not found: {0}")]
    MissingRef(String),

    /// The remote wiki repository exists but was never populated. The wiki
    /// stage treats this as a benign no-op.
    #[error("Repository not exported")]
    NotExported,

    /// Any other storage engine failure.
    #[error("Git operation failed: {0}")]
    Shell(String),
}

impl GitError {
    /// Create a generic storage engine error.
    #[inline]
    pub fn shell(message: impl Into<String>) -> Self {
        Self::Shell(message.into())
    }
}

/// Result type for repository backend operations.
pub type Result<T> = std::result::Result<T, GitError>;

/// The git/storage engine collaborator for one project.
#[async_trait]
pub trait GitBackend: Send + Sync {
    /// Create the local repository shell if it does not exist yet.
    async fn create_repository(&self) -> Result<()>;

    /// Register a remote configured for one-directional forced
    /// synchronization from the external source.
    async fn add_mirror_remote(&self, name: &str, url: &str) -> Result<()>;

    /// Fetch a remote, optionally forced.
    async fn fetch_remote(&self, name: &str, forced: bool) -> Result<()>;

    /// Whether a local branch with this name exists.
    async fn branch_exists(&self, name: &str) -> Result<bool>;

    /// Create a branch pointing at the given commit.
    async fn create_branch(&self, name: &str, sha: &str) -> Result<()>;

    /// Delete a branch. Returns `GitError::MissingRef` if it is already gone.
    async fn delete_branch(&self, name: &str) -> Result<()>;

    /// Whether the project already has a wiki repository locally.
    async fn wiki_exists(&self) -> Result<bool>;

    /// Import a companion repository (the wiki) from a source URL into the
    /// given path. Returns `GitError::NotExported` when the remote wiki was
    /// enabled but never populated.
    async fn import_repository(&self, path: &str, source_url: &str) -> Result<()>;

    /// Invalidate any cached rendering of repository content so subsequent
    /// reads reflect the freshly imported refs.
    async fn expire_content_cache(&self) -> Result<()>;
}
