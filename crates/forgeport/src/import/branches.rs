//! Branch reconciliation around pull request processing.
//!
//! The refs a pull request diffs against may no longer exist in the mirror
//! (the remote branch was deleted after merge/close). `RestoredBranches`
//! recreates missing refs from their recorded shas and remembers exactly
//! which ones it created, so cleanup removes only those - and only when the
//! pull request is no longer open; branches of open pull requests stay as
//! real, user-visible branches.

use crate::git::{GitBackend, Result};

use super::errors::{ImportError, ImportErrorKind};

/// Tracks throwaway branches created for one pull request.
#[derive(Debug, Default)]
pub(crate) struct RestoredBranches {
    created: Vec<String>,
}

impl RestoredBranches {
    /// Make sure `name` exists, creating it at `sha` if absent. Only
    /// branches created here are deleted again during cleanup.
    pub(crate) async fn ensure<G: GitBackend>(
        &mut self,
        git: &G,
        name: &str,
        sha: &str,
    ) -> Result<()> {
        if git.branch_exists(name).await? {
            return Ok(());
        }

        git.create_branch(name, sha).await?;
        self.created.push(name.to_string());
        Ok(())
    }

    /// Remove the branches this reconciler created, unless the pull request
    /// is still open. A failed deletion is reported as a non-fatal warning
    /// and never blocks cleanup of the sibling branch.
    pub(crate) async fn cleanup<G: GitBackend>(self, git: &G, still_open: bool) -> Vec<ImportError> {
        if still_open {
            return Vec::new();
        }

        let mut warnings = Vec::new();
        for name in self.created {
            if let Err(e) = git.delete_branch(&name).await {
                tracing::warn!(branch = %name, "could not clean up restored branch: {e}");
                warnings.push(ImportError::new(
                    ImportErrorKind::Branch,
                    None,
                    format!("Could not clean up restored branch {name}: {e}"),
                ));
            }
        }
        warnings
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::git::GitError;

    use super::*;

    /// Minimal recording backend: branches is the set of existing refs.
    #[derive(Default)]
    struct FakeGit {
        branches: Mutex<Vec<String>>,
    }

    impl FakeGit {
        fn with_branches(names: &[&str]) -> Self {
            Self {
                branches: Mutex::new(names.iter().map(|s| s.to_string()).collect()),
            }
        }

        fn branch_names(&self) -> Vec<String> {
            self.branches.lock().unwrap_or_else(|e| e.into_inner()).clone()
        }
    }

    #[async_trait]
    impl GitBackend for FakeGit {
        async fn create_repository(&self) -> Result<()> {
            Ok(())
        }

        async fn add_mirror_remote(&self, _name: &str, _url: &str) -> Result<()> {
            Ok(())
        }

        async fn fetch_remote(&self, _name: &str, _forced: bool) -> Result<()> {
            Ok(())
        }

        async fn branch_exists(&self, name: &str) -> Result<bool> {
            Ok(self.branch_names().iter().any(|b| b == name))
        }

        async fn create_branch(&self, name: &str, _sha: &str) -> Result<()> {
            self.branches
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .push(name.to_string());
            Ok(())
        }

        async fn delete_branch(&self, name: &str) -> Result<()> {
            let mut branches = self.branches.lock().unwrap_or_else(|e| e.into_inner());
            match branches.iter().position(|b| b == name) {
                Some(idx) => {
                    branches.remove(idx);
                    Ok(())
                }
                None => Err(GitError::MissingRef(name.to_string())),
            }
        }

        async fn wiki_exists(&self) -> Result<bool> {
            Ok(false)
        }

        async fn import_repository(&self, _path: &str, _source_url: &str) -> Result<()> {
            Ok(())
        }

        async fn expire_content_cache(&self) -> Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_ensure_only_creates_missing_branches() {
        let git = FakeGit::with_branches(&["master"]);
        let mut restored = RestoredBranches::default();

        restored.ensure(&git, "feature", "aaa111").await.unwrap();
        restored.ensure(&git, "master", "bbb222").await.unwrap();

        assert_eq!(git.branch_names(), vec!["master", "feature"]);
        // Only "feature" was created, so only "feature" is deleted.
        let warnings = restored.cleanup(&git, false).await;
        assert!(warnings.is_empty());
        assert_eq!(git.branch_names(), vec!["master"]);
    }

    #[tokio::test]
    async fn test_cleanup_keeps_branches_of_open_pull_requests() {
        let git = FakeGit::default();
        let mut restored = RestoredBranches::default();
        restored.ensure(&git, "feature", "aaa111").await.unwrap();

        let warnings = restored.cleanup(&git, true).await;
        assert!(warnings.is_empty());
        assert_eq!(git.branch_names(), vec!["feature"]);
    }

    #[tokio::test]
    async fn test_cleanup_tolerates_missing_refs() {
        let git = FakeGit::default();
        let mut restored = RestoredBranches::default();
        restored.ensure(&git, "feature", "aaa111").await.unwrap();
        restored.ensure(&git, "master", "bbb222").await.unwrap();

        // Someone deleted "feature" behind our back.
        git.delete_branch("feature").await.unwrap();

        let warnings = restored.cleanup(&git, false).await;
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].kind, ImportErrorKind::Branch);
        assert!(warnings[0].message.contains("feature"));
        // The sibling branch was still cleaned up.
        assert!(git.branch_names().is_empty());
    }
}
