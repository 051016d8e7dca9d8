//! The import orchestrator.
//!
//! An [`ImportJob`] migrates one remote repository's collaboration history
//! (labels, milestones, pull requests, issues, comments and the git mirror
//! itself) into a local project. The job is created per invocation, owns
//! its caches for exactly one run, and is consumed by [`ImportJob::execute`],
//! which runs the stages in a fixed order and returns the accumulated error
//! ledger:
//!
//! repository mirror → labels → milestones → pull requests → issues →
//! wiki mirror → content cache invalidation.
//!
//! No stage failure changes that path; every stage, and every item within a
//! stage, isolates its own failures into the ledger and the run always
//! completes. Partial success is the expected outcome, not an error.
//!
//! # Example
//!
//! ```ignore
//! use forgeport::github::GitHubClient;
//! use forgeport::import::{ImportJob, ImportOptions, RemoteRepo};
//!
//! let client = GitHubClient::new(&token)?;
//! let job = ImportJob::new(
//!     db,
//!     project,
//!     RemoteRepo::new("rails", "rails"),
//!     client,
//!     git_backend,
//!     ImportOptions { token },
//! );
//! let errors = job.execute().await;
//! ```

mod branches;
mod comments;
mod errors;
mod identity;
mod issues;
mod labels;
mod milestones;
mod pull_requests;
mod releases;

pub use errors::{ImportError, ImportErrorKind, sanitize_url};

use std::collections::HashMap;

use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::entity::prelude::ProjectModel;
use crate::git::GitBackend;
use crate::platform::{PageStream, PlatformClient, short_error_message};

/// Identity provider slug under which external uids are linked locally.
pub const PROVIDER: &str = "github";

/// Name under which the mirror remote is registered.
pub const MIRROR_REMOTE: &str = "github";

/// The remote repository coordinate (owner + name).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteRepo {
    pub owner: String,
    pub name: String,
}

impl RemoteRepo {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }

    /// `owner/name`.
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }

    /// Public web URL of the repository.
    pub fn web_url(&self) -> String {
        format!("https://github.com/{}", self.full_name())
    }

    /// Public clone URL, without credentials.
    pub fn git_url(&self) -> String {
        format!("{}.git", self.web_url())
    }

    /// Authenticated clone URL for the mirror remote. Never goes into the
    /// error ledger unsanitized.
    pub fn clone_url(&self, token: &str) -> String {
        format!("https://{}@github.com/{}.git", token, self.full_name())
    }

    /// Authenticated clone URL of the companion wiki repository.
    pub fn wiki_url(&self, token: &str) -> String {
        format!("https://{}@github.com/{}.wiki.git", token, self.full_name())
    }

    pub fn labels_path(&self) -> String {
        format!("/repos/{}/labels", self.full_name())
    }

    pub fn milestones_path(&self) -> String {
        format!("/repos/{}/milestones", self.full_name())
    }

    pub fn pulls_path(&self) -> String {
        format!("/repos/{}/pulls", self.full_name())
    }

    pub fn issues_path(&self) -> String {
        format!("/repos/{}/issues", self.full_name())
    }

    pub fn releases_path(&self) -> String {
        format!("/repos/{}/releases", self.full_name())
    }

    /// Inline/diff comments of one pull request.
    pub fn review_comments_path(&self, iid: i64) -> String {
        format!("/repos/{}/pulls/{}/comments", self.full_name(), iid)
    }

    /// Issue-style comments of one pull request or issue.
    pub fn issue_comments_path(&self, iid: i64) -> String {
        format!("/repos/{}/issues/{}/comments", self.full_name(), iid)
    }
}

/// Credentials and options for one import run.
#[derive(Debug, Clone)]
pub struct ImportOptions {
    /// Token used both for API calls (inside the platform client) and for
    /// the authenticated mirror/wiki clone URLs.
    pub token: String,
}

/// One import run. See the module docs for the stage order.
///
/// The three caches (label title → local id, remote uid → local id, remote
/// uid → genuinely-resolved flag) are scoped to this run and never shared:
/// a job is created, executed and discarded.
pub struct ImportJob<C, G> {
    pub(crate) db: DatabaseConnection,
    pub(crate) project: ProjectModel,
    pub(crate) repo: RemoteRepo,
    pub(crate) client: C,
    pub(crate) git: G,
    pub(crate) options: ImportOptions,

    pub(crate) label_ids: HashMap<String, Uuid>,
    pub(crate) user_ids: HashMap<i64, Option<Uuid>>,
    pub(crate) genuine_users: HashMap<i64, bool>,
    pub(crate) errors: Vec<ImportError>,
}

impl<C, G> ImportJob<C, G>
where
    C: PlatformClient + Clone,
    G: GitBackend,
{
    pub fn new(
        db: DatabaseConnection,
        project: ProjectModel,
        repo: RemoteRepo,
        client: C,
        git: G,
        options: ImportOptions,
    ) -> Self {
        Self {
            db,
            project,
            repo,
            client,
            git,
            options,
            label_ids: HashMap::new(),
            user_ids: HashMap::new(),
            genuine_users: HashMap::new(),
            errors: Vec::new(),
        }
    }

    /// Run all stages in order and return the error ledger.
    ///
    /// The returned list is empty on full success; a non-empty list means
    /// partial success, with each record naming the entity kind, a
    /// sanitized source URL and a message.
    pub async fn execute(mut self) -> Vec<ImportError> {
        tracing::info!(repo = %self.repo.full_name(), project = %self.project.path, "starting import");

        self.mirror_repository().await;
        self.sync_labels().await;
        self.sync_milestones().await;
        self.sync_pull_requests().await;
        self.sync_issues().await;
        self.mirror_wiki().await;
        self.expire_repository_cache().await;

        tracing::info!(
            repo = %self.repo.full_name(),
            errors = self.errors.len(),
            "import finished"
        );

        self.errors
    }

    /// Append a failure record to the ledger.
    pub(crate) fn record(
        &mut self,
        kind: ImportErrorKind,
        url: Option<String>,
        message: impl Into<String>,
    ) {
        let error = ImportError::new(kind, url, message);
        tracing::debug!("recorded import error: {error}");
        self.errors.push(error);
    }

    /// Start a page stream over one collection endpoint.
    pub(crate) fn page_stream(&self, path: &str, query: &[(&str, &str)]) -> PageStream<C> {
        PageStream::new(self.client.clone(), path, query)
    }

    async fn mirror_repository(&mut self) {
        tracing::info!(repo = %self.repo.full_name(), "mirroring repository");

        let clone_url = self.repo.clone_url(&self.options.token);
        if let Err(e) = self.try_mirror_repository(&clone_url).await {
            let url = self.repo.git_url();
            self.record(
                ImportErrorKind::Repository,
                Some(url),
                short_error_message(&e),
            );
        }
    }

    async fn try_mirror_repository(&self, clone_url: &str) -> crate::git::Result<()> {
        self.git.create_repository().await?;
        self.git.add_mirror_remote(MIRROR_REMOTE, clone_url).await?;
        self.git.fetch_remote(MIRROR_REMOTE, true).await
    }

    async fn mirror_wiki(&mut self) {
        tracing::info!(repo = %self.repo.full_name(), "importing wiki");

        let wiki_url = self.repo.wiki_url(&self.options.token);
        match self.git.wiki_exists().await {
            Ok(true) => {}
            Ok(false) => {
                let wiki_path = self.project.wiki_path();
                if let Err(e) = self.git.import_repository(&wiki_path, &wiki_url).await {
                    // A wiki that was enabled but never populated is not an
                    // error; there is simply nothing to import.
                    if !matches!(e, crate::git::GitError::NotExported) {
                        self.record(
                            ImportErrorKind::Wiki,
                            Some(wiki_url),
                            short_error_message(&e),
                        );
                    }
                }
            }
            Err(e) => {
                self.record(
                    ImportErrorKind::Wiki,
                    Some(wiki_url),
                    short_error_message(&e),
                );
            }
        }
    }

    async fn expire_repository_cache(&mut self) {
        if let Err(e) = self.git.expire_content_cache().await {
            let url = self.repo.git_url();
            self.record(
                ImportErrorKind::Repository,
                Some(url),
                short_error_message(&e),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_repo_urls() {
        let repo = RemoteRepo::new("octo", "app");

        assert_eq!(repo.full_name(), "octo/app");
        assert_eq!(repo.web_url(), "https://github.com/octo/app");
        assert_eq!(repo.git_url(), "https://github.com/octo/app.git");
        assert_eq!(
            repo.clone_url("secret"),
            "https://secret@github.com/octo/app.git"
        );
        assert_eq!(
            repo.wiki_url("secret"),
            "https://secret@github.com/octo/app.wiki.git"
        );
    }

    #[test]
    fn test_remote_repo_collection_paths() {
        let repo = RemoteRepo::new("octo", "app");

        assert_eq!(repo.labels_path(), "/repos/octo/app/labels");
        assert_eq!(repo.milestones_path(), "/repos/octo/app/milestones");
        assert_eq!(repo.pulls_path(), "/repos/octo/app/pulls");
        assert_eq!(repo.issues_path(), "/repos/octo/app/issues");
        assert_eq!(repo.releases_path(), "/repos/octo/app/releases");
        assert_eq!(
            repo.review_comments_path(5),
            "/repos/octo/app/pulls/5/comments"
        );
        assert_eq!(
            repo.issue_comments_path(5),
            "/repos/octo/app/issues/5/comments"
        );
    }
}
