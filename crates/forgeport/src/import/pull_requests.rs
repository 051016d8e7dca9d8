//! Pull request synchronization.
//!
//! The most involved stage: each accepted pull request needs its diff refs
//! restored, its foreign references resolved, a merge request plus empty
//! diff snapshot persisted, and two independent comment streams imported -
//! with branch cleanup guaranteed to run afterwards whether or not any of
//! that succeeded.

use sea_orm::Set;
use uuid::Uuid;

use crate::entity::prelude::{MergeRequestActiveModel, NoteKind, NoteableType};
use crate::git::GitBackend;
use crate::github::types::PullRequest;
use crate::platform::{PlatformClient, short_error_message};
use crate::store;

use super::branches::RestoredBranches;
use super::errors::{ImportErrorKind, SyncError};
use super::ImportJob;

impl<C, G> ImportJob<C, G>
where
    C: PlatformClient + Clone,
    G: GitBackend,
{
    /// Import all pull requests, oldest first so iids keep their original
    /// order. Already-imported and structurally invalid items are skipped
    /// without an error record; everything else that fails is recorded and
    /// the stage moves on.
    pub(crate) async fn sync_pull_requests(&mut self) {
        tracing::info!(repo = %self.repo.full_name(), "importing pull requests");

        let path = self.repo.pulls_path();
        let mut stream = self.page_stream(
            &path,
            &[("state", "all"), ("sort", "created"), ("direction", "asc")],
        );

        loop {
            let items = match stream.next_page().await {
                Ok(Some(items)) => items,
                Ok(None) => break,
                Err(e) => {
                    self.record(
                        ImportErrorKind::PullRequest,
                        Some(path.clone()),
                        short_error_message(&e),
                    );
                    break;
                }
            };

            for raw in items {
                let pull_request: PullRequest = match serde_json::from_value(raw) {
                    Ok(pull_request) => pull_request,
                    Err(e) => {
                        self.record(
                            ImportErrorKind::PullRequest,
                            None,
                            format!("malformed pull request: {e}"),
                        );
                        continue;
                    }
                };

                let existing = match store::merge_requests::find_by_source_iid(
                    &self.db,
                    self.project.id,
                    pull_request.iid(),
                )
                .await
                {
                    Ok(existing) => existing,
                    Err(e) => {
                        self.record(
                            ImportErrorKind::PullRequest,
                            pull_request.html_url.clone(),
                            short_error_message(&e),
                        );
                        continue;
                    }
                };
                if existing.is_some() {
                    continue;
                }

                // Structural-validation skip: no refs to restore, nothing to
                // diff, no error recorded.
                if !pull_request.is_valid() {
                    tracing::debug!(
                        iid = pull_request.iid(),
                        "skipping pull request without restorable refs"
                    );
                    continue;
                }

                self.process_pull_request(&pull_request).await;
            }
        }
    }

    /// Import one pull request with guaranteed branch cleanup: the restored
    /// refs are torn down (for non-open requests) even when persisting the
    /// merge request or importing its comments failed partway through.
    async fn process_pull_request(&mut self, pull_request: &PullRequest) {
        let mut restored = RestoredBranches::default();

        let result = self.import_pull_request(pull_request, &mut restored).await;

        let warnings = restored.cleanup(&self.git, pull_request.is_open()).await;
        self.errors.extend(warnings);

        if let Err(e) = result {
            self.record(
                ImportErrorKind::PullRequest,
                pull_request.html_url.clone(),
                short_error_message(&e),
            );
        }
    }

    async fn import_pull_request(
        &mut self,
        pull_request: &PullRequest,
        restored: &mut RestoredBranches,
    ) -> Result<(), SyncError> {
        restored
            .ensure(&self.git, &pull_request.head.ref_name, &pull_request.head.sha)
            .await?;
        restored
            .ensure(&self.git, &pull_request.base.ref_name, &pull_request.base.sha)
            .await?;

        let author_id = self
            .resolve_user(pull_request.user.as_ref(), Some(self.project.creator_id))
            .await?;
        let assignee_id = self.resolve_user(pull_request.assignee.as_ref(), None).await?;
        let milestone_id = self.resolve_milestone(pull_request.milestone.as_ref()).await?;
        let description =
            self.format_description(pull_request.body.as_deref(), pull_request.user.as_ref());

        let merge_request = store::merge_requests::insert(
            &self.db,
            MergeRequestActiveModel {
                id: Set(Uuid::new_v4()),
                iid: Set(pull_request.iid()),
                title: Set(pull_request.title.clone()),
                description: Set(description),
                source_project_id: Set(self.project.id),
                target_project_id: Set(self.project.id),
                source_branch: Set(pull_request.head.ref_name.clone()),
                source_branch_sha: Set(pull_request.head.sha.clone()),
                target_branch: Set(pull_request.base.ref_name.clone()),
                target_branch_sha: Set(pull_request.base.sha.clone()),
                state: Set(pull_request.state()),
                milestone_id: Set(milestone_id),
                author_id: Set(author_id),
                assignee_id: Set(assignee_id),
                created_at: Set(pull_request.created_at.map(|t| t.fixed_offset())),
                updated_at: Set(pull_request.updated_at.map(|t| t.fixed_offset())),
            },
        )
        .await?;

        store::merge_requests::create_diff(&self.db, merge_request.id).await?;

        // Inline/diff comments and issue-style comments live on separate
        // endpoints; both streams attach to the same merge request.
        let review_comments = self.repo.review_comments_path(pull_request.iid());
        self.sync_comments(
            NoteableType::MergeRequest,
            merge_request.id,
            NoteKind::ReviewComment,
            &review_comments,
        )
        .await;

        let comments = self.repo.issue_comments_path(pull_request.iid());
        self.sync_comments(
            NoteableType::MergeRequest,
            merge_request.id,
            NoteKind::Comment,
            &comments,
        )
        .await;

        Ok(())
    }
}
