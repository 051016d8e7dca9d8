//! Issue synchronization.
//!
//! Every pull request is also an issue on the remote platform, but not
//! every issue is a pull request. Issues flagged as pull requests are only
//! used to merge labels onto the merge request imported with the same iid;
//! they never create an Issue record.

use sea_orm::Set;
use uuid::Uuid;

use crate::entity::prelude::{IssueActiveModel, NoteKind, NoteableType};
use crate::git::GitBackend;
use crate::github::types::Issue;
use crate::platform::{PlatformClient, short_error_message};
use crate::store;

use super::errors::{ImportErrorKind, SyncError};
use super::ImportJob;

impl<C, G> ImportJob<C, G>
where
    C: PlatformClient + Clone,
    G: GitBackend,
{
    /// Import all issues, oldest first, keyed by (project, iid).
    pub(crate) async fn sync_issues(&mut self) {
        tracing::info!(repo = %self.repo.full_name(), "importing issues");

        let path = self.repo.issues_path();
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
                        ImportErrorKind::Issue,
                        Some(path.clone()),
                        short_error_message(&e),
                    );
                    break;
                }
            };

            for raw in items {
                let issue: Issue = match serde_json::from_value(raw) {
                    Ok(issue) => issue,
                    Err(e) => {
                        self.record(ImportErrorKind::Issue, None, format!("malformed issue: {e}"));
                        continue;
                    }
                };

                if let Err(e) = self.import_issue(&issue).await {
                    self.record(
                        ImportErrorKind::Issue,
                        issue.html_url.clone(),
                        short_error_message(&e),
                    );
                }
            }
        }
    }

    async fn import_issue(&mut self, issue: &Issue) -> Result<(), SyncError> {
        if issue.is_pull_request() {
            // Labels are only exposed through the issues API; the merge
            // request itself was imported by the pull request stage.
            if !issue.has_labels() {
                return Ok(());
            }
            return self.merge_labels_onto_merge_request(issue).await;
        }

        if store::issues::find_by_iid(&self.db, self.project.id, issue.iid())
            .await?
            .is_some()
        {
            return Ok(());
        }

        let author_id = self
            .resolve_user(issue.user.as_ref(), Some(self.project.creator_id))
            .await?;
        let assignee_id = self.resolve_user(issue.assignee.as_ref(), None).await?;
        let milestone_id = self.resolve_milestone(issue.milestone.as_ref()).await?;
        let description = self.format_description(issue.body.as_deref(), issue.user.as_ref());
        let label_ids = self.resolve_labels(&issue.labels);

        let saved = store::issues::insert(
            &self.db,
            IssueActiveModel {
                id: Set(Uuid::new_v4()),
                project_id: Set(self.project.id),
                iid: Set(issue.iid()),
                title: Set(issue.title.clone()),
                description: Set(description),
                state: Set(issue.state()),
                milestone_id: Set(milestone_id),
                author_id: Set(author_id),
                assignee_id: Set(assignee_id),
                created_at: Set(issue.created_at.map(|t| t.fixed_offset())),
                updated_at: Set(issue.updated_at.map(|t| t.fixed_offset())),
            },
        )
        .await?;

        store::issues::attach_labels(&self.db, saved.id, &label_ids).await?;

        if issue.has_comments() {
            let comments = self.repo.issue_comments_path(issue.iid());
            self.sync_comments(NoteableType::Issue, saved.id, NoteKind::Comment, &comments)
                .await;
        }

        Ok(())
    }

    async fn merge_labels_onto_merge_request(&mut self, issue: &Issue) -> Result<(), SyncError> {
        let merge_request =
            store::merge_requests::find_by_target_iid(&self.db, self.project.id, issue.iid())
                .await?
                .ok_or(SyncError::MissingMergeRequest(issue.iid()))?;

        let label_ids = self.resolve_labels(&issue.labels);
        store::merge_requests::attach_labels(&self.db, merge_request.id, &label_ids).await?;

        Ok(())
    }
}
