//! Comment synchronization for one noteable (merge request or issue).

use sea_orm::Set;
use uuid::Uuid;

use crate::entity::prelude::{NoteActiveModel, NoteKind, NoteableType};
use crate::git::GitBackend;
use crate::github::types::Comment;
use crate::platform::{PlatformClient, short_error_message};
use crate::store;

use super::errors::{ImportErrorKind, SyncError};
use super::ImportJob;

impl<C, G> ImportJob<C, G>
where
    C: PlatformClient + Clone,
    G: GitBackend,
{
    /// Import every comment from one remote comments endpoint onto the
    /// given noteable, preserving commit ids and diff line codes where
    /// present. Each failure is recorded under the comment subtype's kind
    /// and never aborts the stream.
    pub(crate) async fn sync_comments(
        &mut self,
        noteable_type: NoteableType,
        noteable_id: Uuid,
        kind: NoteKind,
        path: &str,
    ) {
        let error_kind = match kind {
            NoteKind::ReviewComment => ImportErrorKind::ReviewComment,
            NoteKind::Comment => ImportErrorKind::Comment,
        };

        let mut stream = self.page_stream(path, &[]);

        loop {
            let items = match stream.next_page().await {
                Ok(Some(items)) => items,
                Ok(None) => break,
                Err(e) => {
                    self.record(error_kind, Some(path.to_string()), short_error_message(&e));
                    break;
                }
            };

            for raw in items {
                let comment: Comment = match serde_json::from_value(raw) {
                    Ok(comment) => comment,
                    Err(e) => {
                        self.record(error_kind, None, format!("malformed comment: {e}"));
                        continue;
                    }
                };

                if let Err(e) = self
                    .import_comment(noteable_type, noteable_id, kind, &comment)
                    .await
                {
                    self.record(error_kind, comment.html_url.clone(), short_error_message(&e));
                }
            }
        }
    }

    async fn import_comment(
        &mut self,
        noteable_type: NoteableType,
        noteable_id: Uuid,
        kind: NoteKind,
        comment: &Comment,
    ) -> Result<(), SyncError> {
        let author_id = self
            .resolve_user(comment.user.as_ref(), Some(self.project.creator_id))
            .await?;
        let body = self
            .format_description(comment.body.as_deref(), comment.user.as_ref())
            .unwrap_or_default();

        store::notes::insert(
            &self.db,
            NoteActiveModel {
                id: Set(Uuid::new_v4()),
                project_id: Set(self.project.id),
                noteable_type: Set(noteable_type),
                noteable_id: Set(noteable_id),
                body: Set(body),
                author_id: Set(author_id),
                commit_id: Set(comment.commit_id.clone()),
                line_code: Set(comment.line_code()),
                kind: Set(kind),
                created_at: Set(comment.created_at.map(|t| t.fixed_offset())),
                updated_at: Set(comment.updated_at.map(|t| t.fixed_offset())),
            },
        )
        .await?;

        Ok(())
    }
}
