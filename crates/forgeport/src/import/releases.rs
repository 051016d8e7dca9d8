//! Release synchronization.
//!
//! Not part of [`execute`](super::ImportJob::execute)'s fixed stage order;
//! callers that want release history run it separately.

use sea_orm::Set;
use uuid::Uuid;

use crate::entity::prelude::ReleaseActiveModel;
use crate::git::GitBackend;
use crate::github::types::Release;
use crate::platform::{PlatformClient, short_error_message};
use crate::store;

use super::errors::ImportErrorKind;
use super::{ImportError, ImportJob};

impl<C, G> ImportJob<C, G>
where
    C: PlatformClient + Clone,
    G: GitBackend,
{
    /// Import tagged releases, keyed by (project, tag). Drafts and
    /// untagged releases are skipped silently.
    ///
    /// Returns the errors recorded by this stage; they are also part of the
    /// ledger a subsequent `execute` call would return.
    pub async fn sync_releases(&mut self) -> Vec<ImportError> {
        tracing::info!(repo = %self.repo.full_name(), "importing releases");

        let before = self.errors.len();
        let path = self.repo.releases_path();
        let mut stream = self.page_stream(&path, &[]);

        loop {
            let items = match stream.next_page().await {
                Ok(Some(items)) => items,
                Ok(None) => break,
                Err(e) => {
                    self.record(
                        ImportErrorKind::Release,
                        Some(path.clone()),
                        short_error_message(&e),
                    );
                    break;
                }
            };

            for raw in items {
                let release: Release = match serde_json::from_value(raw) {
                    Ok(release) => release,
                    Err(e) => {
                        self.record(
                            ImportErrorKind::Release,
                            None,
                            format!("malformed release: {e}"),
                        );
                        continue;
                    }
                };

                if !release.is_valid() {
                    continue;
                }

                if let Err(e) = self.import_release(&release).await {
                    self.record(
                        ImportErrorKind::Release,
                        release.html_url.clone(),
                        short_error_message(&e),
                    );
                }
            }
        }

        self.errors[before..].to_vec()
    }

    async fn import_release(&self, release: &Release) -> store::Result<()> {
        let existing = store::releases::find_by_tag(&self.db, self.project.id, release.tag()).await?;
        if existing.is_some() {
            return Ok(());
        }

        store::releases::insert(
            &self.db,
            ReleaseActiveModel {
                id: Set(Uuid::new_v4()),
                project_id: Set(self.project.id),
                tag: Set(release.tag().to_string()),
                description: Set(release.body.clone()),
                created_at: Set(release.created_at.map(|t| t.fixed_offset())),
                updated_at: Set(release.updated_at.map(|t| t.fixed_offset())),
            },
        )
        .await?;

        Ok(())
    }
}
