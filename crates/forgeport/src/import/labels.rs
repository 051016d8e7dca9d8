//! Label synchronization.

use chrono::Utc;
use sea_orm::Set;
use uuid::Uuid;

use crate::entity::prelude::LabelActiveModel;
use crate::git::GitBackend;
use crate::github::types::Label;
use crate::platform::{PlatformClient, short_error_message};
use crate::store;

use super::errors::ImportErrorKind;
use super::ImportJob;

impl<C, G> ImportJob<C, G>
where
    C: PlatformClient + Clone,
    G: GitBackend,
{
    /// Import all labels, first occurrence of a title wins, then populate
    /// the title → id cache used by the pull request and issue stages.
    pub(crate) async fn sync_labels(&mut self) {
        tracing::info!(repo = %self.repo.full_name(), "importing labels");

        let path = self.repo.labels_path();
        let mut stream = self.page_stream(&path, &[]);

        loop {
            let items = match stream.next_page().await {
                Ok(Some(items)) => items,
                Ok(None) => break,
                Err(e) => {
                    self.record(
                        ImportErrorKind::Label,
                        Some(path.clone()),
                        short_error_message(&e),
                    );
                    break;
                }
            };

            for raw in items {
                let label: Label = match serde_json::from_value(raw) {
                    Ok(label) => label,
                    Err(e) => {
                        self.record(ImportErrorKind::Label, None, format!("malformed label: {e}"));
                        continue;
                    }
                };

                if let Err(e) = self.import_label(&label).await {
                    self.record(
                        ImportErrorKind::Label,
                        label.url.clone(),
                        short_error_message(&e),
                    );
                }
            }
        }

        if let Err(e) = self.populate_label_cache().await {
            self.record(ImportErrorKind::Label, None, short_error_message(&e));
        }
    }

    async fn import_label(&self, label: &Label) -> store::Result<()> {
        let existing =
            store::labels::find_by_title(&self.db, self.project.id, label.title()).await?;
        if existing.is_some() {
            return Ok(());
        }

        store::labels::insert(
            &self.db,
            LabelActiveModel {
                id: Set(Uuid::new_v4()),
                project_id: Set(self.project.id),
                title: Set(label.title().to_string()),
                color: Set(label.color()),
                created_at: Set(Utc::now().fixed_offset()),
            },
        )
        .await?;

        Ok(())
    }

    async fn populate_label_cache(&mut self) -> store::Result<()> {
        for label in store::labels::list_for_project(&self.db, self.project.id).await? {
            self.label_ids.insert(label.title, label.id);
        }
        Ok(())
    }
}
