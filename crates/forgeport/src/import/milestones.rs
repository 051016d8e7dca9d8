//! Milestone synchronization.

use sea_orm::Set;
use uuid::Uuid;

use crate::entity::prelude::MilestoneActiveModel;
use crate::git::GitBackend;
use crate::github::types::Milestone;
use crate::platform::{PlatformClient, short_error_message};
use crate::store;

use super::errors::ImportErrorKind;
use super::ImportJob;

impl<C, G> ImportJob<C, G>
where
    C: PlatformClient + Clone,
    G: GitBackend,
{
    /// Import all milestones, closed ones included, keyed by iid.
    pub(crate) async fn sync_milestones(&mut self) {
        tracing::info!(repo = %self.repo.full_name(), "importing milestones");

        let path = self.repo.milestones_path();
        let mut stream = self.page_stream(&path, &[("state", "all")]);

        loop {
            let items = match stream.next_page().await {
                Ok(Some(items)) => items,
                Ok(None) => break,
                Err(e) => {
                    self.record(
                        ImportErrorKind::Milestone,
                        Some(path.clone()),
                        short_error_message(&e),
                    );
                    break;
                }
            };

            for raw in items {
                let milestone: Milestone = match serde_json::from_value(raw) {
                    Ok(milestone) => milestone,
                    Err(e) => {
                        self.record(
                            ImportErrorKind::Milestone,
                            None,
                            format!("malformed milestone: {e}"),
                        );
                        continue;
                    }
                };

                if let Err(e) = self.import_milestone(&milestone).await {
                    self.record(
                        ImportErrorKind::Milestone,
                        milestone.html_url.clone(),
                        short_error_message(&e),
                    );
                }
            }
        }
    }

    async fn import_milestone(&self, milestone: &Milestone) -> store::Result<()> {
        let existing =
            store::milestones::find_by_iid(&self.db, self.project.id, milestone.iid()).await?;
        if existing.is_some() {
            return Ok(());
        }

        store::milestones::insert(
            &self.db,
            MilestoneActiveModel {
                id: Set(Uuid::new_v4()),
                project_id: Set(self.project.id),
                iid: Set(milestone.iid()),
                title: Set(milestone.title.clone()),
                description: Set(milestone.description.clone()),
                due_date: Set(milestone.due_date()),
                state: Set(milestone.state()),
                created_at: Set(milestone.created_at.map(|t| t.fixed_offset())),
                updated_at: Set(milestone.updated_at.map(|t| t.fixed_offset())),
            },
        )
        .await?;

        Ok(())
    }
}
