use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use crate::entity::issue::{ActiveModel, Column, Entity as Issue, Model};
use crate::entity::issue_label::{
    ActiveModel as IssueLabelActiveModel, Column as IssueLabelColumn, Entity as IssueLabel,
};

use super::errors::Result;

/// Find an issue by its natural key (project_id + iid).
pub async fn find_by_iid(
    db: &DatabaseConnection,
    project_id: Uuid,
    iid: i64,
) -> Result<Option<Model>> {
    Issue::find()
        .filter(Column::ProjectId.eq(project_id))
        .filter(Column::Iid.eq(iid))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Insert a new issue (bulk-import write path).
pub async fn insert(db: &DatabaseConnection, model: ActiveModel) -> Result<Model> {
    model.insert(db).await.map_err(Into::into)
}

/// Attach labels to an issue, skipping pairs that already exist.
pub async fn attach_labels(
    db: &DatabaseConnection,
    issue_id: Uuid,
    label_ids: &[Uuid],
) -> Result<()> {
    for label_id in label_ids {
        let existing = IssueLabel::find()
            .filter(IssueLabelColumn::IssueId.eq(issue_id))
            .filter(IssueLabelColumn::LabelId.eq(*label_id))
            .one(db)
            .await?;
        if existing.is_some() {
            continue;
        }

        IssueLabelActiveModel {
            id: Set(Uuid::new_v4()),
            issue_id: Set(issue_id),
            label_id: Set(*label_id),
        }
        .insert(db)
        .await?;
    }
    Ok(())
}
