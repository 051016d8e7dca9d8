use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use uuid::Uuid;

use crate::entity::release::{ActiveModel, Column, Entity as Release, Model};

use super::errors::Result;

/// Find a release by its natural key (project_id + tag).
pub async fn find_by_tag(
    db: &DatabaseConnection,
    project_id: Uuid,
    tag: &str,
) -> Result<Option<Model>> {
    Release::find()
        .filter(Column::ProjectId.eq(project_id))
        .filter(Column::Tag.eq(tag))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Insert a new release (bulk-import write path).
pub async fn insert(db: &DatabaseConnection, model: ActiveModel) -> Result<Model> {
    model.insert(db).await.map_err(Into::into)
}
