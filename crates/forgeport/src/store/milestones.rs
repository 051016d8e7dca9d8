use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use uuid::Uuid;

use crate::entity::milestone::{ActiveModel, Column, Entity as Milestone, Model};

use super::errors::Result;

/// Find a milestone by its natural key (project_id + iid).
pub async fn find_by_iid(
    db: &DatabaseConnection,
    project_id: Uuid,
    iid: i64,
) -> Result<Option<Model>> {
    Milestone::find()
        .filter(Column::ProjectId.eq(project_id))
        .filter(Column::Iid.eq(iid))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Local id of the milestone with the given iid, if any.
pub async fn id_by_iid(db: &DatabaseConnection, project_id: Uuid, iid: i64) -> Result<Option<Uuid>> {
    Ok(find_by_iid(db, project_id, iid).await?.map(|m| m.id))
}

/// Insert a new milestone (bulk-import write path).
pub async fn insert(db: &DatabaseConnection, model: ActiveModel) -> Result<Model> {
    model.insert(db).await.map_err(Into::into)
}
