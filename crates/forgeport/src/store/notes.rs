use sea_orm::{ActiveModelTrait, DatabaseConnection};

use crate::entity::note::{ActiveModel, Model};

use super::errors::Result;

/// Insert a new note (bulk-import write path).
///
/// Never updates the parent noteable row, so importing thousands of
/// historical comments leaves the merge request's or issue's own
/// timestamps untouched.
pub async fn insert(db: &DatabaseConnection, model: ActiveModel) -> Result<Model> {
    model.insert(db).await.map_err(Into::into)
}
