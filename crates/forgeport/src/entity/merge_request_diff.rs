//! Diff snapshot rows for merge requests.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// An (initially empty) diff snapshot created right after a merge request is
/// imported; the surrounding system fills it in from the restored refs.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "merge_request_diffs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub merge_request_id: Uuid,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::merge_request::Entity",
        from = "Column::MergeRequestId",
        to = "super::merge_request::Column::Id"
    )]
    MergeRequest,
}

impl Related<super::merge_request::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MergeRequest.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
