//! Project entity - the local owner of all imported records.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A local project. Every imported label, milestone, merge request, issue,
/// note and release belongs to exactly one project.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "projects")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Full path of the project (namespace/name), also used to derive the
    /// wiki repository path.
    pub path: String,

    /// The project creator. Used as the fallback author when a remote
    /// identity cannot be resolved to a local account.
    pub creator_id: Uuid,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::label::Entity")]
    Label,
    #[sea_orm(has_many = "super::milestone::Entity")]
    Milestone,
    #[sea_orm(has_many = "super::issue::Entity")]
    Issue,
}

impl Related<super::label::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Label.def()
    }
}

impl Related<super::milestone::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Milestone.def()
    }
}

impl Related<super::issue::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Issue.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Path of the companion wiki repository.
    pub fn wiki_path(&self) -> String {
        format!("{}.wiki", self.path)
    }
}
