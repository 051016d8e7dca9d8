//! Local user account entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A local account. Remote authors are mapped onto these via identity links
/// or email matching.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub username: String,

    /// Primary email address. Secondary addresses live in `user_emails`.
    pub email: String,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::identity::Entity")]
    Identity,
    #[sea_orm(has_many = "super::user_email::Entity")]
    UserEmail,
}

impl Related<super::identity::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Identity.def()
    }
}

impl Related<super::user_email::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserEmail.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
