//! External identity links - maps a platform account to a local user.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Links a provider-specific external uid (e.g. a GitHub numeric user id) to
/// a local account. Unique per (provider, extern_uid).
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "identities")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub user_id: Uuid,

    /// Provider slug, e.g. `github`.
    pub provider: String,

    /// Numeric user id on the provider.
    pub extern_uid: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
