//! Local identity store lookups used by identity resolution.

use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use uuid::Uuid;

use crate::entity::identity::{Column as IdentityColumn, Entity as Identity};
use crate::entity::user::{Column as UserColumn, Entity as User};
use crate::entity::user_email::{Column as UserEmailColumn, Entity as UserEmail};

use super::errors::Result;

/// Find a local account linked to an external identity
/// (provider + platform-numeric uid).
pub async fn find_by_external_uid(
    db: &DatabaseConnection,
    provider: &str,
    extern_uid: i64,
) -> Result<Option<Uuid>> {
    let identity = Identity::find()
        .filter(IdentityColumn::Provider.eq(provider))
        .filter(IdentityColumn::ExternUid.eq(extern_uid))
        .one(db)
        .await?;

    Ok(identity.map(|i| i.user_id))
}

/// Find a local account by any of its email addresses, primary first.
pub async fn find_by_any_email(db: &DatabaseConnection, email: &str) -> Result<Option<Uuid>> {
    let by_primary = User::find()
        .filter(UserColumn::Email.eq(email))
        .one(db)
        .await?;
    if let Some(user) = by_primary {
        return Ok(Some(user.id));
    }

    let by_secondary = UserEmail::find()
        .filter(UserEmailColumn::Email.eq(email))
        .one(db)
        .await?;

    Ok(by_secondary.map(|e| e.user_id))
}
