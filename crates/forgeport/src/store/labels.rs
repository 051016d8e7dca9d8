use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use uuid::Uuid;

use crate::entity::label::{ActiveModel, Column, Entity as Label, Model};

use super::errors::Result;

/// Find a label by its natural key (project_id + title, case-sensitive).
pub async fn find_by_title(
    db: &DatabaseConnection,
    project_id: Uuid,
    title: &str,
) -> Result<Option<Model>> {
    Label::find()
        .filter(Column::ProjectId.eq(project_id))
        .filter(Column::Title.eq(title))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Insert a new label.
///
/// This is the bulk-import write path: schema constraints apply, lifecycle
/// hooks do not.
pub async fn insert(db: &DatabaseConnection, model: ActiveModel) -> Result<Model> {
    model.insert(db).await.map_err(Into::into)
}

/// List all labels of a project, for populating the title cache once the
/// label stage has completed.
pub async fn list_for_project(db: &DatabaseConnection, project_id: Uuid) -> Result<Vec<Model>> {
    Label::find()
        .filter(Column::ProjectId.eq(project_id))
        .all(db)
        .await
        .map_err(Into::into)
}

#[cfg(all(test, feature = "migrate"))]
mod tests {
    use chrono::Utc;
    use sea_orm::Set;

    use crate::db::connect_and_migrate;
    use crate::store::errors::StoreError;

    use super::*;

    async fn setup_db() -> (DatabaseConnection, Uuid) {
        let db = connect_and_migrate("sqlite::memory:")
            .await
            .expect("test db should migrate");
        (db, Uuid::new_v4())
    }

    fn label(project_id: Uuid, title: &str, color: &str) -> ActiveModel {
        ActiveModel {
            id: Set(Uuid::new_v4()),
            project_id: Set(project_id),
            title: Set(title.to_string()),
            color: Set(color.to_string()),
            created_at: Set(Utc::now().fixed_offset()),
        }
    }

    #[tokio::test]
    async fn test_insert_and_find_by_title() {
        let (db, project_id) = setup_db().await;

        insert(&db, label(project_id, "bug", "#f00"))
            .await
            .expect("insert should succeed");

        let found = find_by_title(&db, project_id, "bug")
            .await
            .expect("lookup should succeed")
            .expect("label should exist");
        assert_eq!(found.color, "#f00");

        // Title matching is case-sensitive.
        assert!(
            find_by_title(&db, project_id, "Bug")
                .await
                .expect("lookup should succeed")
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_duplicate_title_violates_natural_key() {
        let (db, project_id) = setup_db().await;

        insert(&db, label(project_id, "bug", "#f00"))
            .await
            .expect("first insert should succeed");

        let err = insert(&db, label(project_id, "bug", "#0f0"))
            .await
            .expect_err("duplicate title should fail");
        assert!(matches!(err, StoreError::Database(_)));
    }

    #[tokio::test]
    async fn test_list_for_project_scopes_by_project() {
        let (db, project_id) = setup_db().await;
        let other_project = Uuid::new_v4();

        insert(&db, label(project_id, "bug", "#f00")).await.unwrap();
        insert(&db, label(other_project, "bug", "#f00"))
            .await
            .unwrap();

        let labels = list_for_project(&db, project_id).await.unwrap();
        assert_eq!(labels.len(), 1);
        assert_eq!(labels[0].project_id, project_id);
    }
}
