use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use crate::entity::merge_request::{ActiveModel, Column, Entity as MergeRequest, Model};
use crate::entity::merge_request_diff::ActiveModel as DiffActiveModel;
use crate::entity::merge_request_label::{
    ActiveModel as MrLabelActiveModel, Column as MrLabelColumn, Entity as MergeRequestLabel,
};

use super::errors::Result;

/// Find a merge request by its natural key (source_project_id + iid).
pub async fn find_by_source_iid(
    db: &DatabaseConnection,
    source_project_id: Uuid,
    iid: i64,
) -> Result<Option<Model>> {
    MergeRequest::find()
        .filter(Column::SourceProjectId.eq(source_project_id))
        .filter(Column::Iid.eq(iid))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Find a merge request by target project and iid. Used by the issue stage
/// to merge labels onto an already-imported pull request.
pub async fn find_by_target_iid(
    db: &DatabaseConnection,
    target_project_id: Uuid,
    iid: i64,
) -> Result<Option<Model>> {
    MergeRequest::find()
        .filter(Column::TargetProjectId.eq(target_project_id))
        .filter(Column::Iid.eq(iid))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Insert a new merge request (bulk-import write path).
pub async fn insert(db: &DatabaseConnection, model: ActiveModel) -> Result<Model> {
    model.insert(db).await.map_err(Into::into)
}

/// Create the empty diff snapshot row for a freshly imported merge request.
pub async fn create_diff(db: &DatabaseConnection, merge_request_id: Uuid) -> Result<()> {
    DiffActiveModel {
        id: Set(Uuid::new_v4()),
        merge_request_id: Set(merge_request_id),
        created_at: Set(Utc::now().fixed_offset()),
    }
    .insert(db)
    .await?;
    Ok(())
}

/// Attach labels to a merge request, skipping pairs that already exist.
pub async fn attach_labels(
    db: &DatabaseConnection,
    merge_request_id: Uuid,
    label_ids: &[Uuid],
) -> Result<()> {
    for label_id in label_ids {
        let existing = MergeRequestLabel::find()
            .filter(MrLabelColumn::MergeRequestId.eq(merge_request_id))
            .filter(MrLabelColumn::LabelId.eq(*label_id))
            .one(db)
            .await?;
        if existing.is_some() {
            continue;
        }

        MrLabelActiveModel {
            id: Set(Uuid::new_v4()),
            merge_request_id: Set(merge_request_id),
            label_id: Set(*label_id),
        }
        .insert(db)
        .await?;
    }
    Ok(())
}

#[cfg(all(test, feature = "migrate"))]
mod tests {
    use crate::db::connect_and_migrate;
    use crate::entity::prelude::RecordState;

    use super::*;

    fn merge_request(project_id: Uuid, iid: i64) -> ActiveModel {
        ActiveModel {
            id: Set(Uuid::new_v4()),
            iid: Set(iid),
            title: Set("Fix".to_string()),
            description: Set(None),
            source_project_id: Set(project_id),
            target_project_id: Set(project_id),
            source_branch: Set("feature".to_string()),
            source_branch_sha: Set("aaa111".to_string()),
            target_branch: Set("master".to_string()),
            target_branch_sha: Set("bbb222".to_string()),
            state: Set(RecordState::Closed),
            milestone_id: Set(None),
            author_id: Set(None),
            assignee_id: Set(None),
            created_at: Set(None),
            updated_at: Set(None),
        }
    }

    #[tokio::test]
    async fn test_insert_and_find_by_source_iid() {
        let db = connect_and_migrate("sqlite::memory:").await.unwrap();
        let project_id = Uuid::new_v4();

        let saved = insert(&db, merge_request(project_id, 5)).await.unwrap();

        let found = find_by_source_iid(&db, project_id, 5)
            .await
            .unwrap()
            .expect("merge request should exist");
        assert_eq!(found.id, saved.id);

        assert!(find_by_source_iid(&db, project_id, 6).await.unwrap().is_none());
        assert!(
            find_by_source_iid(&db, Uuid::new_v4(), 5)
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_attach_labels_skips_existing_pairs() {
        let db = connect_and_migrate("sqlite::memory:").await.unwrap();
        let project_id = Uuid::new_v4();
        let mr = insert(&db, merge_request(project_id, 1)).await.unwrap();
        let label_a = Uuid::new_v4();
        let label_b = Uuid::new_v4();

        attach_labels(&db, mr.id, &[label_a]).await.unwrap();
        attach_labels(&db, mr.id, &[label_a, label_b]).await.unwrap();

        let attached = MergeRequestLabel::find()
            .filter(MrLabelColumn::MergeRequestId.eq(mr.id))
            .all(&db)
            .await
            .unwrap();
        assert_eq!(attached.len(), 2);
    }
}
