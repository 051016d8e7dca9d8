//! MergeRequest entity - an imported pull request.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::entity::record_state::RecordState;

/// An imported pull request, keyed by (source_project_id, iid).
///
/// Branch shas are recorded so diff refs can be reconstructed even after the
/// remote branches are deleted. Author/assignee/milestone ids are local ids
/// produced by identity resolution; author is nullable because the remote
/// account may no longer exist.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "merge_requests")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Project-scoped sequential id carried over from the remote platform.
    pub iid: i64,

    pub title: String,

    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,

    pub source_project_id: Uuid,
    pub target_project_id: Uuid,

    pub source_branch: String,
    pub source_branch_sha: String,
    pub target_branch: String,
    pub target_branch_sha: String,

    pub state: RecordState,

    pub milestone_id: Option<Uuid>,
    pub author_id: Option<Uuid>,
    pub assignee_id: Option<Uuid>,

    /// Original timestamps from the remote platform, stored faithfully even
    /// when out of order (e.g. closed before created).
    pub created_at: Option<DateTimeWithTimeZone>,
    pub updated_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::project::Entity",
        from = "Column::TargetProjectId",
        to = "super::project::Column::Id"
    )]
    Project,
    #[sea_orm(has_many = "super::merge_request_diff::Entity")]
    Diff,
}

impl Related<super::project::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Project.def()
    }
}

impl Related<super::merge_request_diff::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Diff.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
