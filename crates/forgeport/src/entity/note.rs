//! Note entity - comments attached to merge requests and issues.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// What kind of record a note is attached to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum NoteableType {
    #[sea_orm(string_value = "merge_request")]
    MergeRequest,
    #[sea_orm(string_value = "issue")]
    Issue,
}

/// Comment subtype. Review comments are inline/diff comments and carry a
/// commit id and line code; plain comments do not.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum NoteKind {
    #[sea_orm(string_value = "comment")]
    Comment,
    #[sea_orm(string_value = "review_comment")]
    ReviewComment,
}

/// An imported comment. Inserting a note never updates the parent record's
/// own timestamps.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "notes")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub project_id: Uuid,

    pub noteable_type: NoteableType,
    pub noteable_id: Uuid,

    #[sea_orm(column_type = "Text")]
    pub body: String,

    pub author_id: Option<Uuid>,

    /// Commit the comment was made on, for inline/diff comments.
    pub commit_id: Option<String>,

    /// Position of an inline comment within a diff.
    pub line_code: Option<String>,

    pub kind: NoteKind,

    pub created_at: Option<DateTimeWithTimeZone>,
    pub updated_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::project::Entity",
        from = "Column::ProjectId",
        to = "super::project::Column::Id"
    )]
    Project,
}

impl Related<super::project::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Project.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
