//! Common re-exports for convenient entity usage.

pub use super::identity::{
    ActiveModel as IdentityActiveModel, Column as IdentityColumn, Entity as Identity,
    Model as IdentityModel,
};
pub use super::issue::{
    ActiveModel as IssueActiveModel, Column as IssueColumn, Entity as Issue, Model as IssueModel,
};
pub use super::issue_label::{
    ActiveModel as IssueLabelActiveModel, Column as IssueLabelColumn, Entity as IssueLabel,
    Model as IssueLabelModel,
};
pub use super::label::{
    ActiveModel as LabelActiveModel, Column as LabelColumn, Entity as Label, Model as LabelModel,
};
pub use super::merge_request::{
    ActiveModel as MergeRequestActiveModel, Column as MergeRequestColumn, Entity as MergeRequest,
    Model as MergeRequestModel,
};
pub use super::merge_request_diff::{
    ActiveModel as MergeRequestDiffActiveModel, Column as MergeRequestDiffColumn,
    Entity as MergeRequestDiff, Model as MergeRequestDiffModel,
};
pub use super::merge_request_label::{
    ActiveModel as MergeRequestLabelActiveModel, Column as MergeRequestLabelColumn,
    Entity as MergeRequestLabel, Model as MergeRequestLabelModel,
};
pub use super::milestone::{
    ActiveModel as MilestoneActiveModel, Column as MilestoneColumn, Entity as Milestone,
    Model as MilestoneModel,
};
pub use super::milestone_state::MilestoneState;
pub use super::note::{
    ActiveModel as NoteActiveModel, Column as NoteColumn, Entity as Note, Model as NoteModel,
    NoteKind, NoteableType,
};
pub use super::project::{
    ActiveModel as ProjectActiveModel, Column as ProjectColumn, Entity as Project,
    Model as ProjectModel,
};
pub use super::record_state::RecordState;
pub use super::release::{
    ActiveModel as ReleaseActiveModel, Column as ReleaseColumn, Entity as Release,
    Model as ReleaseModel,
};
pub use super::user::{
    ActiveModel as UserActiveModel, Column as UserColumn, Entity as User, Model as UserModel,
};
pub use super::user_email::{
    ActiveModel as UserEmailActiveModel, Column as UserEmailColumn, Entity as UserEmail,
    Model as UserEmailModel,
};
