//! Initial migration to create the forgeport database schema.
//!
//! The unique indexes created here back the import's idempotency checks:
//! every entity is looked up by its natural key before insertion, and the
//! index makes duplicate creation a constraint violation rather than silent
//! data corruption.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        self.create_accounts(manager).await?;
        self.create_projects(manager).await?;
        self.create_labels(manager).await?;
        self.create_milestones(manager).await?;
        self.create_merge_requests(manager).await?;
        self.create_issues(manager).await?;
        self.create_notes(manager).await?;
        self.create_releases(manager).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Releases::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Notes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(IssueLabels::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(MergeRequestLabels::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Issues::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(MergeRequestDiffs::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(MergeRequests::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Milestones::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Labels::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Projects::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Identities::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(UserEmails::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        Ok(())
    }
}

impl Migration {
    async fn create_accounts(&self, manager: &SchemaManager<'_>) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Users::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Users::Username).string().not_null())
                    .col(ColumnDef::new(Users::Email).string().not_null())
                    .col(
                        ColumnDef::new(Users::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_users_email")
                    .table(Users::Table)
                    .col(Users::Email)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(UserEmails::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UserEmails::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(UserEmails::UserId).uuid().not_null())
                    .col(
                        ColumnDef::new(UserEmails::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Identities::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Identities::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Identities::UserId).uuid().not_null())
                    .col(ColumnDef::new(Identities::Provider).string().not_null())
                    .col(
                        ColumnDef::new(Identities::ExternUid)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_identities_provider_extern_uid")
                    .table(Identities::Table)
                    .col(Identities::Provider)
                    .col(Identities::ExternUid)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn create_projects(&self, manager: &SchemaManager<'_>) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Projects::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Projects::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Projects::Path).string().not_null())
                    .col(ColumnDef::new(Projects::CreatorId).uuid().not_null())
                    .col(
                        ColumnDef::new(Projects::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_projects_path")
                    .table(Projects::Table)
                    .col(Projects::Path)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn create_labels(&self, manager: &SchemaManager<'_>) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Labels::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Labels::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Labels::ProjectId).uuid().not_null())
                    .col(ColumnDef::new(Labels::Title).string().not_null())
                    .col(ColumnDef::new(Labels::Color).string().not_null())
                    .col(
                        ColumnDef::new(Labels::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_labels_project_title")
                    .table(Labels::Table)
                    .col(Labels::ProjectId)
                    .col(Labels::Title)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn create_milestones(&self, manager: &SchemaManager<'_>) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Milestones::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Milestones::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Milestones::ProjectId).uuid().not_null())
                    .col(ColumnDef::new(Milestones::Iid).big_integer().not_null())
                    .col(ColumnDef::new(Milestones::Title).string().not_null())
                    .col(ColumnDef::new(Milestones::Description).text().null())
                    .col(ColumnDef::new(Milestones::DueDate).date().null())
                    .col(ColumnDef::new(Milestones::State).string().not_null())
                    .col(
                        ColumnDef::new(Milestones::CreatedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Milestones::UpdatedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_milestones_project_iid")
                    .table(Milestones::Table)
                    .col(Milestones::ProjectId)
                    .col(Milestones::Iid)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn create_merge_requests(&self, manager: &SchemaManager<'_>) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(MergeRequests::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MergeRequests::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(MergeRequests::Iid).big_integer().not_null())
                    .col(ColumnDef::new(MergeRequests::Title).string().not_null())
                    .col(ColumnDef::new(MergeRequests::Description).text().null())
                    .col(
                        ColumnDef::new(MergeRequests::SourceProjectId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MergeRequests::TargetProjectId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MergeRequests::SourceBranch)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MergeRequests::SourceBranchSha)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MergeRequests::TargetBranch)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MergeRequests::TargetBranchSha)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(MergeRequests::State).string().not_null())
                    .col(ColumnDef::new(MergeRequests::MilestoneId).uuid().null())
                    .col(ColumnDef::new(MergeRequests::AuthorId).uuid().null())
                    .col(ColumnDef::new(MergeRequests::AssigneeId).uuid().null())
                    .col(
                        ColumnDef::new(MergeRequests::CreatedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(MergeRequests::UpdatedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_merge_requests_source_project_iid")
                    .table(MergeRequests::Table)
                    .col(MergeRequests::SourceProjectId)
                    .col(MergeRequests::Iid)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_merge_requests_target_project_iid")
                    .table(MergeRequests::Table)
                    .col(MergeRequests::TargetProjectId)
                    .col(MergeRequests::Iid)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(MergeRequestDiffs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MergeRequestDiffs::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(MergeRequestDiffs::MergeRequestId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MergeRequestDiffs::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(MergeRequestLabels::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MergeRequestLabels::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(MergeRequestLabels::MergeRequestId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MergeRequestLabels::LabelId)
                            .uuid()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_merge_request_labels_pair")
                    .table(MergeRequestLabels::Table)
                    .col(MergeRequestLabels::MergeRequestId)
                    .col(MergeRequestLabels::LabelId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn create_issues(&self, manager: &SchemaManager<'_>) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Issues::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Issues::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Issues::ProjectId).uuid().not_null())
                    .col(ColumnDef::new(Issues::Iid).big_integer().not_null())
                    .col(ColumnDef::new(Issues::Title).string().not_null())
                    .col(ColumnDef::new(Issues::Description).text().null())
                    .col(ColumnDef::new(Issues::State).string().not_null())
                    .col(ColumnDef::new(Issues::MilestoneId).uuid().null())
                    .col(ColumnDef::new(Issues::AuthorId).uuid().null())
                    .col(ColumnDef::new(Issues::AssigneeId).uuid().null())
                    .col(
                        ColumnDef::new(Issues::CreatedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Issues::UpdatedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_issues_project_iid")
                    .table(Issues::Table)
                    .col(Issues::ProjectId)
                    .col(Issues::Iid)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(IssueLabels::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(IssueLabels::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(IssueLabels::IssueId).uuid().not_null())
                    .col(ColumnDef::new(IssueLabels::LabelId).uuid().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_issue_labels_pair")
                    .table(IssueLabels::Table)
                    .col(IssueLabels::IssueId)
                    .col(IssueLabels::LabelId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn create_notes(&self, manager: &SchemaManager<'_>) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Notes::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Notes::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Notes::ProjectId).uuid().not_null())
                    .col(ColumnDef::new(Notes::NoteableType).string().not_null())
                    .col(ColumnDef::new(Notes::NoteableId).uuid().not_null())
                    .col(ColumnDef::new(Notes::Body).text().not_null())
                    .col(ColumnDef::new(Notes::AuthorId).uuid().null())
                    .col(ColumnDef::new(Notes::CommitId).string().null())
                    .col(ColumnDef::new(Notes::LineCode).string().null())
                    .col(ColumnDef::new(Notes::Kind).string().not_null())
                    .col(
                        ColumnDef::new(Notes::CreatedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Notes::UpdatedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_notes_noteable")
                    .table(Notes::Table)
                    .col(Notes::NoteableType)
                    .col(Notes::NoteableId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn create_releases(&self, manager: &SchemaManager<'_>) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Releases::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Releases::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Releases::ProjectId).uuid().not_null())
                    .col(ColumnDef::new(Releases::Tag).string().not_null())
                    .col(ColumnDef::new(Releases::Description).text().null())
                    .col(
                        ColumnDef::new(Releases::CreatedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Releases::UpdatedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_releases_project_tag")
                    .table(Releases::Table)
                    .col(Releases::ProjectId)
                    .col(Releases::Tag)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
#[sea_orm(iden = "users")]
enum Users {
    Table,
    Id,
    Username,
    Email,
    CreatedAt,
}

#[derive(DeriveIden)]
#[sea_orm(iden = "user_emails")]
enum UserEmails {
    Table,
    Id,
    UserId,
    Email,
}

#[derive(DeriveIden)]
#[sea_orm(iden = "identities")]
enum Identities {
    Table,
    Id,
    UserId,
    Provider,
    ExternUid,
}

#[derive(DeriveIden)]
#[sea_orm(iden = "projects")]
enum Projects {
    Table,
    Id,
    Path,
    CreatorId,
    CreatedAt,
}

#[derive(DeriveIden)]
#[sea_orm(iden = "labels")]
enum Labels {
    Table,
    Id,
    ProjectId,
    Title,
    Color,
    CreatedAt,
}

#[derive(DeriveIden)]
#[sea_orm(iden = "milestones")]
enum Milestones {
    Table,
    Id,
    ProjectId,
    Iid,
    Title,
    Description,
    DueDate,
    State,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
#[sea_orm(iden = "merge_requests")]
enum MergeRequests {
    Table,
    Id,
    Iid,
    Title,
    Description,
    SourceProjectId,
    TargetProjectId,
    SourceBranch,
    SourceBranchSha,
    TargetBranch,
    TargetBranchSha,
    State,
    MilestoneId,
    AuthorId,
    AssigneeId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
#[sea_orm(iden = "merge_request_diffs")]
enum MergeRequestDiffs {
    Table,
    Id,
    MergeRequestId,
    CreatedAt,
}

#[derive(DeriveIden)]
#[sea_orm(iden = "merge_request_labels")]
enum MergeRequestLabels {
    Table,
    Id,
    MergeRequestId,
    LabelId,
}

#[derive(DeriveIden)]
#[sea_orm(iden = "issues")]
enum Issues {
    Table,
    Id,
    ProjectId,
    Iid,
    Title,
    Description,
    State,
    MilestoneId,
    AuthorId,
    AssigneeId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
#[sea_orm(iden = "issue_labels")]
enum IssueLabels {
    Table,
    Id,
    IssueId,
    LabelId,
}

#[derive(DeriveIden)]
#[sea_orm(iden = "notes")]
enum Notes {
    Table,
    Id,
    ProjectId,
    NoteableType,
    NoteableId,
    Body,
    AuthorId,
    CommitId,
    LineCode,
    Kind,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
#[sea_orm(iden = "releases")]
enum Releases {
    Table,
    Id,
    ProjectId,
    Tag,
    Description,
    CreatedAt,
    UpdatedAt,
}
