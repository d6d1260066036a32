use sea_orm_migration::prelude::*;

use super::m20250301_000001_create_tables::{Students, Teachers};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ==================== 日程表 ====================
        manager
            .create_table(
                Table::create()
                    .table(Schedules::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Schedules::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Schedules::Title).string().not_null())
                    .col(ColumnDef::new(Schedules::Description).text().null())
                    .col(ColumnDef::new(Schedules::EventType).string().not_null())
                    .col(ColumnDef::new(Schedules::StartTime).big_integer().not_null())
                    .col(ColumnDef::new(Schedules::EndTime).big_integer().null())
                    .col(ColumnDef::new(Schedules::Location).string().null())
                    .col(ColumnDef::new(Schedules::TargetAudience).string().not_null())
                    .col(ColumnDef::new(Schedules::CreatedBy).big_integer().not_null())
                    .col(ColumnDef::new(Schedules::CreatorRole).string().not_null())
                    .col(ColumnDef::new(Schedules::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Schedules::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // ==================== 反馈表 ====================
        manager
            .create_table(
                Table::create()
                    .table(Feedback::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Feedback::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Feedback::StudentId).big_integer().not_null())
                    .col(ColumnDef::new(Feedback::TeacherId).big_integer().null())
                    .col(ColumnDef::new(Feedback::Subject).string().not_null())
                    .col(ColumnDef::new(Feedback::Message).text().not_null())
                    .col(ColumnDef::new(Feedback::Rating).integer().null())
                    .col(
                        ColumnDef::new(Feedback::IsAnonymous)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Feedback::Response).text().null())
                    .col(ColumnDef::new(Feedback::RespondedAt).big_integer().null())
                    .col(ColumnDef::new(Feedback::CreatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Feedback::Table, Feedback::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Feedback::Table, Feedback::TeacherId)
                            .to(Teachers::Table, Teachers::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // ==================== 创业想法表 ====================
        manager
            .create_table(
                Table::create()
                    .table(StartupIdeas::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(StartupIdeas::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(StartupIdeas::StudentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(StartupIdeas::Title).string().not_null())
                    .col(ColumnDef::new(StartupIdeas::Description).text().not_null())
                    .col(ColumnDef::new(StartupIdeas::Category).string().null())
                    .col(ColumnDef::new(StartupIdeas::Status).string().not_null())
                    .col(ColumnDef::new(StartupIdeas::ReviewerComment).text().null())
                    .col(
                        ColumnDef::new(StartupIdeas::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StartupIdeas::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(StartupIdeas::Table, StartupIdeas::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // ==================== 通知表 ====================
        manager
            .create_table(
                Table::create()
                    .table(Notifications::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Notifications::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Notifications::RecipientId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Notifications::RecipientRole)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Notifications::NotificationType)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Notifications::Title).string().not_null())
                    .col(ColumnDef::new(Notifications::Message).text().not_null())
                    .col(ColumnDef::new(Notifications::Link).string().null())
                    .col(
                        ColumnDef::new(Notifications::IsRead)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Notifications::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // ==================== 教学大纲表 ====================
        manager
            .create_table(
                Table::create()
                    .table(SyllabusTopics::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SyllabusTopics::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(SyllabusTopics::TeacherId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(SyllabusTopics::Subject).string().not_null())
                    .col(ColumnDef::new(SyllabusTopics::Semester).integer().null())
                    .col(ColumnDef::new(SyllabusTopics::Title).string().not_null())
                    .col(ColumnDef::new(SyllabusTopics::Description).text().null())
                    .col(ColumnDef::new(SyllabusTopics::Position).integer().not_null())
                    .col(
                        ColumnDef::new(SyllabusTopics::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SyllabusTopics::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(SyllabusTopics::Table, SyllabusTopics::TeacherId)
                            .to(Teachers::Table, Teachers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(SyllabusSubtopics::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SyllabusSubtopics::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(SyllabusSubtopics::TopicId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(SyllabusSubtopics::Title).string().not_null())
                    .col(
                        ColumnDef::new(SyllabusSubtopics::Position)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SyllabusSubtopics::IsCompleted)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(SyllabusSubtopics::CompletedAt)
                            .big_integer()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(SyllabusSubtopics::Table, SyllabusSubtopics::TopicId)
                            .to(SyllabusTopics::Table, SyllabusTopics::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // ==================== 索引 ====================
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_schedules_start_time")
                    .table(Schedules::Table)
                    .col(Schedules::StartTime)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_notifications_recipient")
                    .table(Notifications::Table)
                    .col(Notifications::RecipientRole)
                    .col(Notifications::RecipientId)
                    .col(Notifications::IsRead)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_syllabus_topics_subject")
                    .table(SyllabusTopics::Table)
                    .col(SyllabusTopics::Subject)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SyllabusSubtopics::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SyllabusTopics::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Notifications::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(StartupIdeas::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Feedback::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Schedules::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Schedules {
    #[sea_orm(iden = "schedules")]
    Table,
    Id,
    Title,
    Description,
    EventType,
    StartTime,
    EndTime,
    Location,
    TargetAudience,
    CreatedBy,
    CreatorRole,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Feedback {
    #[sea_orm(iden = "feedback")]
    Table,
    Id,
    StudentId,
    TeacherId,
    Subject,
    Message,
    Rating,
    IsAnonymous,
    Response,
    RespondedAt,
    CreatedAt,
}

#[derive(DeriveIden)]
enum StartupIdeas {
    #[sea_orm(iden = "startup_ideas")]
    Table,
    Id,
    StudentId,
    Title,
    Description,
    Category,
    Status,
    ReviewerComment,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Notifications {
    #[sea_orm(iden = "notifications")]
    Table,
    Id,
    RecipientId,
    RecipientRole,
    NotificationType,
    Title,
    Message,
    Link,
    IsRead,
    CreatedAt,
}

#[derive(DeriveIden)]
enum SyllabusTopics {
    #[sea_orm(iden = "syllabus_topics")]
    Table,
    Id,
    TeacherId,
    Subject,
    Semester,
    Title,
    Description,
    Position,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum SyllabusSubtopics {
    #[sea_orm(iden = "syllabus_subtopics")]
    Table,
    Id,
    TopicId,
    Title,
    Position,
    IsCompleted,
    CompletedAt,
}
