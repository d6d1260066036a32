//! 创业想法实体

use sea_orm::entity::prelude::*;

use super::to_datetime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "startup_ideas")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_id: i64,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub category: Option<String>,
    pub status: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub reviewer_comment: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::students::Entity",
        from = "Column::StudentId",
        to = "super::students::Column::Id"
    )]
    Student,
}

impl Related<super::students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_idea(
        self,
        student: Option<super::students::Model>,
    ) -> crate::models::startup_ideas::entities::StartupIdea {
        use crate::models::startup_ideas::entities::{IdeaStatus, StartupIdea};

        StartupIdea {
            id: self.id,
            student_id: self.student_id,
            student_name: student.map(|s| s.name),
            title: self.title,
            description: self.description,
            category: self.category,
            status: self.status.parse().unwrap_or(IdeaStatus::Pending),
            reviewer_comment: self.reviewer_comment,
            created_at: to_datetime(self.created_at),
            updated_at: to_datetime(self.updated_at),
        }
    }
}
