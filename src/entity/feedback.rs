//! 反馈实体

use sea_orm::entity::prelude::*;

use super::{to_datetime, to_datetime_opt};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "feedback")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_id: i64,
    pub teacher_id: Option<i64>,
    pub subject: String,
    #[sea_orm(column_type = "Text")]
    pub message: String,
    pub rating: Option<i32>,
    pub is_anonymous: bool,
    #[sea_orm(column_type = "Text", nullable)]
    pub response: Option<String>,
    pub responded_at: Option<i64>,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::students::Entity",
        from = "Column::StudentId",
        to = "super::students::Column::Id"
    )]
    Student,
    #[sea_orm(
        belongs_to = "super::teachers::Entity",
        from = "Column::TeacherId",
        to = "super::teachers::Column::Id"
    )]
    Teacher,
}

impl Related<super::students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl Related<super::teachers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Teacher.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_feedback(
        self,
        student_name: Option<String>,
        teacher_name: Option<String>,
    ) -> crate::models::feedback::entities::Feedback {
        use crate::models::feedback::entities::Feedback;

        Feedback {
            id: self.id,
            student_id: Some(self.student_id),
            student_name,
            teacher_id: self.teacher_id,
            teacher_name,
            subject: self.subject,
            message: self.message,
            rating: self.rating,
            is_anonymous: self.is_anonymous,
            response: self.response,
            responded_at: to_datetime_opt(self.responded_at),
            created_at: to_datetime(self.created_at),
        }
    }
}
