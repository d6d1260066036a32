//! 测验作答实体

use sea_orm::entity::prelude::*;

use super::to_datetime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "quiz_attempts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub quiz_id: i64,
    pub student_id: i64,
    pub score: i32,
    pub total_marks: i32,
    // 原始答卷 JSON
    #[sea_orm(column_type = "Text")]
    pub answers: String,
    pub submitted_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::quizzes::Entity",
        from = "Column::QuizId",
        to = "super::quizzes::Column::Id"
    )]
    Quiz,
    #[sea_orm(
        belongs_to = "super::students::Entity",
        from = "Column::StudentId",
        to = "super::students::Column::Id"
    )]
    Student,
}

impl Related<super::quizzes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Quiz.def()
    }
}

impl Related<super::students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_attempt(
        self,
        student: Option<super::students::Model>,
    ) -> crate::models::quizzes::entities::QuizAttempt {
        use crate::models::quizzes::entities::QuizAttempt;

        let (student_name, roll_number) = match student {
            Some(s) => (Some(s.name), s.roll_number),
            None => (None, None),
        };

        QuizAttempt {
            id: self.id,
            quiz_id: self.quiz_id,
            student_id: self.student_id,
            student_name,
            roll_number,
            score: self.score,
            total_marks: self.total_marks,
            answers: serde_json::from_str(&self.answers).unwrap_or(serde_json::Value::Null),
            submitted_at: to_datetime(self.submitted_at),
        }
    }
}
