//! 测验题目实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "quiz_questions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub quiz_id: i64,
    pub position: i32,
    #[sea_orm(column_type = "Text")]
    pub question_text: String,
    // JSON 文本数组
    #[sea_orm(column_type = "Text")]
    pub options: String,
    pub correct_answer: i32,
    pub marks: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::quizzes::Entity",
        from = "Column::QuizId",
        to = "super::quizzes::Column::Id"
    )]
    Quiz,
}

impl Related<super::quizzes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Quiz.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_question(self) -> crate::models::quizzes::entities::QuizQuestion {
        use crate::models::quizzes::entities::QuizQuestion;

        QuizQuestion {
            id: self.id,
            quiz_id: self.quiz_id,
            position: self.position,
            question_text: self.question_text,
            options: serde_json::from_str(&self.options).unwrap_or_default(),
            correct_answer: Some(self.correct_answer),
            marks: self.marks,
        }
    }
}
