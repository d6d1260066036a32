//! 作业提交实体

use sea_orm::entity::prelude::*;

use super::{to_datetime, to_datetime_opt};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "assignment_submissions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub assignment_id: i64,
    pub student_id: i64,
    #[sea_orm(column_type = "Text", nullable)]
    pub content: Option<String>,
    pub file_name: Option<String>,
    pub file_path: Option<String>,
    pub status: String,
    pub marks: Option<i32>,
    #[sea_orm(column_type = "Text", nullable)]
    pub feedback: Option<String>,
    pub submitted_at: i64,
    pub graded_at: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::assignments::Entity",
        from = "Column::AssignmentId",
        to = "super::assignments::Column::Id"
    )]
    Assignment,
    #[sea_orm(
        belongs_to = "super::students::Entity",
        from = "Column::StudentId",
        to = "super::students::Column::Id"
    )]
    Student,
}

impl Related<super::assignments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Assignment.def()
    }
}

impl Related<super::students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// 转换为业务模型，可附带学生信息
    pub fn into_submission(
        self,
        student: Option<super::students::Model>,
    ) -> crate::models::assignments::entities::AssignmentSubmission {
        use crate::models::assignments::entities::{AssignmentSubmission, SubmissionStatus};

        let (student_name, roll_number) = match student {
            Some(s) => (Some(s.name), s.roll_number),
            None => (None, None),
        };

        AssignmentSubmission {
            id: self.id,
            assignment_id: self.assignment_id,
            student_id: self.student_id,
            student_name,
            roll_number,
            content: self.content,
            file_name: self.file_name,
            file_path: self.file_path,
            status: self.status.parse().unwrap_or(SubmissionStatus::Submitted),
            marks: self.marks,
            feedback: self.feedback,
            submitted_at: to_datetime(self.submitted_at),
            graded_at: to_datetime_opt(self.graded_at),
        }
    }
}
