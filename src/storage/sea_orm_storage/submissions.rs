//! 作业提交存储操作

use super::{SeaOrmStorage, write_error};
use crate::entity::assignment_submissions::{ActiveModel, Column, Entity as Submissions};
use crate::entity::students::Entity as Students;
use crate::errors::{LmsError, Result};
use crate::models::assignments::{
    entities::{AssignmentSubmission, SubmissionStatus},
    requests::NewSubmission,
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 提交作业；已存在的未批改提交会被覆盖
    pub async fn upsert_submission_impl(
        &self,
        submission: NewSubmission,
    ) -> Result<AssignmentSubmission> {
        let now = chrono::Utc::now().timestamp();
        let status = if submission.is_late {
            SubmissionStatus::Late
        } else {
            SubmissionStatus::Submitted
        };

        let existing = Submissions::find()
            .filter(Column::AssignmentId.eq(submission.assignment_id))
            .filter(Column::StudentId.eq(submission.student_id))
            .one(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("查询提交失败: {e}")))?;

        let saved = match existing {
            Some(existing) => {
                let mut model = ActiveModel {
                    id: Set(existing.id),
                    content: Set(submission.content),
                    status: Set(status.to_string()),
                    submitted_at: Set(now),
                    ..Default::default()
                };
                // 没有新文件时保留原文件
                if submission.file_path.is_some() {
                    model.file_name = Set(submission.file_name);
                    model.file_path = Set(submission.file_path);
                }
                model
                    .update(&self.db)
                    .await
                    .map_err(|e| LmsError::database_operation(format!("更新提交失败: {e}")))?
            }
            None => ActiveModel {
                assignment_id: Set(submission.assignment_id),
                student_id: Set(submission.student_id),
                content: Set(submission.content),
                file_name: Set(submission.file_name),
                file_path: Set(submission.file_path),
                status: Set(status.to_string()),
                marks: Set(None),
                feedback: Set(None),
                submitted_at: Set(now),
                graded_at: Set(None),
                ..Default::default()
            }
            .insert(&self.db)
            .await
            .map_err(|e| write_error("创建提交失败", e))?,
        };

        Ok(saved.into_submission(None))
    }

    pub async fn get_submission_by_id_impl(&self, id: i64) -> Result<Option<AssignmentSubmission>> {
        let result = Submissions::find_by_id(id)
            .find_also_related(Students)
            .one(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("查询提交失败: {e}")))?;

        Ok(result.map(|(m, student)| m.into_submission(student)))
    }

    pub async fn get_submission_by_assignment_and_student_impl(
        &self,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<Option<AssignmentSubmission>> {
        let result = Submissions::find()
            .filter(Column::AssignmentId.eq(assignment_id))
            .filter(Column::StudentId.eq(student_id))
            .one(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("查询提交失败: {e}")))?;

        Ok(result.map(|m| m.into_submission(None)))
    }

    /// 列出某作业的全部提交，附带学生姓名与学号
    pub async fn list_submissions_by_assignment_impl(
        &self,
        assignment_id: i64,
    ) -> Result<Vec<AssignmentSubmission>> {
        let rows = Submissions::find()
            .filter(Column::AssignmentId.eq(assignment_id))
            .find_also_related(Students)
            .order_by_asc(Column::SubmittedAt)
            .all(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("查询提交列表失败: {e}")))?;

        Ok(rows
            .into_iter()
            .map(|(m, student)| m.into_submission(student))
            .collect())
    }

    /// 批改
    pub async fn grade_submission_impl(
        &self,
        id: i64,
        marks: i32,
        feedback: Option<String>,
    ) -> Result<Option<AssignmentSubmission>> {
        let existing = Submissions::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("查询提交失败: {e}")))?;
        if existing.is_none() {
            return Ok(None);
        }

        let model = ActiveModel {
            id: Set(id),
            marks: Set(Some(marks)),
            feedback: Set(feedback),
            status: Set(SubmissionStatus::Graded.to_string()),
            graded_at: Set(Some(chrono::Utc::now().timestamp())),
            ..Default::default()
        };

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("批改提交失败: {e}")))?;

        Ok(Some(result.into_submission(None)))
    }
}
