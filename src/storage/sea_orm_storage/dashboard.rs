//! 仪表盘统计查询

use super::SeaOrmStorage;
use crate::entity::{
    assignment_submissions, assignments, feedback, materials, notifications, quiz_attempts,
    quizzes, schedules, startup_ideas, students, teachers,
};
use crate::errors::{LmsError, Result};
use crate::models::{
    assignments::entities::SubmissionStatus,
    dashboard::responses::{AdminDashboardStats, StudentDashboardStats, TeacherDashboardStats},
    startup_ideas::entities::IdeaStatus,
    users::entities::UserRole,
};
use sea_orm::{
    ColumnTrait, Condition, EntityTrait, JoinType, PaginatorTrait, QueryFilter, QuerySelect,
    RelationTrait,
};

fn count_error(what: &str, e: sea_orm::DbErr) -> LmsError {
    LmsError::database_operation(format!("统计{what}失败: {e}"))
}

/// 学生可见的学期条件：本学期或未指定学期
fn semester_visible<C: ColumnTrait>(column: C, semester: Option<i32>) -> Condition {
    match semester {
        Some(s) => Condition::any().add(column.eq(s)).add(column.is_null()),
        None => Condition::all(),
    }
}

impl SeaOrmStorage {
    pub async fn get_admin_dashboard_stats_impl(&self) -> Result<AdminDashboardStats> {
        let db = &self.db;

        Ok(AdminDashboardStats {
            total_students: students::Entity::find()
                .count(db)
                .await
                .map_err(|e| count_error("学生", e))? as i64,
            total_teachers: teachers::Entity::find()
                .count(db)
                .await
                .map_err(|e| count_error("教师", e))? as i64,
            total_quizzes: quizzes::Entity::find()
                .count(db)
                .await
                .map_err(|e| count_error("测验", e))? as i64,
            total_assignments: assignments::Entity::find()
                .count(db)
                .await
                .map_err(|e| count_error("作业", e))? as i64,
            total_materials: materials::Entity::find()
                .count(db)
                .await
                .map_err(|e| count_error("资料", e))? as i64,
            pending_startup_ideas: startup_ideas::Entity::find()
                .filter(startup_ideas::Column::Status.eq(IdeaStatus::Pending.to_string()))
                .count(db)
                .await
                .map_err(|e| count_error("创业想法", e))? as i64,
            unanswered_feedback: feedback::Entity::find()
                .filter(feedback::Column::Response.is_null())
                .count(db)
                .await
                .map_err(|e| count_error("反馈", e))? as i64,
        })
    }

    pub async fn get_teacher_dashboard_stats_impl(
        &self,
        teacher_id: i64,
    ) -> Result<TeacherDashboardStats> {
        let db = &self.db;

        let ungraded_submissions = assignment_submissions::Entity::find()
            .join(
                JoinType::InnerJoin,
                assignment_submissions::Relation::Assignment.def(),
            )
            .filter(assignments::Column::TeacherId.eq(teacher_id))
            .filter(assignment_submissions::Column::Status.ne(SubmissionStatus::Graded.to_string()))
            .count(db)
            .await
            .map_err(|e| count_error("待批改提交", e))? as i64;

        Ok(TeacherDashboardStats {
            my_quizzes: quizzes::Entity::find()
                .filter(quizzes::Column::TeacherId.eq(teacher_id))
                .count(db)
                .await
                .map_err(|e| count_error("测验", e))? as i64,
            my_assignments: assignments::Entity::find()
                .filter(assignments::Column::TeacherId.eq(teacher_id))
                .count(db)
                .await
                .map_err(|e| count_error("作业", e))? as i64,
            my_materials: materials::Entity::find()
                .filter(materials::Column::TeacherId.eq(teacher_id))
                .count(db)
                .await
                .map_err(|e| count_error("资料", e))? as i64,
            ungraded_submissions,
            unread_notifications: self
                .get_unread_notification_count_impl(teacher_id, UserRole::Teacher)
                .await?,
        })
    }

    pub async fn get_student_dashboard_stats_impl(
        &self,
        student_id: i64,
        semester: Option<i32>,
    ) -> Result<StudentDashboardStats> {
        let db = &self.db;
        let now = chrono::Utc::now().timestamp();

        Ok(StudentDashboardStats {
            available_quizzes: quizzes::Entity::find()
                .filter(quizzes::Column::IsPublished.eq(true))
                .filter(semester_visible(quizzes::Column::Semester, semester))
                .count(db)
                .await
                .map_err(|e| count_error("测验", e))? as i64,
            attempted_quizzes: quiz_attempts::Entity::find()
                .filter(quiz_attempts::Column::StudentId.eq(student_id))
                .count(db)
                .await
                .map_err(|e| count_error("作答", e))? as i64,
            assignments: assignments::Entity::find()
                .filter(semester_visible(assignments::Column::Semester, semester))
                .count(db)
                .await
                .map_err(|e| count_error("作业", e))? as i64,
            submitted_assignments: assignment_submissions::Entity::find()
                .filter(assignment_submissions::Column::StudentId.eq(student_id))
                .count(db)
                .await
                .map_err(|e| count_error("提交", e))? as i64,
            upcoming_schedules: schedules::Entity::find()
                .filter(schedules::Column::StartTime.gte(now))
                .count(db)
                .await
                .map_err(|e| count_error("日程", e))? as i64,
            unread_notifications: notifications::Entity::find()
                .filter(notifications::Column::RecipientId.eq(student_id))
                .filter(notifications::Column::RecipientRole.eq(UserRole::Student.to_string()))
                .filter(notifications::Column::IsRead.eq(false))
                .count(db)
                .await
                .map_err(|e| count_error("通知", e))? as i64,
        })
    }
}
