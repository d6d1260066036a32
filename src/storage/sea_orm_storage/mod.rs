//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod accounts;
mod announcements;
mod assignments;
mod dashboard;
mod feedback;
mod materials;
mod notifications;
mod quizzes;
mod schedules;
mod startup_ideas;
mod students;
mod submissions;
mod syllabus;
mod teachers;

#[cfg(test)]
mod tests;

use crate::config::AppConfig;
use crate::errors::{LmsError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr, SqlErr};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite://") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| LmsError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// 包装已有连接
    pub fn from_connection(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// 已迁移的内存 SQLite，仅测试使用
    #[cfg(test)]
    pub(crate) async fn in_memory() -> Self {
        let mut opt = ConnectOptions::new("sqlite::memory:");
        opt.max_connections(1).min_connections(1).sqlx_logging(false);
        let db = Database::connect(opt).await.expect("connect in-memory sqlite");
        Migrator::up(&db, None).await.expect("run migrations");
        Self::from_connection(db)
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| LmsError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| LmsError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(2)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| LmsError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite://") || url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") || url == ":memory:" {
            Ok(format!("sqlite://{url}?mode=rwc"))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(LmsError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

/// 写操作的错误映射：唯一约束冲突转为 Conflict，其余为数据库操作错误
pub(crate) fn write_error(context: &str, e: DbErr) -> LmsError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            LmsError::conflict(format!("{context}: 记录已存在"))
        }
        _ => LmsError::database_operation(format!("{context}: {e}")),
    }
}

// Storage trait 实现
use crate::models::{
    announcements::{
        entities::Announcement,
        requests::{AnnouncementListQuery, CreateAnnouncementRequest, UpdateAnnouncementRequest},
        responses::AnnouncementListResponse,
    },
    assignments::{
        entities::{Assignment, AssignmentSubmission},
        requests::{
            AssignmentListQuery, CreateAssignmentRequest, NewSubmission, UpdateAssignmentRequest,
        },
        responses::AssignmentListResponse,
    },
    dashboard::responses::{AdminDashboardStats, StudentDashboardStats, TeacherDashboardStats},
    feedback::{
        entities::Feedback,
        requests::{CreateFeedbackRequest, FeedbackListQuery},
        responses::FeedbackListResponse,
    },
    materials::{
        entities::Material,
        requests::{MaterialListQuery, NewMaterial},
        responses::MaterialListResponse,
    },
    notifications::{
        entities::{NewNotification, Notification},
        requests::NotificationListQuery,
        responses::NotificationListResponse,
    },
    quizzes::{
        entities::{Quiz, QuizAttempt, QuizQuestion},
        requests::{CreateQuizRequest, NewQuestion, QuizListQuery, UpdateQuizRequest},
        responses::QuizListResponse,
    },
    schedules::{
        entities::Schedule,
        requests::{CreateScheduleRequest, ScheduleListQuery, UpdateScheduleRequest},
        responses::ScheduleListResponse,
    },
    startup_ideas::{
        entities::{IdeaStatus, StartupIdea},
        requests::{CreateStartupIdeaRequest, StartupIdeaListQuery, UpdateStartupIdeaRequest},
        responses::StartupIdeaListResponse,
    },
    students::{
        entities::Student,
        requests::{CreateStudentRequest, StudentListQuery, UpdateStudentRequest},
        responses::StudentListResponse,
    },
    syllabus::{
        entities::{SyllabusSubtopic, SyllabusTopic},
        requests::{CreateTopicRequest, SyllabusQuery, UpdateSubtopicRequest, UpdateTopicRequest},
        responses::SyllabusProgressResponse,
    },
    teachers::{
        entities::Teacher,
        requests::{CreateTeacherRequest, TeacherListQuery, UpdateTeacherRequest},
        responses::TeacherListResponse,
    },
    users::entities::{Account, UserRole},
};
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 账号模块
    async fn get_account_by_email(&self, role: UserRole, email: &str) -> Result<Option<Account>> {
        self.get_account_by_email_impl(role, email).await
    }

    async fn get_account_by_id(&self, role: UserRole, id: i64) -> Result<Option<Account>> {
        self.get_account_by_id_impl(role, id).await
    }

    async fn update_account_password(
        &self,
        role: UserRole,
        id: i64,
        password_hash: &str,
    ) -> Result<bool> {
        self.update_account_password_impl(role, id, password_hash)
            .await
    }

    async fn update_admin_last_login(&self, id: i64) -> Result<bool> {
        self.update_admin_last_login_impl(id).await
    }

    async fn count_admins(&self) -> Result<u64> {
        self.count_admins_impl().await
    }

    async fn create_admin(&self, name: &str, email: &str, password_hash: &str) -> Result<Account> {
        self.create_admin_impl(name, email, password_hash).await
    }

    // 学生模块
    async fn create_student(&self, req: CreateStudentRequest) -> Result<Student> {
        self.create_student_impl(req).await
    }

    async fn get_student_by_id(&self, id: i64) -> Result<Option<Student>> {
        self.get_student_by_id_impl(id).await
    }

    async fn get_student_by_roll_number(&self, roll_number: &str) -> Result<Option<Student>> {
        self.get_student_by_roll_number_impl(roll_number).await
    }

    async fn list_students_with_pagination(
        &self,
        query: StudentListQuery,
    ) -> Result<StudentListResponse> {
        self.list_students_with_pagination_impl(query).await
    }

    async fn update_student(
        &self,
        id: i64,
        update: UpdateStudentRequest,
    ) -> Result<Option<Student>> {
        self.update_student_impl(id, update).await
    }

    async fn delete_student(&self, id: i64) -> Result<bool> {
        self.delete_student_impl(id).await
    }

    async fn list_active_student_ids(&self, semester: Option<i32>) -> Result<Vec<i64>> {
        self.list_active_student_ids_impl(semester).await
    }

    // 教师模块
    async fn create_teacher(&self, req: CreateTeacherRequest) -> Result<Teacher> {
        self.create_teacher_impl(req).await
    }

    async fn get_teacher_by_id(&self, id: i64) -> Result<Option<Teacher>> {
        self.get_teacher_by_id_impl(id).await
    }

    async fn list_teachers_with_pagination(
        &self,
        query: TeacherListQuery,
    ) -> Result<TeacherListResponse> {
        self.list_teachers_with_pagination_impl(query).await
    }

    async fn update_teacher(
        &self,
        id: i64,
        update: UpdateTeacherRequest,
    ) -> Result<Option<Teacher>> {
        self.update_teacher_impl(id, update).await
    }

    async fn delete_teacher(&self, id: i64) -> Result<bool> {
        self.delete_teacher_impl(id).await
    }

    async fn list_active_teacher_ids(&self) -> Result<Vec<i64>> {
        self.list_active_teacher_ids_impl().await
    }

    // 公告模块
    async fn create_announcement(
        &self,
        author_id: i64,
        author_role: UserRole,
        req: CreateAnnouncementRequest,
    ) -> Result<Announcement> {
        self.create_announcement_impl(author_id, author_role, req)
            .await
    }

    async fn get_announcement_by_id(&self, id: i64) -> Result<Option<Announcement>> {
        self.get_announcement_by_id_impl(id).await
    }

    async fn list_announcements_with_pagination(
        &self,
        query: AnnouncementListQuery,
    ) -> Result<AnnouncementListResponse> {
        self.list_announcements_with_pagination_impl(query).await
    }

    async fn update_announcement(
        &self,
        id: i64,
        update: UpdateAnnouncementRequest,
    ) -> Result<Option<Announcement>> {
        self.update_announcement_impl(id, update).await
    }

    async fn delete_announcement(&self, id: i64) -> Result<bool> {
        self.delete_announcement_impl(id).await
    }

    // 资料模块
    async fn create_material(&self, material: NewMaterial) -> Result<Material> {
        self.create_material_impl(material).await
    }

    async fn get_material_by_id(&self, id: i64) -> Result<Option<Material>> {
        self.get_material_by_id_impl(id).await
    }

    async fn list_materials_with_pagination(
        &self,
        query: MaterialListQuery,
    ) -> Result<MaterialListResponse> {
        self.list_materials_with_pagination_impl(query).await
    }

    async fn delete_material(&self, id: i64) -> Result<bool> {
        self.delete_material_impl(id).await
    }

    // 作业模块
    async fn create_assignment(
        &self,
        teacher_id: i64,
        req: CreateAssignmentRequest,
    ) -> Result<Assignment> {
        self.create_assignment_impl(teacher_id, req).await
    }

    async fn get_assignment_by_id(&self, id: i64) -> Result<Option<Assignment>> {
        self.get_assignment_by_id_impl(id).await
    }

    async fn list_assignments_with_pagination(
        &self,
        query: AssignmentListQuery,
    ) -> Result<AssignmentListResponse> {
        self.list_assignments_with_pagination_impl(query).await
    }

    async fn update_assignment(
        &self,
        id: i64,
        update: UpdateAssignmentRequest,
    ) -> Result<Option<Assignment>> {
        self.update_assignment_impl(id, update).await
    }

    async fn set_assignment_attachment(
        &self,
        id: i64,
        file_name: &str,
        file_path: &str,
    ) -> Result<Option<Assignment>> {
        self.set_assignment_attachment_impl(id, file_name, file_path)
            .await
    }

    async fn delete_assignment(&self, id: i64) -> Result<bool> {
        self.delete_assignment_impl(id).await
    }

    // 提交模块
    async fn upsert_submission(&self, submission: NewSubmission) -> Result<AssignmentSubmission> {
        self.upsert_submission_impl(submission).await
    }

    async fn get_submission_by_id(&self, id: i64) -> Result<Option<AssignmentSubmission>> {
        self.get_submission_by_id_impl(id).await
    }

    async fn get_submission_by_assignment_and_student(
        &self,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<Option<AssignmentSubmission>> {
        self.get_submission_by_assignment_and_student_impl(assignment_id, student_id)
            .await
    }

    async fn list_submissions_by_assignment(
        &self,
        assignment_id: i64,
    ) -> Result<Vec<AssignmentSubmission>> {
        self.list_submissions_by_assignment_impl(assignment_id)
            .await
    }

    async fn grade_submission(
        &self,
        id: i64,
        marks: i32,
        feedback: Option<String>,
    ) -> Result<Option<AssignmentSubmission>> {
        self.grade_submission_impl(id, marks, feedback).await
    }

    // 测验模块
    async fn create_quiz(&self, teacher_id: i64, req: CreateQuizRequest) -> Result<Quiz> {
        self.create_quiz_impl(teacher_id, req).await
    }

    async fn get_quiz_by_id(&self, id: i64) -> Result<Option<Quiz>> {
        self.get_quiz_by_id_impl(id).await
    }

    async fn list_quizzes_with_pagination(
        &self,
        query: QuizListQuery,
    ) -> Result<QuizListResponse> {
        self.list_quizzes_with_pagination_impl(query).await
    }

    async fn update_quiz(&self, id: i64, update: UpdateQuizRequest) -> Result<Option<Quiz>> {
        self.update_quiz_impl(id, update).await
    }

    async fn delete_quiz(&self, id: i64) -> Result<bool> {
        self.delete_quiz_impl(id).await
    }

    async fn list_quiz_questions(&self, quiz_id: i64) -> Result<Vec<QuizQuestion>> {
        self.list_quiz_questions_impl(quiz_id).await
    }

    async fn add_quiz_questions(
        &self,
        quiz_id: i64,
        questions: Vec<NewQuestion>,
    ) -> Result<(Vec<QuizQuestion>, i32)> {
        self.add_quiz_questions_impl(quiz_id, questions).await
    }

    async fn create_quiz_attempt(
        &self,
        quiz_id: i64,
        student_id: i64,
        score: i32,
        total_marks: i32,
        answers: &serde_json::Value,
    ) -> Result<QuizAttempt> {
        self.create_quiz_attempt_impl(quiz_id, student_id, score, total_marks, answers)
            .await
    }

    async fn get_quiz_attempt(
        &self,
        quiz_id: i64,
        student_id: i64,
    ) -> Result<Option<QuizAttempt>> {
        self.get_quiz_attempt_impl(quiz_id, student_id).await
    }

    async fn list_quiz_attempts(&self, quiz_id: i64) -> Result<Vec<QuizAttempt>> {
        self.list_quiz_attempts_impl(quiz_id).await
    }

    // 日程模块
    async fn create_schedule(
        &self,
        created_by: i64,
        creator_role: UserRole,
        req: CreateScheduleRequest,
    ) -> Result<Schedule> {
        self.create_schedule_impl(created_by, creator_role, req)
            .await
    }

    async fn get_schedule_by_id(&self, id: i64) -> Result<Option<Schedule>> {
        self.get_schedule_by_id_impl(id).await
    }

    async fn list_schedules_with_pagination(
        &self,
        query: ScheduleListQuery,
    ) -> Result<ScheduleListResponse> {
        self.list_schedules_with_pagination_impl(query).await
    }

    async fn update_schedule(
        &self,
        id: i64,
        update: UpdateScheduleRequest,
    ) -> Result<Option<Schedule>> {
        self.update_schedule_impl(id, update).await
    }

    async fn delete_schedule(&self, id: i64) -> Result<bool> {
        self.delete_schedule_impl(id).await
    }

    // 通知模块
    async fn create_notifications_batch(
        &self,
        notifications: Vec<NewNotification>,
    ) -> Result<u64> {
        self.create_notifications_batch_impl(notifications).await
    }

    async fn get_notification_by_id(&self, id: i64) -> Result<Option<Notification>> {
        self.get_notification_by_id_impl(id).await
    }

    async fn list_notifications_with_pagination(
        &self,
        query: NotificationListQuery,
    ) -> Result<NotificationListResponse> {
        self.list_notifications_with_pagination_impl(query).await
    }

    async fn get_unread_notification_count(
        &self,
        recipient_id: i64,
        recipient_role: UserRole,
    ) -> Result<i64> {
        self.get_unread_notification_count_impl(recipient_id, recipient_role)
            .await
    }

    async fn mark_notification_as_read(&self, id: i64) -> Result<bool> {
        self.mark_notification_as_read_impl(id).await
    }

    async fn mark_all_notifications_as_read(
        &self,
        recipient_id: i64,
        recipient_role: UserRole,
    ) -> Result<i64> {
        self.mark_all_notifications_as_read_impl(recipient_id, recipient_role)
            .await
    }

    async fn delete_notification(&self, id: i64) -> Result<bool> {
        self.delete_notification_impl(id).await
    }

    // 反馈模块
    async fn create_feedback(
        &self,
        student_id: i64,
        req: CreateFeedbackRequest,
    ) -> Result<Feedback> {
        self.create_feedback_impl(student_id, req).await
    }

    async fn get_feedback_by_id(&self, id: i64) -> Result<Option<Feedback>> {
        self.get_feedback_by_id_impl(id).await
    }

    async fn list_feedback_with_pagination(
        &self,
        query: FeedbackListQuery,
    ) -> Result<FeedbackListResponse> {
        self.list_feedback_with_pagination_impl(query).await
    }

    async fn respond_feedback(&self, id: i64, response: String) -> Result<Option<Feedback>> {
        self.respond_feedback_impl(id, response).await
    }

    async fn delete_feedback(&self, id: i64) -> Result<bool> {
        self.delete_feedback_impl(id).await
    }

    // 创业想法模块
    async fn create_startup_idea(
        &self,
        student_id: i64,
        req: CreateStartupIdeaRequest,
    ) -> Result<StartupIdea> {
        self.create_startup_idea_impl(student_id, req).await
    }

    async fn get_startup_idea_by_id(&self, id: i64) -> Result<Option<StartupIdea>> {
        self.get_startup_idea_by_id_impl(id).await
    }

    async fn list_startup_ideas_with_pagination(
        &self,
        query: StartupIdeaListQuery,
    ) -> Result<StartupIdeaListResponse> {
        self.list_startup_ideas_with_pagination_impl(query).await
    }

    async fn update_startup_idea(
        &self,
        id: i64,
        update: UpdateStartupIdeaRequest,
    ) -> Result<Option<StartupIdea>> {
        self.update_startup_idea_impl(id, update).await
    }

    async fn review_startup_idea(
        &self,
        id: i64,
        status: IdeaStatus,
        reviewer_comment: Option<String>,
    ) -> Result<Option<StartupIdea>> {
        self.review_startup_idea_impl(id, status, reviewer_comment)
            .await
    }

    async fn delete_startup_idea(&self, id: i64) -> Result<bool> {
        self.delete_startup_idea_impl(id).await
    }

    // 教学大纲模块
    async fn create_syllabus_topic(
        &self,
        teacher_id: i64,
        req: CreateTopicRequest,
    ) -> Result<SyllabusTopic> {
        self.create_syllabus_topic_impl(teacher_id, req).await
    }

    async fn get_syllabus_topic_by_id(&self, id: i64) -> Result<Option<SyllabusTopic>> {
        self.get_syllabus_topic_by_id_impl(id).await
    }

    async fn list_syllabus_topics(&self, query: SyllabusQuery) -> Result<Vec<SyllabusTopic>> {
        self.list_syllabus_topics_impl(query).await
    }

    async fn update_syllabus_topic(
        &self,
        id: i64,
        update: UpdateTopicRequest,
    ) -> Result<Option<SyllabusTopic>> {
        self.update_syllabus_topic_impl(id, update).await
    }

    async fn delete_syllabus_topic(&self, id: i64) -> Result<bool> {
        self.delete_syllabus_topic_impl(id).await
    }

    async fn create_syllabus_subtopic(
        &self,
        topic_id: i64,
        title: String,
    ) -> Result<SyllabusSubtopic> {
        self.create_syllabus_subtopic_impl(topic_id, title).await
    }

    async fn get_syllabus_subtopic_by_id(&self, id: i64) -> Result<Option<SyllabusSubtopic>> {
        self.get_syllabus_subtopic_by_id_impl(id).await
    }

    async fn update_syllabus_subtopic(
        &self,
        id: i64,
        update: UpdateSubtopicRequest,
    ) -> Result<Option<SyllabusSubtopic>> {
        self.update_syllabus_subtopic_impl(id, update).await
    }

    async fn delete_syllabus_subtopic(&self, id: i64) -> Result<bool> {
        self.delete_syllabus_subtopic_impl(id).await
    }

    async fn get_syllabus_progress(
        &self,
        query: SyllabusQuery,
    ) -> Result<SyllabusProgressResponse> {
        self.get_syllabus_progress_impl(query).await
    }

    // 仪表盘
    async fn get_admin_dashboard_stats(&self) -> Result<AdminDashboardStats> {
        self.get_admin_dashboard_stats_impl().await
    }

    async fn get_teacher_dashboard_stats(&self, teacher_id: i64) -> Result<TeacherDashboardStats> {
        self.get_teacher_dashboard_stats_impl(teacher_id).await
    }

    async fn get_student_dashboard_stats(
        &self,
        student_id: i64,
        semester: Option<i32>,
    ) -> Result<StudentDashboardStats> {
        self.get_student_dashboard_stats_impl(student_id, semester)
            .await
    }
}
