use std::sync::Arc;

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

use crate::errors::Result;

pub mod sea_orm_storage;

/// 存储层抽象
///
/// 写入账号的请求中 `password` 字段必须已经是哈希值。
#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 账号（三张账号表的统一入口）
    async fn get_account_by_email(&self, role: UserRole, email: &str) -> Result<Option<Account>>;
    async fn get_account_by_id(&self, role: UserRole, id: i64) -> Result<Option<Account>>;
    async fn update_account_password(
        &self,
        role: UserRole,
        id: i64,
        password_hash: &str,
    ) -> Result<bool>;
    async fn update_admin_last_login(&self, id: i64) -> Result<bool>;
    async fn count_admins(&self) -> Result<u64>;
    async fn create_admin(&self, name: &str, email: &str, password_hash: &str) -> Result<Account>;

    /// 学生管理
    async fn create_student(&self, req: CreateStudentRequest) -> Result<Student>;
    async fn get_student_by_id(&self, id: i64) -> Result<Option<Student>>;
    async fn get_student_by_roll_number(&self, roll_number: &str) -> Result<Option<Student>>;
    async fn list_students_with_pagination(
        &self,
        query: StudentListQuery,
    ) -> Result<StudentListResponse>;
    async fn update_student(&self, id: i64, update: UpdateStudentRequest)
    -> Result<Option<Student>>;
    async fn delete_student(&self, id: i64) -> Result<bool>;
    // 通知接收者：在读学生 ID，可按学期过滤
    async fn list_active_student_ids(&self, semester: Option<i32>) -> Result<Vec<i64>>;

    /// 教师管理
    async fn create_teacher(&self, req: CreateTeacherRequest) -> Result<Teacher>;
    async fn get_teacher_by_id(&self, id: i64) -> Result<Option<Teacher>>;
    async fn list_teachers_with_pagination(
        &self,
        query: TeacherListQuery,
    ) -> Result<TeacherListResponse>;
    async fn update_teacher(&self, id: i64, update: UpdateTeacherRequest)
    -> Result<Option<Teacher>>;
    async fn delete_teacher(&self, id: i64) -> Result<bool>;
    async fn list_active_teacher_ids(&self) -> Result<Vec<i64>>;

    /// 公告
    async fn create_announcement(
        &self,
        author_id: i64,
        author_role: UserRole,
        req: CreateAnnouncementRequest,
    ) -> Result<Announcement>;
    async fn get_announcement_by_id(&self, id: i64) -> Result<Option<Announcement>>;
    async fn list_announcements_with_pagination(
        &self,
        query: AnnouncementListQuery,
    ) -> Result<AnnouncementListResponse>;
    async fn update_announcement(
        &self,
        id: i64,
        update: UpdateAnnouncementRequest,
    ) -> Result<Option<Announcement>>;
    async fn delete_announcement(&self, id: i64) -> Result<bool>;

    /// 学习资料
    async fn create_material(&self, material: NewMaterial) -> Result<Material>;
    async fn get_material_by_id(&self, id: i64) -> Result<Option<Material>>;
    async fn list_materials_with_pagination(
        &self,
        query: MaterialListQuery,
    ) -> Result<MaterialListResponse>;
    async fn delete_material(&self, id: i64) -> Result<bool>;

    /// 作业
    async fn create_assignment(
        &self,
        teacher_id: i64,
        req: CreateAssignmentRequest,
    ) -> Result<Assignment>;
    async fn get_assignment_by_id(&self, id: i64) -> Result<Option<Assignment>>;
    async fn list_assignments_with_pagination(
        &self,
        query: AssignmentListQuery,
    ) -> Result<AssignmentListResponse>;
    async fn update_assignment(
        &self,
        id: i64,
        update: UpdateAssignmentRequest,
    ) -> Result<Option<Assignment>>;
    async fn set_assignment_attachment(
        &self,
        id: i64,
        file_name: &str,
        file_path: &str,
    ) -> Result<Option<Assignment>>;
    async fn delete_assignment(&self, id: i64) -> Result<bool>;

    /// 作业提交
    // 未批改前允许重新提交，覆盖原记录
    async fn upsert_submission(&self, submission: NewSubmission) -> Result<AssignmentSubmission>;
    async fn get_submission_by_id(&self, id: i64) -> Result<Option<AssignmentSubmission>>;
    async fn get_submission_by_assignment_and_student(
        &self,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<Option<AssignmentSubmission>>;
    async fn list_submissions_by_assignment(
        &self,
        assignment_id: i64,
    ) -> Result<Vec<AssignmentSubmission>>;
    async fn grade_submission(
        &self,
        id: i64,
        marks: i32,
        feedback: Option<String>,
    ) -> Result<Option<AssignmentSubmission>>;

    /// 测验
    async fn create_quiz(&self, teacher_id: i64, req: CreateQuizRequest) -> Result<Quiz>;
    async fn get_quiz_by_id(&self, id: i64) -> Result<Option<Quiz>>;
    async fn list_quizzes_with_pagination(&self, query: QuizListQuery)
    -> Result<QuizListResponse>;
    async fn update_quiz(&self, id: i64, update: UpdateQuizRequest) -> Result<Option<Quiz>>;
    async fn delete_quiz(&self, id: i64) -> Result<bool>;
    async fn list_quiz_questions(&self, quiz_id: i64) -> Result<Vec<QuizQuestion>>;
    // 批量添加题目并同步 total_marks，同一事务内完成
    async fn add_quiz_questions(
        &self,
        quiz_id: i64,
        questions: Vec<NewQuestion>,
    ) -> Result<(Vec<QuizQuestion>, i32)>;
    // 重复作答返回 Conflict
    async fn create_quiz_attempt(
        &self,
        quiz_id: i64,
        student_id: i64,
        score: i32,
        total_marks: i32,
        answers: &serde_json::Value,
    ) -> Result<QuizAttempt>;
    async fn get_quiz_attempt(&self, quiz_id: i64, student_id: i64)
    -> Result<Option<QuizAttempt>>;
    async fn list_quiz_attempts(&self, quiz_id: i64) -> Result<Vec<QuizAttempt>>;

    /// 日程
    async fn create_schedule(
        &self,
        created_by: i64,
        creator_role: UserRole,
        req: CreateScheduleRequest,
    ) -> Result<Schedule>;
    async fn get_schedule_by_id(&self, id: i64) -> Result<Option<Schedule>>;
    async fn list_schedules_with_pagination(
        &self,
        query: ScheduleListQuery,
    ) -> Result<ScheduleListResponse>;
    async fn update_schedule(
        &self,
        id: i64,
        update: UpdateScheduleRequest,
    ) -> Result<Option<Schedule>>;
    async fn delete_schedule(&self, id: i64) -> Result<bool>;

    /// 通知
    // 单条 INSERT 批量写入，返回写入条数
    async fn create_notifications_batch(&self, notifications: Vec<NewNotification>)
    -> Result<u64>;
    async fn get_notification_by_id(&self, id: i64) -> Result<Option<Notification>>;
    async fn list_notifications_with_pagination(
        &self,
        query: NotificationListQuery,
    ) -> Result<NotificationListResponse>;
    async fn get_unread_notification_count(
        &self,
        recipient_id: i64,
        recipient_role: UserRole,
    ) -> Result<i64>;
    async fn mark_notification_as_read(&self, id: i64) -> Result<bool>;
    async fn mark_all_notifications_as_read(
        &self,
        recipient_id: i64,
        recipient_role: UserRole,
    ) -> Result<i64>;
    async fn delete_notification(&self, id: i64) -> Result<bool>;

    /// 反馈
    async fn create_feedback(&self, student_id: i64, req: CreateFeedbackRequest)
    -> Result<Feedback>;
    async fn get_feedback_by_id(&self, id: i64) -> Result<Option<Feedback>>;
    async fn list_feedback_with_pagination(
        &self,
        query: FeedbackListQuery,
    ) -> Result<FeedbackListResponse>;
    async fn respond_feedback(&self, id: i64, response: String) -> Result<Option<Feedback>>;
    async fn delete_feedback(&self, id: i64) -> Result<bool>;

    /// 创业想法
    async fn create_startup_idea(
        &self,
        student_id: i64,
        req: CreateStartupIdeaRequest,
    ) -> Result<StartupIdea>;
    async fn get_startup_idea_by_id(&self, id: i64) -> Result<Option<StartupIdea>>;
    async fn list_startup_ideas_with_pagination(
        &self,
        query: StartupIdeaListQuery,
    ) -> Result<StartupIdeaListResponse>;
    async fn update_startup_idea(
        &self,
        id: i64,
        update: UpdateStartupIdeaRequest,
    ) -> Result<Option<StartupIdea>>;
    async fn review_startup_idea(
        &self,
        id: i64,
        status: IdeaStatus,
        reviewer_comment: Option<String>,
    ) -> Result<Option<StartupIdea>>;
    async fn delete_startup_idea(&self, id: i64) -> Result<bool>;

    /// 教学大纲
    async fn create_syllabus_topic(
        &self,
        teacher_id: i64,
        req: CreateTopicRequest,
    ) -> Result<SyllabusTopic>;
    async fn get_syllabus_topic_by_id(&self, id: i64) -> Result<Option<SyllabusTopic>>;
    async fn list_syllabus_topics(&self, query: SyllabusQuery) -> Result<Vec<SyllabusTopic>>;
    async fn update_syllabus_topic(
        &self,
        id: i64,
        update: UpdateTopicRequest,
    ) -> Result<Option<SyllabusTopic>>;
    async fn delete_syllabus_topic(&self, id: i64) -> Result<bool>;
    async fn create_syllabus_subtopic(&self, topic_id: i64, title: String)
    -> Result<SyllabusSubtopic>;
    async fn get_syllabus_subtopic_by_id(&self, id: i64) -> Result<Option<SyllabusSubtopic>>;
    async fn update_syllabus_subtopic(
        &self,
        id: i64,
        update: UpdateSubtopicRequest,
    ) -> Result<Option<SyllabusSubtopic>>;
    async fn delete_syllabus_subtopic(&self, id: i64) -> Result<bool>;
    async fn get_syllabus_progress(&self, query: SyllabusQuery)
    -> Result<SyllabusProgressResponse>;

    /// 仪表盘统计
    async fn get_admin_dashboard_stats(&self) -> Result<AdminDashboardStats>;
    async fn get_teacher_dashboard_stats(&self, teacher_id: i64) -> Result<TeacherDashboardStats>;
    async fn get_student_dashboard_stats(
        &self,
        student_id: i64,
        semester: Option<i32>,
    ) -> Result<StudentDashboardStats>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
