pub mod announcements;
pub mod assignments;
pub mod auth;
pub mod common;
pub mod dashboard;
pub mod feedback;
pub mod materials;
pub mod notifications;
pub mod quizzes;
pub mod schedules;
pub mod startup_ideas;
pub mod students;
pub mod syllabus;
pub mod system;
pub mod teachers;
pub mod users;

pub use common::pagination::{PaginatedResponse, PaginationInfo, PaginationQuery};
pub use common::response::ApiResponse;

/// 程序启动时间（用于健康检查计算运行时长）
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

/// 业务错误码，写入 ApiResponse.code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 通用错误
    BadRequest = 1000,
    ValidationFailed = 1001,
    Unauthorized = 1002,
    Forbidden = 1003,
    NotFound = 1004,
    Conflict = 1009,
    RateLimitExceeded = 1029,
    InternalServerError = 1500,

    // 认证与账号
    AuthFailed = 2000,
    AccountInactive = 2001,
    PasswordTooWeak = 2002,
    EmailInvalid = 2003,
    AccountAlreadyExists = 2004,

    // 业务资源
    StudentNotFound = 3000,
    TeacherNotFound = 3001,
    AnnouncementNotFound = 3100,
    MaterialNotFound = 3200,
    AssignmentNotFound = 3300,
    SubmissionNotFound = 3301,
    SubmissionAlreadyGraded = 3302,
    QuizNotFound = 3400,
    QuizNotPublished = 3401,
    QuizAlreadyAttempted = 3402,
    QuizHasNoQuestions = 3403,
    ScheduleNotFound = 3500,
    FeedbackNotFound = 3600,
    StartupIdeaNotFound = 3700,
    NotificationNotFound = 3800,
    SyllabusTopicNotFound = 3900,
    SyllabusSubtopicNotFound = 3901,

    // 文件
    FileUploadFailed = 4000,
    FileTypeNotAllowed = 4001,
    FileSizeExceeded = 4002,
    FileNotFound = 4003,
    MultifileUploadNotAllowed = 4004,
}
