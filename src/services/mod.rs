pub mod announcements;
pub mod assignments;
pub mod auth;
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
pub mod uploads;

pub use announcements::AnnouncementService;
pub use assignments::AssignmentService;
pub use auth::AuthService;
pub use dashboard::DashboardService;
pub use feedback::FeedbackService;
pub use materials::MaterialService;
pub use notifications::NotificationService;
pub use quizzes::QuizService;
pub use schedules::ScheduleService;
pub use startup_ideas::StartupIdeaService;
pub use students::StudentService;
pub use syllabus::SyllabusService;
pub use system::SystemService;
pub use teachers::TeacherService;

use actix_web::{HttpRequest, HttpResponse};
use tracing::error;

use crate::errors::LmsError;
use crate::middlewares::RequireJWT;
use crate::models::users::entities::AuthUser;
use crate::models::{ApiResponse, ErrorCode};

/// 定义按请求懒取存储的服务结构体
///
/// 路由层以 `Lazy<XService>` 全局持有服务，存储从 app_data 中获取。
macro_rules! lazy_storage_service {
    ($name:ident) => {
        pub struct $name {
            storage: Option<std::sync::Arc<dyn $crate::storage::Storage>>,
        }

        impl $name {
            pub fn new_lazy() -> Self {
                Self { storage: None }
            }

            pub(crate) fn get_storage(
                &self,
                request: &actix_web::HttpRequest,
            ) -> std::sync::Arc<dyn $crate::storage::Storage> {
                if let Some(storage) = &self.storage {
                    storage.clone()
                } else {
                    request
                        .app_data::<actix_web::web::Data<std::sync::Arc<dyn $crate::storage::Storage>>>()
                        .expect("Storage not found in app data")
                        .get_ref()
                        .clone()
                }
            }
        }
    };
}
pub(crate) use lazy_storage_service;

/// 取出当前登录账号，缺失时返回 401 响应
pub(crate) fn current_user(request: &HttpRequest) -> Result<AuthUser, HttpResponse> {
    RequireJWT::extract_user(request).ok_or_else(|| {
        HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "未登录",
        ))
    })
}

pub(crate) fn forbidden(message: &str) -> HttpResponse {
    HttpResponse::Forbidden().json(ApiResponse::error_empty(ErrorCode::Forbidden, message))
}

pub(crate) fn not_found(code: ErrorCode, message: &str) -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(code, message))
}

pub(crate) fn validation_failed(message: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::error_empty(
        ErrorCode::ValidationFailed,
        message,
    ))
}

/// 存储层错误到 HTTP 响应的映射，服务端错误会记录日志
pub(crate) fn storage_error(context: &str, e: LmsError) -> HttpResponse {
    match e {
        LmsError::Conflict(msg) => HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::Conflict,
            format!("{context}: {msg}"),
        )),
        LmsError::NotFound(msg) => HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::NotFound,
            format!("{context}: {msg}"),
        )),
        LmsError::Validation(msg) => validation_failed(format!("{context}: {msg}")),
        other => {
            error!("{}: {}", context, other);
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("{context}: {}", other.message()),
            ))
        }
    }
}

/// 哈希明文密码，失败时返回 500 响应
pub(crate) fn hash_or_error(password: &str) -> Result<String, HttpResponse> {
    crate::utils::password::hash_password(password).map_err(|e| {
        error!("Failed to hash password: {}", e);
        HttpResponse::InternalServerError().json(ApiResponse::error_empty(
            ErrorCode::InternalServerError,
            "密码加密失败",
        ))
    })
}

/// 账号表邮箱统一去空白并转小写
pub(crate) fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::MessageBody;
    use actix_web::http::StatusCode;

    fn message_of(resp: HttpResponse) -> String {
        let body = resp.into_body().try_into_bytes().unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        json["message"].as_str().unwrap().to_string()
    }

    #[test]
    fn test_storage_validation_error_is_bad_request() {
        let resp = storage_error("创建测验失败", LmsError::validation("测验总分超出范围"));
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(message_of(resp), "创建测验失败: 测验总分超出范围");
    }

    #[test]
    fn test_not_found_keeps_message() {
        let resp = not_found(ErrorCode::QuizNotFound, "测验不存在");
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(message_of(resp), "测验不存在");
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  Asha@College.EDU "), "asha@college.edu");
    }
}
