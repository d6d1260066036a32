use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{StudentService, validate_student_update};
use crate::errors::LmsError;
use crate::middlewares::RequireJWT;
use crate::models::students::requests::UpdateStudentRequest;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{hash_or_error, normalize_email, not_found, storage_error};

pub async fn update_student(
    service: &StudentService,
    request: &HttpRequest,
    student_id: i64,
    mut update_data: UpdateStudentRequest,
) -> ActixResult<HttpResponse> {
    if let Some(email) = update_data.email.as_mut() {
        *email = normalize_email(email);
    }
    if let Err(resp) = validate_student_update(&update_data) {
        return Ok(resp);
    }
    if let Some(password) = update_data.password.take() {
        match hash_or_error(&password) {
            Ok(hash) => update_data.password = Some(hash),
            Err(resp) => return Ok(resp),
        }
    }

    let storage = service.get_storage(request);
    match storage.update_student(student_id, update_data).await {
        Ok(Some(student)) => {
            // 状态、学期等变更需要让缓存的会话重新加载
            RequireJWT::evict_account(request, UserRole::Student, student_id).await;
            info!("Student {} updated", student_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                student,
                "学生信息更新成功",
            )))
        }
        Ok(None) => Ok(not_found(ErrorCode::StudentNotFound, "学生不存在")),
        Err(LmsError::Conflict(_)) => Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::AccountAlreadyExists,
            "该邮箱或学号已被其他学生使用",
        ))),
        Err(e) => Ok(storage_error("更新学生失败", e)),
    }
}
