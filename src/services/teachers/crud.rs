//! 教师账号管理，写操作仅限管理员

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::TeacherService;
use crate::errors::LmsError;
use crate::middlewares::RequireJWT;
use crate::models::teachers::requests::{
    CreateTeacherRequest, TeacherListParams, TeacherListQuery, UpdateTeacherRequest,
};
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{hash_or_error, normalize_email, not_found, storage_error};
use crate::utils::validate::{validate_email, validate_name, validate_password_simple};

fn bad_request(code: ErrorCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::error_empty(code, message))
}

fn duplicate_email() -> HttpResponse {
    HttpResponse::Conflict().json(ApiResponse::error_empty(
        ErrorCode::AccountAlreadyExists,
        "该邮箱已被其他教师使用",
    ))
}

pub async fn list_teachers(
    service: &TeacherService,
    request: &HttpRequest,
    query: TeacherListParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage
        .list_teachers_with_pagination(TeacherListQuery::from(query))
        .await
    {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "获取教师列表成功",
        ))),
        Err(e) => Ok(storage_error("获取教师列表失败", e)),
    }
}

pub async fn create_teacher(
    service: &TeacherService,
    request: &HttpRequest,
    mut teacher_data: CreateTeacherRequest,
) -> ActixResult<HttpResponse> {
    teacher_data.name = teacher_data.name.trim().to_string();
    teacher_data.email = normalize_email(&teacher_data.email);

    if let Err(msg) = validate_name(&teacher_data.name) {
        return Ok(bad_request(ErrorCode::ValidationFailed, msg));
    }
    if let Err(msg) = validate_email(&teacher_data.email) {
        return Ok(bad_request(ErrorCode::EmailInvalid, msg));
    }
    if let Err(msg) = validate_password_simple(&teacher_data.password) {
        return Ok(bad_request(ErrorCode::PasswordTooWeak, msg));
    }

    teacher_data.password = match hash_or_error(&teacher_data.password) {
        Ok(hash) => hash,
        Err(resp) => return Ok(resp),
    };

    let storage = service.get_storage(request);
    match storage.create_teacher(teacher_data).await {
        Ok(teacher) => {
            info!("Teacher {} created", teacher.email);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                teacher,
                "教师创建成功",
            )))
        }
        Err(LmsError::Conflict(_)) => Ok(duplicate_email()),
        Err(e) => Ok(storage_error("创建教师失败", e)),
    }
}

pub async fn get_teacher(
    service: &TeacherService,
    request: &HttpRequest,
    teacher_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_teacher_by_id(teacher_id).await {
        Ok(Some(teacher)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            teacher,
            "获取教师成功",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::TeacherNotFound, "教师不存在")),
        Err(e) => Ok(storage_error("查询教师失败", e)),
    }
}

pub async fn update_teacher(
    service: &TeacherService,
    request: &HttpRequest,
    teacher_id: i64,
    mut update_data: UpdateTeacherRequest,
) -> ActixResult<HttpResponse> {
    if let Some(name) = &update_data.name
        && let Err(msg) = validate_name(name)
    {
        return Ok(bad_request(ErrorCode::ValidationFailed, msg));
    }
    if let Some(email) = update_data.email.as_mut() {
        *email = normalize_email(email);
        if let Err(msg) = validate_email(email) {
            return Ok(bad_request(ErrorCode::EmailInvalid, msg));
        }
    }
    if let Some(password) = update_data.password.take() {
        if let Err(msg) = validate_password_simple(&password) {
            return Ok(bad_request(ErrorCode::PasswordTooWeak, msg));
        }
        match hash_or_error(&password) {
            Ok(hash) => update_data.password = Some(hash),
            Err(resp) => return Ok(resp),
        }
    }

    let storage = service.get_storage(request);
    match storage.update_teacher(teacher_id, update_data).await {
        Ok(Some(teacher)) => {
            RequireJWT::evict_account(request, UserRole::Teacher, teacher_id).await;
            info!("Teacher {} updated", teacher_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                teacher,
                "教师信息更新成功",
            )))
        }
        Ok(None) => Ok(not_found(ErrorCode::TeacherNotFound, "教师不存在")),
        Err(LmsError::Conflict(_)) => Ok(duplicate_email()),
        Err(e) => Ok(storage_error("更新教师失败", e)),
    }
}

pub async fn delete_teacher(
    service: &TeacherService,
    request: &HttpRequest,
    teacher_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.delete_teacher(teacher_id).await {
        Ok(true) => {
            RequireJWT::evict_account(request, UserRole::Teacher, teacher_id).await;
            info!("Teacher {} deleted", teacher_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
                "教师删除成功",
            )))
        }
        Ok(false) => Ok(not_found(ErrorCode::TeacherNotFound, "教师不存在")),
        Err(e) => Ok(storage_error("删除教师失败", e)),
    }
}
