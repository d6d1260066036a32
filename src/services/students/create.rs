use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{StudentService, validate_new_student};
use crate::errors::LmsError;
use crate::models::students::requests::CreateStudentRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{hash_or_error, normalize_email, storage_error};

pub async fn create_student(
    service: &StudentService,
    request: &HttpRequest,
    mut student_data: CreateStudentRequest,
) -> ActixResult<HttpResponse> {
    student_data.name = student_data.name.trim().to_string();
    student_data.email = normalize_email(&student_data.email);
    if let Err(resp) = validate_new_student(&student_data) {
        return Ok(resp);
    }

    student_data.password = match hash_or_error(&student_data.password) {
        Ok(hash) => hash,
        Err(resp) => return Ok(resp),
    };

    let storage = service.get_storage(request);
    match storage.create_student(student_data).await {
        Ok(student) => {
            info!("Student {} created", student.email);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                student,
                "学生创建成功",
            )))
        }
        Err(LmsError::Conflict(_)) => Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::AccountAlreadyExists,
            "该邮箱或学号已被其他学生使用",
        ))),
        Err(e) => Ok(storage_error("创建学生失败", e)),
    }
}
