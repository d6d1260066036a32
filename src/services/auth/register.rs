use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::errors::LmsError;
use crate::models::auth::requests::RegisterRequest;
use crate::models::students::requests::CreateStudentRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::students::validate_new_student;
use crate::services::{hash_or_error, normalize_email, storage_error};

use super::AuthService;

pub async fn handle_register(
    service: &AuthService,
    register_request: RegisterRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let mut create_request = CreateStudentRequest {
        name: register_request.name.trim().to_string(),
        email: normalize_email(&register_request.email),
        password: register_request.password,
        semester: register_request.semester,
        roll_number: register_request.roll_number,
        department: register_request.department,
        phone: register_request.phone,
    };

    // 1. 校验姓名、邮箱、密码强度与学期
    if let Err(response) = validate_new_student(&create_request) {
        return Ok(response);
    }

    // 2. 将明文密码替换为哈希
    create_request.password = match hash_or_error(&create_request.password) {
        Ok(hash) => hash,
        Err(response) => return Ok(response),
    };

    // 3. 创建学生账号，邮箱或学号重复返回 409
    match storage.create_student(create_request).await {
        Ok(student) => {
            tracing::info!("Student {} registered", student.email);
            Ok(HttpResponse::Created().json(ApiResponse::success(student, "注册成功")))
        }
        Err(LmsError::Conflict(_)) => Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::AccountAlreadyExists,
            "该邮箱或学号已被注册",
        ))),
        Err(e) => Ok(storage_error("注册失败", e)),
    }
}
