pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::lazy_storage_service;
use crate::models::students::requests::{
    CreateStudentRequest, StudentListParams, UpdateStudentRequest,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::validate::{validate_email, validate_name, validate_password_simple, validate_semester};

lazy_storage_service!(StudentService);

impl StudentService {
    pub async fn list_students(
        &self,
        request: &HttpRequest,
        query: StudentListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_students(self, request, query).await
    }

    pub async fn create_student(
        &self,
        request: &HttpRequest,
        student_data: CreateStudentRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_student(self, request, student_data).await
    }

    pub async fn get_student(
        &self,
        request: &HttpRequest,
        student_id: i64,
    ) -> ActixResult<HttpResponse> {
        get::get_student(self, request, student_id).await
    }

    pub async fn update_student(
        &self,
        request: &HttpRequest,
        student_id: i64,
        update_data: UpdateStudentRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_student(self, request, student_id, update_data).await
    }

    pub async fn delete_student(
        &self,
        request: &HttpRequest,
        student_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_student(self, request, student_id).await
    }
}

fn bad_request(code: ErrorCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::error_empty(code, message))
}

/// 新学生账号校验，注册与管理员创建共用
pub(crate) fn validate_new_student(req: &CreateStudentRequest) -> Result<(), HttpResponse> {
    validate_name(&req.name).map_err(|msg| bad_request(ErrorCode::ValidationFailed, msg))?;
    validate_email(&req.email).map_err(|msg| bad_request(ErrorCode::EmailInvalid, msg))?;
    validate_password_simple(&req.password)
        .map_err(|msg| bad_request(ErrorCode::PasswordTooWeak, msg))?;
    validate_semester(req.semester).map_err(|msg| bad_request(ErrorCode::ValidationFailed, msg))?;
    Ok(())
}

pub(crate) fn validate_student_update(update: &UpdateStudentRequest) -> Result<(), HttpResponse> {
    if let Some(name) = &update.name {
        validate_name(name).map_err(|msg| bad_request(ErrorCode::ValidationFailed, msg))?;
    }
    if let Some(email) = &update.email {
        validate_email(email).map_err(|msg| bad_request(ErrorCode::EmailInvalid, msg))?;
    }
    if let Some(password) = &update.password {
        validate_password_simple(password)
            .map_err(|msg| bad_request(ErrorCode::PasswordTooWeak, msg))?;
    }
    if let Some(semester) = update.semester {
        validate_semester(semester).map_err(|msg| bad_request(ErrorCode::ValidationFailed, msg))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    fn request() -> CreateStudentRequest {
        CreateStudentRequest {
            name: "Asha".to_string(),
            email: "asha@example.com".to_string(),
            password: "Secur3Pass".to_string(),
            semester: 3,
            roll_number: Some("CS-042".to_string()),
            department: None,
            phone: None,
        }
    }

    #[test]
    fn test_valid_student_passes() {
        assert!(validate_new_student(&request()).is_ok());
    }

    #[test]
    fn test_invalid_fields_are_rejected() {
        let mut weak = request();
        weak.password = "short".to_string();
        let resp = validate_new_student(&weak).unwrap_err();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let mut bad_email = request();
        bad_email.email = "not-an-email".to_string();
        assert!(validate_new_student(&bad_email).is_err());

        let mut bad_semester = request();
        bad_semester.semester = 0;
        assert!(validate_new_student(&bad_semester).is_err());
    }

    #[test]
    fn test_partial_update_only_checks_present_fields() {
        assert!(validate_student_update(&UpdateStudentRequest::default()).is_ok());
        let update = UpdateStudentRequest {
            semester: Some(12),
            ..Default::default()
        };
        assert!(validate_student_update(&update).is_err());
    }
}
