use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::StudentService;
use crate::middlewares::RequireJWT;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{not_found, storage_error};

pub async fn delete_student(
    service: &StudentService,
    request: &HttpRequest,
    student_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 提交、作答、反馈等记录随外键级联删除
    match storage.delete_student(student_id).await {
        Ok(true) => {
            RequireJWT::evict_account(request, UserRole::Student, student_id).await;
            info!("Student {} deleted", student_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
                "学生删除成功",
            )))
        }
        Ok(false) => Ok(not_found(ErrorCode::StudentNotFound, "学生不存在")),
        Err(e) => Ok(storage_error("删除学生失败", e)),
    }
}
