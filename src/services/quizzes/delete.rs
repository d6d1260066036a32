use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::QuizService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_user, forbidden, not_found, storage_error};

pub async fn delete_quiz(
    service: &QuizService,
    request: &HttpRequest,
    quiz_id: i64,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    match storage.get_quiz_by_id(quiz_id).await {
        Ok(Some(quiz)) if !user.owns_or_admin(quiz.teacher_id) => {
            return Ok(forbidden("只能删除自己的测验"));
        }
        Ok(Some(_)) => {}
        Ok(None) => return Ok(not_found(ErrorCode::QuizNotFound, "测验不存在")),
        Err(e) => return Ok(storage_error("查询测验失败", e)),
    }

    // 题目与作答记录随外键级联删除
    match storage.delete_quiz(quiz_id).await {
        Ok(true) => {
            info!("Quiz {} deleted by {} {}", quiz_id, user.role, user.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("测验删除成功")))
        }
        Ok(false) => Ok(not_found(ErrorCode::QuizNotFound, "测验不存在")),
        Err(e) => Ok(storage_error("删除测验失败", e)),
    }
}
