use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::QuizService;
use crate::models::quizzes::requests::UpdateQuizRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_user, forbidden, not_found, storage_error, validation_failed};
use crate::utils::validate::{validate_required_text, validate_semester};

pub async fn update_quiz(
    service: &QuizService,
    request: &HttpRequest,
    quiz_id: i64,
    update_data: UpdateQuizRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    match storage.get_quiz_by_id(quiz_id).await {
        Ok(Some(quiz)) if !user.owns_or_admin(quiz.teacher_id) => {
            return Ok(forbidden("只能修改自己的测验"));
        }
        Ok(Some(_)) => {}
        Ok(None) => return Ok(not_found(ErrorCode::QuizNotFound, "测验不存在")),
        Err(e) => return Ok(storage_error("查询测验失败", e)),
    }

    if let Err(msg) = validate_update(&update_data) {
        return Ok(validation_failed(msg));
    }

    match storage.update_quiz(quiz_id, update_data).await {
        Ok(Some(quiz)) => {
            info!("Quiz {} updated by {} {}", quiz_id, user.role, user.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(quiz, "测验更新成功")))
        }
        Ok(None) => Ok(not_found(ErrorCode::QuizNotFound, "测验不存在")),
        Err(e) => Ok(storage_error("更新测验失败", e)),
    }
}

fn validate_update(update: &UpdateQuizRequest) -> Result<(), String> {
    if let Some(title) = &update.title {
        validate_required_text(title, "标题", 255)?;
    }
    if let Some(subject) = &update.subject {
        validate_required_text(subject, "科目", 100)?;
    }
    if let Some(semester) = update.semester {
        validate_semester(semester)?;
    }
    if let Some(minutes) = update.duration_minutes
        && minutes <= 0
    {
        return Err("时长必须为正整数（分钟）".to_string());
    }
    Ok(())
}
