use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{FeedbackService, present_for};
use crate::models::feedback::requests::RespondFeedbackRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_user, forbidden, not_found, storage_error, validation_failed};
use crate::utils::validate::validate_required_text;

pub async fn respond_feedback(
    service: &FeedbackService,
    request: &HttpRequest,
    feedback_id: i64,
    response_data: RespondFeedbackRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    if let Err(msg) = validate_required_text(&response_data.response, "回复", 5_000) {
        return Ok(validation_failed(msg));
    }
    let storage = service.get_storage(request);

    let feedback = match storage.get_feedback_by_id(feedback_id).await {
        Ok(Some(feedback)) => feedback,
        Ok(None) => return Ok(not_found(ErrorCode::FeedbackNotFound, "反馈不存在")),
        Err(e) => return Ok(storage_error("查询反馈失败", e)),
    };
    // 只有被反馈的教师或管理员可以回复
    let addressed = feedback
        .teacher_id
        .is_some_and(|teacher_id| user.is_teacher() && teacher_id == user.id);
    if !user.is_admin() && !addressed {
        return Ok(forbidden("只能回复发给自己的反馈"));
    }

    match storage
        .respond_feedback(feedback_id, response_data.response.trim().to_string())
        .await
    {
        Ok(Some(updated)) => {
            info!("Feedback {} responded by {} {}", feedback_id, user.role, user.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                present_for(updated, &user),
                "回复成功",
            )))
        }
        Ok(None) => Ok(not_found(ErrorCode::FeedbackNotFound, "反馈不存在")),
        Err(e) => Ok(storage_error("回复反馈失败", e)),
    }
}

pub async fn delete_feedback(
    service: &FeedbackService,
    request: &HttpRequest,
    feedback_id: i64,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    if !user.is_admin() {
        return Ok(forbidden("只有管理员可以删除反馈"));
    }

    let storage = service.get_storage(request);
    match storage.delete_feedback(feedback_id).await {
        Ok(true) => {
            info!("Feedback {} deleted by admin {}", feedback_id, user.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
                "反馈删除成功",
            )))
        }
        Ok(false) => Ok(not_found(ErrorCode::FeedbackNotFound, "反馈不存在")),
        Err(e) => Ok(storage_error("删除反馈失败", e)),
    }
}
