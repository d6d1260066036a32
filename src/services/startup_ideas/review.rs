use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::StartupIdeaService;
use crate::models::startup_ideas::entities::IdeaStatus;
use crate::models::startup_ideas::requests::ReviewStartupIdeaRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_user, forbidden, not_found, storage_error, validation_failed};

pub async fn review_idea(
    service: &StartupIdeaService,
    request: &HttpRequest,
    idea_id: i64,
    review_data: ReviewStartupIdeaRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    if user.is_student() {
        return Ok(forbidden("只有教师和管理员可以审核创业想法"));
    }
    // 审核结果不能退回待审核
    if review_data.status == IdeaStatus::Pending {
        return Ok(validation_failed(
            "审核状态必须为 under_review、approved 或 rejected",
        ));
    }
    let comment = review_data
        .reviewer_comment
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty());
    if comment.as_deref().is_some_and(|c| c.chars().count() > 5_000) {
        return Ok(validation_failed(
            "审核意见不能超过 5000 个字符",
        ));
    }

    let storage = service.get_storage(request);
    match storage
        .review_startup_idea(idea_id, review_data.status, comment)
        .await
    {
        Ok(Some(idea)) => {
            info!(
                "Startup idea {} marked {} by {} {}",
                idea_id, idea.status, user.role, user.id
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                idea,
                "创业想法审核成功",
            )))
        }
        Ok(None) => Ok(not_found(ErrorCode::StartupIdeaNotFound, "创业想法不存在")),
        Err(e) => Ok(storage_error("审核创业想法失败", e)),
    }
}
