use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{FeedbackService, present_for};
use crate::models::ApiResponse;
use crate::models::feedback::requests::{FeedbackListParams, FeedbackListQuery};
use crate::models::feedback::responses::FeedbackListResponse;
use crate::models::users::entities::UserRole;
use crate::services::{current_user, storage_error};

pub async fn list_feedback(
    service: &FeedbackService,
    request: &HttpRequest,
    query: FeedbackListParams,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    // 学生只看自己的，教师只看发给自己的
    let mut list_query = FeedbackListQuery::from(query);
    match user.role {
        UserRole::Student => list_query.student_id = Some(user.id),
        UserRole::Teacher => list_query.teacher_id = Some(user.id),
        UserRole::Admin => {}
    }

    let storage = service.get_storage(request);
    match storage.list_feedback_with_pagination(list_query).await {
        Ok(FeedbackListResponse { items, pagination }) => {
            let items = items
                .into_iter()
                .map(|feedback| present_for(feedback, &user))
                .collect();
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                FeedbackListResponse { items, pagination },
                "获取反馈成功",
            )))
        }
        Err(e) => Ok(storage_error("获取反馈列表失败", e)),
    }
}
