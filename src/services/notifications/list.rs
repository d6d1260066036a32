use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::NotificationService;
use crate::models::ApiResponse;
use crate::models::notifications::requests::{NotificationListParams, NotificationListQuery};
use crate::models::notifications::responses::UnreadCountResponse;
use crate::services::{current_user, storage_error};

pub async fn list_notifications(
    service: &NotificationService,
    request: &HttpRequest,
    query: NotificationListParams,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    let (page, size) = query.pagination.normalized();
    let list_query = NotificationListQuery {
        page,
        size,
        recipient_id: user.id,
        recipient_role: user.role,
        unread_only: query.unread_only.unwrap_or(false),
    };

    match storage.list_notifications_with_pagination(list_query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "获取通知列表成功",
        ))),
        Err(e) => Ok(storage_error("获取通知列表失败", e)),
    }
}

pub async fn get_unread_count(
    service: &NotificationService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    match storage.get_unread_notification_count(user.id, user.role).await {
        Ok(unread_count) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            UnreadCountResponse { unread_count },
            "获取未读数量成功",
        ))),
        Err(e) => Ok(storage_error("统计未读通知失败", e)),
    }
}
