use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::NotificationService;
use crate::models::notifications::responses::MarkAllReadResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_user, not_found, storage_error};

/// 通知只对接收者本人可见，非本人按不存在处理
async fn ensure_owned(
    service: &NotificationService,
    request: &HttpRequest,
    notification_id: i64,
) -> Result<(), HttpResponse> {
    let user = current_user(request)?;
    let storage = service.get_storage(request);

    match storage.get_notification_by_id(notification_id).await {
        Ok(Some(n)) if n.recipient_id == user.id && n.recipient_role == user.role => Ok(()),
        Ok(_) => Err(not_found(
            ErrorCode::NotificationNotFound,
            "通知不存在",
        )),
        Err(e) => Err(storage_error("查询通知失败", e)),
    }
}

pub async fn mark_as_read(
    service: &NotificationService,
    request: &HttpRequest,
    notification_id: i64,
) -> ActixResult<HttpResponse> {
    if let Err(resp) = ensure_owned(service, request, notification_id).await {
        return Ok(resp);
    }
    let storage = service.get_storage(request);

    // 已读的通知再次标记同样视为成功
    match storage.mark_notification_as_read(notification_id).await {
        Ok(_) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
            "已标记为已读",
        ))),
        Err(e) => Ok(storage_error("标记已读失败", e)),
    }
}

pub async fn mark_all_as_read(
    service: &NotificationService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    match storage.mark_all_notifications_as_read(user.id, user.role).await {
        Ok(marked_count) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            MarkAllReadResponse { marked_count },
            "已全部标记为已读",
        ))),
        Err(e) => Ok(storage_error("批量标记已读失败", e)),
    }
}

pub async fn delete_notification(
    service: &NotificationService,
    request: &HttpRequest,
    notification_id: i64,
) -> ActixResult<HttpResponse> {
    if let Err(resp) = ensure_owned(service, request, notification_id).await {
        return Ok(resp);
    }
    let storage = service.get_storage(request);

    match storage.delete_notification(notification_id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
            "通知删除成功",
        ))),
        Ok(false) => Ok(not_found(
            ErrorCode::NotificationNotFound,
            "通知不存在",
        )),
        Err(e) => Ok(storage_error("删除通知失败", e)),
    }
}
