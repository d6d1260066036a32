use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{AnnouncementService, is_author_or_admin};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_user, forbidden, not_found, storage_error};

pub async fn delete_announcement(
    service: &AnnouncementService,
    request: &HttpRequest,
    announcement_id: i64,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    match storage.get_announcement_by_id(announcement_id).await {
        Ok(Some(announcement)) if !is_author_or_admin(&announcement, &user) => {
            return Ok(forbidden("只能删除自己的公告"));
        }
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(not_found(
                ErrorCode::AnnouncementNotFound,
                "公告不存在",
            ));
        }
        Err(e) => return Ok(storage_error("查询公告失败", e)),
    }

    match storage.delete_announcement(announcement_id).await {
        Ok(true) => {
            info!(
                "Announcement {} deleted by {} {}",
                announcement_id, user.role, user.id
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
                "公告删除成功",
            )))
        }
        Ok(false) => Ok(not_found(
            ErrorCode::AnnouncementNotFound,
            "公告不存在",
        )),
        Err(e) => Ok(storage_error("删除公告失败", e)),
    }
}
