use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{AnnouncementService, is_author_or_admin};
use crate::models::schedules::audience::Audience;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_user, not_found, storage_error};

pub async fn get_announcement(
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
        Ok(Some(announcement))
            if is_author_or_admin(&announcement, &user)
                || Audience::parse(&announcement.target_audience).reaches(&user) =>
        {
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                announcement,
                "获取公告成功",
            )))
        }
        Ok(_) => Ok(not_found(
            ErrorCode::AnnouncementNotFound,
            "公告不存在",
        )),
        Err(e) => Ok(storage_error("查询公告失败", e)),
    }
}
